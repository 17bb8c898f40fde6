//! One-shot commands: names, show and columns.

use super::render::{count_line, render_names, render_view};
use super::{Context, OutputFormat, ViewArg};
use crate::view::ViewKind;
use crate::Result;

/// List indexed names, optionally filtered by keyword.
pub(crate) fn cmd_names(ctx: &Context, search: Option<&str>) -> Result<()> {
    let archive = ctx.open()?;
    let search = search.filter(|k| !k.is_empty());
    let names = archive.search(search);
    for line in render_names(&names) {
        println!("{line}");
    }
    println!("{}", count_line(names.len(), archive.names().len(), search));
    Ok(())
}

/// Print one person's views.
pub(crate) fn cmd_show(ctx: &Context, name: &str, view: ViewArg, format: OutputFormat) -> Result<()> {
    let archive = ctx.open()?;
    let dossier = archive.dossier(name)?;

    match format {
        OutputFormat::Json => {
            let json = match view.kinds() {
                [kind] => serde_json::to_string_pretty(dossier.view(*kind))?,
                _ => serde_json::to_string_pretty(&dossier)?,
            };
            println!("{json}");
        }
        OutputFormat::Text => {
            println!("{}", dossier.name);
            for kind in view.kinds() {
                println!();
                for line in render_view(dossier.view(*kind)) {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

/// Describe the schema: columns, the identity column and view coverage.
pub(crate) fn cmd_columns(ctx: &Context) -> Result<()> {
    let archive = ctx.open()?;
    let table = archive.table();

    println!("Identity column: {}", archive.identity_column());
    println!("Rows: {}", table.row_count());
    println!("Names: {}", archive.names().len());
    if !archive.duplicates().is_empty() {
        println!("Duplicate names: {}", archive.duplicates().join(", "));
    }

    println!();
    println!("Columns ({}):", table.column_count());
    let labels: Vec<&str> = table.labels().iter().map(String::as_str).collect();
    for line in render_names(&labels) {
        println!("{line}");
    }

    println!();
    for kind in [ViewKind::Basic, ViewKind::Work] {
        let Some(spec) = archive.catalog().get(kind) else {
            continue;
        };
        let missing: Vec<&str> = archive
            .view_issues()
            .iter()
            .filter(|issue| issue.view == kind)
            .map(|issue| issue.column.as_str())
            .collect();
        println!(
            "View {kind}: {}/{} columns present",
            spec.len().saturating_sub(missing.len()),
            spec.len()
        );
        if !missing.is_empty() {
            println!("  missing: {}", missing.join(", "));
        }
    }
    Ok(())
}
