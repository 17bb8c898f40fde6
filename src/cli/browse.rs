//! Line-oriented browsing session.
//!
//! Each input line is one command. Commands map onto [`Action`]s applied
//! through [`Archive::step`]; the loop itself only carries the
//! [`SessionState`] from one screen to the next and the active view.

use std::io::{BufRead, Write};

use clap::ValueEnum;

use super::render::{count_line, render_names, render_view};
use super::{Context, ViewArg};
use crate::{Action, Error, Result, Screen, SessionState};

/// Browse commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    /// Filter names; no keyword clears the filter
    Search(Option<String>),
    /// Drop the selection
    Clear,
    /// Select by exact name or by `#n` position in the current list
    Select(Target),
    /// Switch the active view
    View(ViewArg),
    /// Show the current name list
    List,
    /// Re-read the source
    Reload,
    /// Show help
    Help,
    /// Leave the session
    Quit,
}

/// Selection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Name(String),
    /// 1-based position in the filtered list
    Index(usize),
}

impl BrowseCommand {
    /// Parse one input line.
    ///
    /// Arguments keep their inner spaces so names like `Li Hua` need no
    /// quoting. A name for `select` is everything after the first space,
    /// taken verbatim, since identities are not trimmed.
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let input = input.trim_start();
        if input.trim_end().is_empty() {
            return Err(Error::parse("Empty command"));
        }

        let (cmd, raw) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
        let arg = raw.trim();

        match cmd.to_lowercase().as_str() {
            "search" | "s" | "/" => Ok(Self::Search((!arg.is_empty()).then(|| arg.to_string()))),
            "clear" | "c" => Ok(Self::Clear),
            "select" | "open" | "o" => Self::parse_select(raw),
            "view" | "v" => Self::parse_view(arg),
            "list" | "ls" | "l" => Ok(Self::List),
            "reload" | "r" => Ok(Self::Reload),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(Error::parse(format!("Unknown command: '{other}'"))),
        }
    }

    fn parse_select(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::parse("select requires a name or #number"));
        }
        match raw.trim().strip_prefix('#') {
            Some(n) => n
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| Self::Select(Target::Index(n)))
                .ok_or_else(|| Error::parse(format!("Invalid number: '{n}'"))),
            None => Ok(Self::Select(Target::Name(raw.to_string()))),
        }
    }

    fn parse_view(arg: &str) -> Result<Self> {
        ViewArg::from_str(arg, true)
            .map(Self::View)
            .map_err(|_| Error::parse(format!("view must be basic, work, full or all, got '{arg}'")))
    }
}

const HELP: &[&str] = &[
    "Commands:",
    "  search [KEYWORD]   filter names (no keyword shows all)",
    "  list               show the current name list",
    "  select NAME | #N   show a person by name or list position",
    "                     (NAME is taken as typed, spaces included)",
    "  view basic|work|full|all",
    "                     switch the active view",
    "  clear              drop the selection",
    "  reload             re-read the source",
    "  help               show this help",
    "  quit               leave",
];

/// What a command wants to see after its step.
#[derive(Debug, Clone, Copy)]
struct Show {
    list: bool,
    record: bool,
}

/// Run a browsing session reading commands from `input`.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or reloaded, or if
/// reading input or writing output fails. Unknown commands and stale
/// selections are reported and the session continues.
pub(crate) fn run<R: BufRead, W: Write>(ctx: &Context, input: R, out: &mut W) -> Result<()> {
    let mut archive = ctx.open()?;
    let mut state = SessionState::default();
    let mut view = ViewArg::Basic;

    emit(
        out,
        &[
            format!("dossier {} - {}", env!("CARGO_PKG_VERSION"), ctx.key.source.display()),
            format!(
                "{} names indexed by '{}'. Type 'help' for commands, 'quit' to exit",
                archive.names().len(),
                archive.identity_column()
            ),
        ],
    )?;

    for line in input.lines() {
        let line = line.map_err(Error::io_no_path)?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                emit(out, &[e.to_string()])?;
                continue;
            }
        };

        let (action, show) = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                emit(out, HELP)?;
                continue;
            }
            BrowseCommand::Search(keyword) => (Action::Search(keyword), LIST),
            BrowseCommand::List => (Action::Refresh, LIST),
            BrowseCommand::Clear => {
                emit(out, &["Selection cleared"])?;
                (Action::ClearSelection, Show { list: false, record: false })
            }
            BrowseCommand::View(v) => {
                view = v;
                (Action::Refresh, RECORD)
            }
            BrowseCommand::Select(Target::Name(name)) => (Action::Select(name), RECORD),
            BrowseCommand::Select(Target::Index(n)) => {
                let picked = archive
                    .search(state.keyword.as_deref())
                    .get(n - 1)
                    .map(|name| (*name).to_string());
                match picked {
                    Some(name) => (Action::Select(name), RECORD),
                    None => {
                        emit(out, &[format!("No entry #{n} in the current list")])?;
                        continue;
                    }
                }
            }
            BrowseCommand::Reload => {
                archive = ctx.reload()?;
                emit(out, &[format!("Reloaded: {} names", archive.names().len())])?;
                (Action::Refresh, RECORD)
            }
        };

        let screen = archive.step(std::mem::take(&mut state), action);
        emit(out, &screen_lines(&screen, show, view))?;
        state = screen.state;
    }

    emit(out, &["Goodbye!"])
}

const LIST: Show = Show {
    list: true,
    record: false,
};

const RECORD: Show = Show {
    list: false,
    record: true,
};

fn screen_lines(screen: &Screen<'_>, show: Show, view: ViewArg) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(notice) = &screen.notice {
        lines.push(format!("Notice: {notice}"));
    }

    if show.list {
        lines.extend(render_names(&screen.names));
        lines.push(count_line(
            screen.names.len(),
            screen.total,
            screen.state.keyword.as_deref(),
        ));
    }

    if show.record {
        match &screen.dossier {
            Some(dossier) => {
                lines.push(format!("# {}", dossier.name));
                for kind in view.kinds() {
                    lines.extend(render_view(dossier.view(*kind)));
                }
            }
            None if screen.notice.is_none() => lines.push("No selection".to_string()),
            None => {}
        }
    }

    lines
}

fn emit<W: Write, S: AsRef<str>>(out: &mut W, lines: &[S]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line.as_ref()).map_err(Error::io_no_path)?;
    }
    Ok(())
}
