//! Projection of a record into labelled display views.
//!
//! Projection never fails: a missing column, a null cell and a
//! whitespace-only cell all render as the placeholder in static views and
//! are omitted from the Full view.

use serde::Serialize;

use crate::table::Record;
use crate::view::{Layout, ViewCatalog, ViewKind, ViewSpec};

/// Placeholder for missing or blank values.
pub const DEFAULT_PLACEHOLDER: &str = "not filled";

/// One rendered field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedEntry {
    /// Display label.
    pub label: String,
    /// Rendered value, or the placeholder.
    pub value: String,
    /// Whether `value` came from the record rather than the placeholder.
    pub filled: bool,
}

/// A rendered group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedSection {
    /// Section title.
    pub title: String,
    /// Layout hint carried over from the view specification.
    pub layout: Layout,
    /// Entries in declared order.
    pub entries: Vec<ProjectedEntry>,
}

/// A record rendered through one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedView {
    /// Which view produced this projection.
    pub kind: ViewKind,
    /// View title.
    pub title: String,
    /// Sections in display order.
    pub sections: Vec<ProjectedSection>,
}

impl ProjectedView {
    /// All entries across sections, in display order.
    pub fn entries(&self) -> impl Iterator<Item = &ProjectedEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Whether the view has no entries. Only the Full view can be empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rendered value of the first entry with this label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.entries()
            .find(|e| e.label == label)
            .map(|e| e.value.as_str())
    }

    /// `(label, value)` pairs in display order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries()
            .map(|e| (e.label.as_str(), e.value.as_str()))
            .collect()
    }
}

/// Renders records through view specifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projector {
    placeholder: String,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

impl Projector {
    /// Create a projector with the given placeholder text.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// The placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Render `record` through the view `kind` of `catalog`.
    ///
    /// Static views have exactly one entry per declared field, in declared
    /// order. [`ViewKind::Full`] goes through [`Projector::project_full`].
    pub fn project(
        &self,
        record: &Record,
        catalog: &ViewCatalog,
        kind: ViewKind,
    ) -> ProjectedView {
        match catalog.get(kind) {
            Some(spec) => self.project_static(record, kind, spec),
            None => self.project_full(record),
        }
    }

    fn project_static(&self, record: &Record, kind: ViewKind, spec: &ViewSpec) -> ProjectedView {
        let sections = spec
            .groups
            .iter()
            .map(|group| ProjectedSection {
                title: group.title.clone(),
                layout: group.layout,
                entries: group
                    .fields
                    .iter()
                    .map(|field| match record.rendered(&field.column) {
                        Some(value) => ProjectedEntry {
                            label: field.label.clone(),
                            value,
                            filled: true,
                        },
                        None => ProjectedEntry {
                            label: field.label.clone(),
                            value: self.placeholder.clone(),
                            filled: false,
                        },
                    })
                    .collect(),
            })
            .collect();

        ProjectedView {
            kind,
            title: spec.title.clone(),
            sections,
        }
    }

    /// Render every non-blank field of `record` in column order.
    ///
    /// Returns a view with no sections when nothing qualifies.
    pub fn project_full(&self, record: &Record) -> ProjectedView {
        let entries: Vec<ProjectedEntry> = record
            .fields()
            .filter_map(|(column, value)| {
                value.render().map(|value| ProjectedEntry {
                    label: column.to_string(),
                    value,
                    filled: true,
                })
            })
            .collect();

        let sections = if entries.is_empty() {
            Vec::new()
        } else {
            vec![ProjectedSection {
                title: "完整档案信息".to_string(),
                layout: Layout::Grid,
                entries,
            }]
        };

        ProjectedView {
            kind: ViewKind::Full,
            title: "完整档案".to_string(),
            sections,
        }
    }
}
