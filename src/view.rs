//! Declarative view specifications.
//!
//! A view is an ordered list of labelled groups, each an ordered list of
//! `(display label, column)` pairs. The two static views (Basic Info and
//! Work Info) are plain data and can be replaced from configuration; the
//! Full Info view is dynamic and has no specification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::Columns;

/// The three presentation views of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Identity, demographics, education, resume and family.
    Basic,
    /// Positions and evaluations.
    Work,
    /// Every non-blank field in column order.
    Full,
}

impl ViewKind {
    /// All kinds in display order.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Work, Self::Full];

    /// Short machine name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Work => "work",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(Self::Basic),
            "work" => Ok(Self::Work),
            "full" => Ok(Self::Full),
            other => Err(Error::invalid_config(format!("unknown view '{other}'"))),
        }
    }
}

/// How a group is laid out by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Short values, side by side.
    #[default]
    Grid,
    /// One long-text value spanning the full width.
    FullWidth,
}

/// One displayed field: the label shown and the column it reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Display label.
    pub label: String,
    /// Source column label.
    pub column: String,
}

impl FieldSpec {
    /// A field read from `column`, shown as `label`.
    pub fn new(label: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            column: column.into(),
        }
    }

    /// A field whose label is its column name.
    pub fn column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            label: column.clone(),
            column,
        }
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Section title.
    pub title: String,
    /// Layout hint.
    #[serde(default)]
    pub layout: Layout,
    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
}

impl FieldGroup {
    /// A grid group whose labels equal their column names.
    pub fn grid(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            layout: Layout::Grid,
            fields: columns.iter().map(|c| FieldSpec::column(*c)).collect(),
        }
    }

    /// A full-width group holding one long-text column.
    pub fn full_width(title: impl Into<String>, column: &str) -> Self {
        Self {
            title: title.into(),
            layout: Layout::FullWidth,
            fields: vec![FieldSpec::column(column)],
        }
    }
}

/// A static view: titled, ordered groups of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// View title.
    pub title: String,
    /// Groups in display order.
    pub groups: Vec<FieldGroup>,
}

impl ViewSpec {
    /// Built-in Basic Info view.
    pub fn basic_info() -> Self {
        Self {
            title: "基本信息".to_string(),
            groups: vec![
                FieldGroup::grid(
                    "个人基本信息",
                    &["姓名", "性别", "出生年月", "民族", "籍贯", "出生地"],
                ),
                FieldGroup::grid(
                    "教育背景",
                    &[
                        "全日制学历",
                        "全日制学位",
                        "全日制毕业院校",
                        "全日制专业",
                        "在职学历",
                        "在职学位",
                        "在职毕业院校",
                        "在职专业",
                    ],
                ),
                FieldGroup::full_width("简历", "简历"),
                FieldGroup::full_width("家庭主要关系", "家庭主要关系"),
            ],
        }
    }

    /// Built-in Work Info view.
    pub fn work_info() -> Self {
        Self {
            title: "工作信息".to_string(),
            groups: vec![
                FieldGroup::grid("职务信息", &["现任职务", "拟任职务", "拟免职务"]),
                FieldGroup::grid(
                    "其他信息",
                    &[
                        "专业技术职务",
                        "熟悉专业有何专长",
                        "奖惩情况",
                        "年度考核结果",
                    ],
                ),
            ],
        }
    }

    /// Number of fields across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }

    /// Whether the view declares no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    /// Declared columns that `columns` does not contain, in declaration
    /// order and without repeats.
    pub fn missing_columns(&self, columns: &Columns) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for field in self.fields() {
            if !columns.contains(&field.column) && !missing.contains(&field.column) {
                missing.push(field.column.clone());
            }
        }
        missing
    }

    fn check_shape(&self, kind: ViewKind) -> Result<()> {
        if self.is_empty() {
            return Err(Error::invalid_config(format!("view '{kind}' has no fields")));
        }
        if let Some(field) = self
            .fields()
            .find(|f| f.label.trim().is_empty() || f.column.trim().is_empty())
        {
            return Err(Error::invalid_config(format!(
                "view '{kind}' has a field with an empty label or column: {field:?}"
            )));
        }
        Ok(())
    }
}

/// A view column absent from the loaded schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewIssue {
    /// The view declaring the column.
    pub view: ViewKind,
    /// The missing column.
    pub column: String,
}

/// The static views used for projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCatalog {
    /// Basic Info view.
    pub basic: ViewSpec,
    /// Work Info view.
    pub work: ViewSpec,
}

impl Default for ViewCatalog {
    fn default() -> Self {
        Self {
            basic: ViewSpec::basic_info(),
            work: ViewSpec::work_info(),
        }
    }
}

impl ViewCatalog {
    /// Specification of a static view; `None` for the dynamic Full view.
    pub fn get(&self, kind: ViewKind) -> Option<&ViewSpec> {
        match kind {
            ViewKind::Basic => Some(&self.basic),
            ViewKind::Work => Some(&self.work),
            ViewKind::Full => None,
        }
    }

    /// Reject views with no fields or blank labels/columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first malformed view.
    pub fn check_shape(&self) -> Result<()> {
        self.basic.check_shape(ViewKind::Basic)?;
        self.work.check_shape(ViewKind::Work)
    }

    /// Every declared column missing from `columns`.
    pub fn validate(&self, columns: &Columns) -> Vec<ViewIssue> {
        [ViewKind::Basic, ViewKind::Work]
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|spec| (kind, spec)))
            .flat_map(|(view, spec)| {
                spec.missing_columns(columns)
                    .into_iter()
                    .map(move |column| ViewIssue { view, column })
            })
            .collect()
    }

    /// Like [`validate`](Self::validate), but fails on the first view with
    /// missing columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewSpec`] listing the unknown columns.
    pub fn validate_strict(&self, columns: &Columns) -> Result<()> {
        for kind in [ViewKind::Basic, ViewKind::Work] {
            let Some(spec) = self.get(kind) else { continue };
            let missing = spec.missing_columns(columns);
            if !missing.is_empty() {
                return Err(Error::ViewSpec {
                    view: kind.to_string(),
                    columns: missing,
                });
            }
        }
        Ok(())
    }
}
