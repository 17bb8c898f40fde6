//! dossier - Personnel Archive Browsing in Pure Rust
//!
//! Indexes a personnel archive exported as a table (CSV or Parquet), finds
//! people by name and shows each record's fields grouped into views:
//! basic identity and education, career, and the full raw record.
//!
//! # Pipeline
//!
//! 1. **Load** - a [`TableLoader`] reads a [`Table`] snapshot, memoized per
//!    source/sheet by [`TableCache`]
//! 2. **Resolve** - the identity (name) column is found by keyword
//! 3. **Index** - [`RecordStore`] maps names to records and keeps a sorted
//!    name list
//! 4. **Search** - substring filtering over the name list
//! 5. **Project** - [`Projector`] renders a record through a [`ViewSpec`]
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use dossier::{Archive, ArchiveConfig, CsvOptions, Table};
//!
//! let csv = "姓名,性别\nLi Hua,F\nWang Wei,M\n";
//! let table = Table::from_csv_str(csv, &CsvOptions::default()).unwrap();
//! let archive = Archive::open(Arc::new(table), &ArchiveConfig::default()).unwrap();
//!
//! assert_eq!(archive.search(Some("Wang")), vec!["Wang Wei"]);
//!
//! let dossier = archive.dossier("Li Hua").unwrap();
//! assert_eq!(dossier.basic.value("性别"), Some("F"));
//! assert_eq!(dossier.basic.value("籍贯"), Some("not filled"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_possible_truncation,
        clippy::redundant_clone,
        clippy::too_many_lines,
        clippy::similar_names
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod cache;
/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod projector;
pub mod resolver;
pub mod search;
pub mod store;
pub mod table;
pub mod view;

// Re-exports for convenience
pub use archive::{Action, Archive, Dossier, Screen, SessionState};
pub use cache::TableCache;
pub use config::ArchiveConfig;
pub use error::{Error, Result};
pub use projector::{ProjectedEntry, ProjectedSection, ProjectedView, Projector};
pub use resolver::{resolve_identity_column, DEFAULT_IDENTITY_KEYWORDS};
pub use search::filter_names;
pub use store::RecordStore;
pub use table::{CsvOptions, FileLoader, Record, Table, TableKey, TableLoader, Value};
pub use view::{FieldGroup, FieldSpec, Layout, ViewCatalog, ViewIssue, ViewKind, ViewSpec};
