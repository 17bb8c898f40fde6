//! Error types for dossier.

use std::path::PathBuf;

/// Result type alias for dossier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, indexing or browsing an archive.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error while decoding a table.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error while reading a table.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// No column label contains any of the identity keywords.
    #[error("No name column found: none of {columns:?} contains any of {keywords:?}")]
    NameColumnNotFound {
        /// The identity keywords that were searched for.
        keywords: Vec<String>,
        /// The column labels that were inspected.
        columns: Vec<String>,
    },

    /// A name no longer maps to a record.
    #[error("No record found for '{name}'")]
    NotFound {
        /// The name that failed to resolve.
        name: String,
    },

    /// Column not found in schema.
    #[error("Column '{name}' not found in schema")]
    ColumnNotFound {
        /// The name of the missing column.
        name: String,
    },

    /// The same column label appears twice in a table header.
    #[error("Duplicate column label '{name}'")]
    DuplicateColumn {
        /// The repeated label.
        name: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// A sheet could not be located inside a source.
    #[error("Sheet {sheet:?} not found in {path:?}")]
    SheetNotFound {
        /// The source that was searched.
        path: PathBuf,
        /// The requested sheet, if any.
        sheet: Option<String>,
    },

    /// Browse command could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// Table has no columns.
    #[error("Table has no columns")]
    EmptyTable,

    /// A view references columns that the schema does not have.
    #[error("View '{view}' references unknown columns: {columns:?}")]
    ViewSpec {
        /// The offending view.
        view: String,
        /// Columns declared by the view but absent from the schema.
        columns: Vec<String>,
    },
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create a not found error for a name.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Whether browsing can continue after this error.
    ///
    /// A stale lookup is recoverable by re-prompting for a selection; every
    /// other condition ends the session.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}
