//! Archive configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! identity_keywords = ["姓名", "名字", "人员"]
//! placeholder = "未填写"
//! strict_views = false
//!
//! [csv]
//! delimiter = ","
//! infer_types = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projector::DEFAULT_PLACEHOLDER;
use crate::resolver::DEFAULT_IDENTITY_KEYWORDS;
use crate::table::CsvOptions;
use crate::view::ViewCatalog;

/// Settings for loading and browsing an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Substrings that mark the identity column.
    pub identity_keywords: Vec<String>,
    /// Text shown for missing or blank values.
    pub placeholder: String,
    /// Fail when a view column is absent from the schema.
    pub strict_views: bool,
    /// Replacement for the built-in static views.
    pub views: Option<ViewCatalog>,
    /// CSV parsing options.
    pub csv: CsvOptions,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            identity_keywords: DEFAULT_IDENTITY_KEYWORDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            strict_views: false,
            views: None,
            csv: CsvOptions::default(),
        }
    }
}

impl ArchiveConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML and
    /// [`Error::InvalidConfig`] on invalid values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_toml_str(&text)
    }

    /// Check values that deserialization alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !self.identity_keywords.iter().any(|k| !k.is_empty()) {
            return Err(Error::invalid_config(
                "identity_keywords must contain a non-empty keyword",
            ));
        }
        if self.placeholder.trim().is_empty() {
            return Err(Error::invalid_config("placeholder must not be blank"));
        }
        if self.csv.batch_size == 0 {
            return Err(Error::invalid_config("csv.batch_size must be positive"));
        }
        if let Some(views) = &self.views {
            views.check_shape()?;
        }
        Ok(())
    }

    /// The static views in effect.
    pub fn catalog(&self) -> ViewCatalog {
        self.views.clone().unwrap_or_default()
    }

    /// Set the identity keywords.
    #[must_use]
    pub fn with_identity_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable/disable strict view validation.
    #[must_use]
    pub fn with_strict_views(mut self, strict: bool) -> Self {
        self.strict_views = strict;
        self
    }

    /// Replace the static views.
    #[must_use]
    pub fn with_views(mut self, views: ViewCatalog) -> Self {
        self.views = Some(views);
        self
    }

    /// Set CSV parsing options.
    #[must_use]
    pub fn with_csv(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }
}
