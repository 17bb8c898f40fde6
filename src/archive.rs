//! Archive browsing facade.
//!
//! [`Archive`] wires the pipeline together for one snapshot:
//! identity resolution, the record store, name search and field
//! projection. Interaction state is never kept here; callers pass a
//! [`SessionState`] in and get the next one back from [`Archive::step`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ArchiveConfig;
use crate::error::{Error, Result};
use crate::projector::{ProjectedView, Projector};
use crate::resolver::resolve_identity_column;
use crate::search::filter_names;
use crate::store::RecordStore;
use crate::table::{Record, Table};
use crate::view::{ViewCatalog, ViewIssue, ViewKind};

/// The three projected views of one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dossier {
    /// Identity value.
    pub name: String,
    /// Basic Info view.
    pub basic: ProjectedView,
    /// Work Info view.
    pub work: ProjectedView,
    /// Full Info view.
    pub full: ProjectedView,
}

impl Dossier {
    /// The projection for a view kind.
    pub fn view(&self, kind: ViewKind) -> &ProjectedView {
        match kind {
            ViewKind::Basic => &self.basic,
            ViewKind::Work => &self.work,
            ViewKind::Full => &self.full,
        }
    }
}

/// User-owned interaction state carried between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Current search keyword.
    pub keyword: Option<String>,
    /// Currently selected identity.
    pub selected: Option<String>,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Change the search keyword; `None` or empty clears it.
    Search(Option<String>),
    /// Select a person by identity.
    Select(String),
    /// Drop the current selection.
    ClearSelection,
    /// Recompute the screen without changing state.
    Refresh,
}

/// Everything the presentation layer needs after one interaction.
#[derive(Debug)]
pub struct Screen<'a> {
    /// State to pass into the next call.
    pub state: SessionState,
    /// Names matching the current keyword.
    pub names: Vec<&'a str>,
    /// Total number of indexed names.
    pub total: usize,
    /// Views of the selected person, if any.
    pub dossier: Option<Dossier>,
    /// A recoverable condition to show the user.
    pub notice: Option<Error>,
}

/// Indexed, browsable snapshot.
#[derive(Debug, Clone)]
pub struct Archive {
    store: RecordStore,
    catalog: ViewCatalog,
    projector: Projector,
    view_issues: Vec<ViewIssue>,
}

impl Archive {
    /// Index `table` for browsing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameColumnNotFound`] before any indexing if no
    /// column matches the identity keywords, [`Error::ViewSpec`] in strict
    /// mode when a view column is missing from the schema, and
    /// [`Error::InvalidConfig`] for an invalid configuration.
    pub fn open(table: Arc<Table>, config: &ArchiveConfig) -> Result<Self> {
        config.validate()?;
        let identity = resolve_identity_column(table.labels(), &config.identity_keywords)?
            .to_string();

        let catalog = config.catalog();
        let view_issues = if config.strict_views {
            catalog.validate_strict(table.columns())?;
            Vec::new()
        } else {
            catalog.validate(table.columns())
        };
        for issue in &view_issues {
            warn!(view = %issue.view, column = %issue.column, "view column not in schema");
        }

        let store = RecordStore::build(table, &identity)?;
        info!(
            identity = %identity,
            names = store.len(),
            rows = store.table().row_count(),
            "archive opened"
        );

        Ok(Self {
            store,
            catalog,
            projector: Projector::new(config.placeholder.clone()),
            view_issues,
        })
    }

    /// All indexed names, sorted and distinct.
    pub fn names(&self) -> &[String] {
        self.store.names()
    }

    /// Names containing `keyword`; every name when it is absent or empty.
    pub fn search(&self, keyword: Option<&str>) -> Vec<&str> {
        filter_names(self.store.names(), keyword)
    }

    /// Record for an exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the name is not indexed.
    pub fn lookup(&self, name: &str) -> Result<&Record> {
        self.store.lookup(name)
    }

    /// Project one record through a view.
    pub fn project(&self, record: &Record, kind: ViewKind) -> ProjectedView {
        self.projector.project(record, &self.catalog, kind)
    }

    /// All three views of a person.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the name is not indexed.
    pub fn dossier(&self, name: &str) -> Result<Dossier> {
        let record = self.lookup(name)?;
        Ok(Dossier {
            name: name.to_string(),
            basic: self.project(record, ViewKind::Basic),
            work: self.project(record, ViewKind::Work),
            full: self.project(record, ViewKind::Full),
        })
    }

    /// Apply one interaction and compute the next screen.
    ///
    /// A selection that no longer resolves (for example after the source
    /// was reloaded without that person) is cleared and reported through
    /// [`Screen::notice`].
    pub fn step(&self, state: SessionState, action: Action) -> Screen<'_> {
        let mut state = state;
        match action {
            Action::Search(keyword) => {
                state.keyword = keyword.filter(|k| !k.is_empty());
            }
            Action::Select(name) => state.selected = Some(name),
            Action::ClearSelection => state.selected = None,
            Action::Refresh => {}
        }

        let names = self.search(state.keyword.as_deref());
        let resolved = state.selected.as_deref().map(|n| self.dossier(n));
        let (dossier, notice) = match resolved {
            None => (None, None),
            Some(Ok(dossier)) => (Some(dossier), None),
            Some(Err(err)) => {
                debug!(error = %err, "clearing stale selection");
                state.selected = None;
                (None, Some(err))
            }
        };

        Screen {
            state,
            names,
            total: self.store.len(),
            dossier,
            notice,
        }
    }

    /// The identity column in use.
    pub fn identity_column(&self) -> &str {
        self.store.identity_column()
    }

    /// View columns missing from the schema (non-strict mode).
    pub fn view_issues(&self) -> &[ViewIssue] {
        &self.view_issues
    }

    /// Identities that appeared on more than one row.
    pub fn duplicates(&self) -> &[String] {
        self.store.duplicates()
    }

    /// The static view catalog in use.
    pub fn catalog(&self) -> &ViewCatalog {
        &self.catalog
    }

    /// The underlying snapshot.
    pub fn table(&self) -> &Arc<Table> {
        self.store.table()
    }
}
