//! Identity index over a table snapshot.
//!
//! [`RecordStore`] is built once per snapshot and is read-only afterwards:
//! exact-match lookup by identity value and a sorted, deduplicated list of
//! every non-blank identity.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::resolver::resolve_identity_column;
use crate::table::{Record, Table, Value};

/// Name index and lookup table for one snapshot.
#[derive(Debug, Clone)]
pub struct RecordStore {
    table: Arc<Table>,
    identity_column: String,
    /// Identity value -> row index of its first occurrence.
    index: HashMap<String, usize>,
    /// Sorted, distinct identity values.
    names: Vec<String>,
    /// Identity values seen on more than one row.
    duplicates: Vec<String>,
}

impl RecordStore {
    /// Index `table` by the values of `identity_column`.
    ///
    /// Rows with a blank identity are skipped but stay in the snapshot.
    /// When an identity repeats, the first row keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if the table has no such column.
    pub fn build(table: Arc<Table>, identity_column: &str) -> Result<Self> {
        let position = table
            .columns()
            .position(identity_column)
            .ok_or_else(|| Error::column_not_found(identity_column))?;

        let mut index = HashMap::with_capacity(table.row_count());
        let mut duplicates = Vec::new();
        let mut skipped = 0_usize;

        for (row, record) in table.rows().iter().enumerate() {
            let Some(name) = record.value(position).and_then(Value::render) else {
                skipped += 1;
                continue;
            };

            match index.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(slot) => {
                    if !duplicates.contains(slot.key()) {
                        duplicates.push(slot.key().clone());
                    }
                }
            }
        }

        let mut names: Vec<String> = index.keys().cloned().collect();
        names.sort_unstable();
        duplicates.sort_unstable();

        if !duplicates.is_empty() {
            warn!(
                column = identity_column,
                count = duplicates.len(),
                "duplicate identities, keeping first occurrence"
            );
        }
        debug!(
            column = identity_column,
            names = names.len(),
            skipped,
            "built record index"
        );

        Ok(Self {
            table,
            identity_column: identity_column.to_string(),
            index,
            names,
            duplicates,
        })
    }

    /// Resolve the identity column with `keywords`, then index the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameColumnNotFound`] before any indexing happens if
    /// no column qualifies.
    pub fn from_table<K: AsRef<str>>(table: Arc<Table>, keywords: &[K]) -> Result<Self> {
        let column = resolve_identity_column(table.labels(), keywords)?.to_string();
        Self::build(table, &column)
    }

    /// Record for an exact identity value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no row carries this identity.
    pub fn lookup(&self, name: &str) -> Result<&Record> {
        self.index
            .get(name)
            .and_then(|&row| self.table.rows().get(row))
            .ok_or_else(|| Error::not_found(name))
    }

    /// Whether an identity is indexed.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All identities, sorted ascending and distinct.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of distinct identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no row had an identity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The column used as identity.
    #[inline]
    pub fn identity_column(&self) -> &str {
        &self.identity_column
    }

    /// Identities that appeared on more than one row, sorted.
    #[inline]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// The underlying snapshot.
    #[inline]
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }
}
