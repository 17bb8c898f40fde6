//! Immutable table snapshots.
//!
//! A [`Table`] is the already-tabular shape handed to the indexing core:
//! an ordered list of distinct column labels plus an ordered list of
//! [`Record`]s. Snapshots are never mutated after construction; they are
//! shared as `Arc<Table>` between the cache, the record store and every
//! projected view.
//!
//! # Example
//!
//! ```
//! use dossier::table::{Table, Value};
//!
//! let table = Table::new(
//!     vec!["姓名".to_string(), "性别".to_string()],
//!     vec![vec![Value::from("Li Hua"), Value::from("F")]],
//! )
//! .unwrap();
//!
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.rows()[0].get("性别"), Some(&Value::from("F")));
//! ```

mod loader;
mod value;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;

pub use loader::{CsvOptions, FileLoader, TableLoader};
pub use value::{value_at, Value};

use crate::error::{Error, Result};

/// Identity of a snapshot: the source it came from and the sheet within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    /// File or directory the table is read from.
    pub source: PathBuf,
    /// Sheet within the source, if the source holds several.
    pub sheet: Option<String>,
}

impl TableKey {
    /// Key for a single-table source.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            sheet: None,
        }
    }

    /// Select a sheet within the source.
    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
}

/// Ordered, distinct column labels with O(1) label lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Columns {
    /// Build a column schema, rejecting repeated labels.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if positions.insert(label.clone(), i).is_some() {
                return Err(Error::DuplicateColumn {
                    name: label.clone(),
                });
            }
        }
        Ok(Self { labels, positions })
    }

    /// Labels in schema order.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Position of a label.
    #[inline]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Whether the schema has a column with this label.
    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.positions.contains_key(label)
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the schema is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One row's fields keyed by column label.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<Columns>,
    values: Vec<Value>,
}

impl Record {
    /// Value of a column, or `None` when the schema has no such column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .position(column)
            .and_then(|i| self.values.get(i))
    }

    /// Value at a column position.
    #[inline]
    pub fn value(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Display string of a column's value, or `None` if absent or blank.
    pub fn rendered(&self, column: &str) -> Option<String> {
        self.get(column).and_then(Value::render)
    }

    /// Fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .labels()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// The schema this record belongs to.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }
}

/// Immutable snapshot of a loaded table.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Arc<Columns>,
    rows: Vec<Record>,
}

impl Table {
    /// Build a table from column labels and row values.
    ///
    /// Short rows are padded with [`Value::Empty`]; surplus values are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTable`] when there are no columns and
    /// [`Error::DuplicateColumn`] when a label repeats.
    pub fn new(labels: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::EmptyTable);
        }
        let columns = Arc::new(Columns::new(labels)?);
        let width = columns.len();

        let rows = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, Value::Empty);
                Record {
                    columns: Arc::clone(&columns),
                    values,
                }
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Build a table from Arrow record batches.
    ///
    /// # Errors
    ///
    /// Fails on duplicate or missing columns, or when a cell cannot be
    /// rendered.
    pub fn from_batches(schema: &SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let labels: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
        let total_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();

        let mut rows = Vec::with_capacity(total_rows);
        for batch in batches {
            for row in 0..batch.num_rows() {
                let values = batch
                    .columns()
                    .iter()
                    .map(|array| value_at(array.as_ref(), row))
                    .collect::<Result<Vec<_>>>()?;
                rows.push(values);
            }
        }

        Self::new(labels, rows)
    }

    /// The column schema.
    #[inline]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Column labels in schema order.
    #[inline]
    pub fn labels(&self) -> &[String] {
        self.columns.labels()
    }

    /// All rows, including rows without an identity value.
    #[inline]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
