//! Table loading from CSV and Parquet sources.
//!
//! The indexing core only consumes [`Table`]s; this module is the thin
//! ingestion layer that turns files on disk into that shape.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::{DataType, Field, Schema};
use arrow_csv::{reader::Format, ReaderBuilder};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Table, TableKey};
use crate::error::{Error, Result};

/// Number of rows sampled for CSV schema inference.
const INFER_SAMPLE_ROWS: usize = 1000;

/// Source of table snapshots.
pub trait TableLoader: Send + Sync {
    /// Read the table identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded.
    fn load(&self, key: &TableKey) -> Result<Table>;
}

/// Options for CSV parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row.
    pub has_header: bool,
    /// Delimiter character (default is comma, or tab for `.tsv`).
    pub delimiter: Option<char>,
    /// Batch size for reading.
    pub batch_size: usize,
    /// Infer numeric column types instead of reading every cell as text.
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            batch_size: 8192,
            infer_types: false,
        }
    }
}

impl CsvOptions {
    /// Creates new CSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the file has a header row.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Sets whether numeric types are inferred.
    #[must_use]
    pub fn with_infer_types(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }

    fn delimiter_byte(&self) -> Result<Option<u8>> {
        self.delimiter
            .map(|c| {
                u8::try_from(c)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| Error::invalid_config(format!("delimiter {c:?} is not ASCII")))
            })
            .transpose()
    }
}

/// Loads tables from CSV, TSV and Parquet files.
///
/// A directory source holds one file per sheet: the key
/// `(dir, Some("档案清单"))` reads `dir/档案清单.csv` (or `.tsv`, `.parquet`).
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    csv: CsvOptions,
}

impl FileLoader {
    /// Create a loader with the given CSV options.
    pub fn new(csv: CsvOptions) -> Self {
        Self { csv }
    }

    /// Resolve a key to the file that holds its table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SheetNotFound`] if a directory source has no file
    /// for the sheet, and [`Error::InvalidConfig`] if a sheet is requested
    /// from a plain file.
    pub fn resolve(&self, key: &TableKey) -> Result<PathBuf> {
        let source = &key.source;
        match (&key.sheet, source.is_dir()) {
            (None, false) => Ok(source.clone()),
            (Some(sheet), true) => ["csv", "tsv", "parquet"]
                .iter()
                .map(|ext| source.join(format!("{sheet}.{ext}")))
                .find(|p| p.is_file())
                .ok_or_else(|| Error::SheetNotFound {
                    path: source.clone(),
                    sheet: Some(sheet.clone()),
                }),
            (None, true) => Err(Error::SheetNotFound {
                path: source.clone(),
                sheet: None,
            }),
            (Some(sheet), false) => Err(Error::invalid_config(format!(
                "sheet '{sheet}' requested but {} is not a directory",
                source.display()
            ))),
        }
    }

    fn load_path(&self, path: &Path) -> Result<Table> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => {
                let file = File::open(path).map_err(|e| Error::io(e, path))?;
                read_csv(BufReader::new(file), &self.csv)
            }
            "tsv" => {
                let file = File::open(path).map_err(|e| Error::io(e, path))?;
                let options = CsvOptions {
                    delimiter: Some(self.csv.delimiter.unwrap_or('\t')),
                    ..self.csv.clone()
                };
                read_csv(BufReader::new(file), &options)
            }
            "parquet" | "pq" => {
                let file = File::open(path).map_err(|e| Error::io(e, path))?;
                read_parquet(file)
            }
            other => Err(Error::unsupported_format(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

impl TableLoader for FileLoader {
    fn load(&self, key: &TableKey) -> Result<Table> {
        let path = self.resolve(key)?;
        let table = self.load_path(&path)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }
}

impl Table {
    /// Parse a table from in-memory CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid CSV or has no header.
    pub fn from_csv_str(data: &str, options: &CsvOptions) -> Result<Self> {
        read_csv(Cursor::new(data.as_bytes()), options)
    }

    /// Read a table from a CSV or Parquet file, choosing by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its format is not
    /// supported.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        FileLoader::default().load_path(path.as_ref())
    }
}

fn read_csv<R: Read + Seek>(mut reader: R, options: &CsvOptions) -> Result<Table> {
    let delimiter = options.delimiter_byte()?;

    // Short rows are accepted; their missing trailing cells read as null.
    let mut format = Format::default()
        .with_header(options.has_header)
        .with_truncated_rows(true);
    if let Some(delim) = delimiter {
        format = format.with_delimiter(delim);
    }
    let (inferred, _) = format.infer_schema(&mut reader, Some(INFER_SAMPLE_ROWS))?;
    reader
        .seek(SeekFrom::Start(0))
        .map_err(Error::io_no_path)?;

    let labels = header_labels(inferred.fields().iter().map(|f| f.name().as_str()));
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .zip(labels)
        .map(|(f, label)| {
            // Without type inference every column is text so "1975.10" stays "1975.10".
            let data_type = if options.infer_types {
                f.data_type().clone()
            } else {
                DataType::Utf8
            };
            Field::new(label, data_type, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));
    debug!(columns = schema.fields().len(), "csv schema");

    let mut builder = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(options.has_header)
        .with_batch_size(options.batch_size.max(1))
        .with_truncated_rows(true);
    if let Some(delim) = delimiter {
        builder = builder.with_delimiter(delim);
    }

    let batches: Vec<RecordBatch> = builder
        .build(reader)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Table::from_batches(&schema, &batches)
}

/// Make header labels usable as column keys.
///
/// A blank header becomes `Unnamed: {i}` (0-based position) and a repeated
/// one gets `.1`, `.2`, ... appended, skipping labels already taken.
fn header_labels<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut labels = Vec::new();
    for (i, name) in names.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            name.to_string()
        };
        let mut label = base.clone();
        let mut n = 0;
        while taken.contains(&label) {
            n += 1;
            label = format!("{base}.{n}");
        }
        if label != name {
            debug!(column = i, header = name, label = %label, "renamed csv header");
        }
        taken.insert(label.clone());
        labels.push(label);
    }
    labels
}

fn read_parquet(file: File) -> Result<Table> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = Arc::clone(builder.schema());
    let batches: Vec<RecordBatch> = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Table::from_batches(&schema, &batches)
}
