//! CSV Data Loader Module
//! Loads the volume file with encoding fallback and caches the result per path.

use super::encoding::TextEncoding;
use super::schema::{VolumeField, TONS_PER_UNIT};
use super::table::PortTable;
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rows scanned for schema inference
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Bytes are not valid {0}")]
    Decode(TextEncoding),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Parse decoded CSV text into a DataFrame.
pub fn parse_table(text: String) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()?;
    Ok(df)
}

/// Trim surrounding whitespace from every column name.
pub fn normalize_headers(df: DataFrame) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|column| {
            let name = column.name().as_str().trim().to_string();
            column.clone().with_name(name.into())
        })
        .collect();
    DataFrame::new(columns)
}

/// Add a `<name>_만톤` sibling for every volume column present.
/// Absent columns are skipped; a cell that is not a number fails the whole frame.
pub fn derive_unit_columns(df: DataFrame) -> PolarsResult<DataFrame> {
    let exprs: Vec<Expr> = VolumeField::ALL
        .iter()
        .filter(|field| df.column(field.source_column()).is_ok())
        .map(|field| {
            (col(field.source_column()).strict_cast(DataType::Float64) / lit(TONS_PER_UNIT))
                .alias(field.derived_column())
        })
        .collect();

    if exprs.is_empty() {
        return Ok(df);
    }

    df.lazy().with_columns(exprs).collect()
}

/// Decode and parse the bytes under a single encoding.
fn load_with_encoding(bytes: &[u8], encoding: TextEncoding) -> Result<DataFrame, LoaderError> {
    let text = encoding
        .decode(bytes)
        .ok_or(LoaderError::Decode(encoding))?;
    let df = parse_table(text)?;
    let df = normalize_headers(df)?;
    Ok(derive_unit_columns(df)?)
}

/// Try each encoding in order and keep the first that parses.
pub fn try_load_table(path: &Path, encodings: &[TextEncoding]) -> Result<PortTable, LoaderError> {
    let bytes = std::fs::read(path)?;

    for &encoding in encodings {
        match load_with_encoding(&bytes, encoding) {
            Ok(df) => {
                info!(
                    path = %path.display(),
                    %encoding,
                    rows = df.height(),
                    columns = df.width(),
                    "loaded volume table"
                );
                return Ok(PortTable::new(df, encoding, path));
            }
            Err(e) => {
                debug!(path = %path.display(), %encoding, error = %e, "encoding attempt failed");
            }
        }
    }

    Err(LoaderError::NoData)
}

/// Load the table, or `None` when the file is unreadable under every encoding.
pub fn load_table(path: &Path, encodings: &[TextEncoding]) -> Option<PortTable> {
    match try_load_table(path, encodings) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "no data could be loaded");
            None
        }
    }
}

/// Memoized loads keyed by path. Failed loads are cached too.
pub struct LoadCache {
    encodings: Vec<TextEncoding>,
    entries: HashMap<PathBuf, Option<Arc<PortTable>>>,
}

impl Default for LoadCache {
    fn default() -> Self {
        Self::new(TextEncoding::DEFAULT_ORDER.to_vec())
    }
}

impl LoadCache {
    pub fn new(encodings: Vec<TextEncoding>) -> Self {
        Self {
            encodings,
            entries: HashMap::new(),
        }
    }

    /// Return the cached table for `path`, loading it on first request.
    pub fn get_or_load(&mut self, path: &Path) -> Option<Arc<PortTable>> {
        if let Some(entry) = self.entries.get(path) {
            debug!(path = %path.display(), hit = entry.is_some(), "load cache hit");
            return entry.clone();
        }

        let entry = load_table(path, &self.encodings).map(Arc::new);
        self.entries.insert(path.to_path_buf(), entry.clone());
        entry
    }

    /// Drop the cached entry so the next request re-reads the file.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every cached entry, failed loads included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
