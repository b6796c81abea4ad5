//! RowSource port - abstraction over the backing store
//!
//! Given a filter column and value, a row source returns the matching records.
//! Loaders only depend on this contract; the SQLite and delimited-file
//! backends live in the infrastructure layer.

use std::path::PathBuf;

use crate::domain::value_objects::ColumnRef;

/// Result type for row source operations
pub type RowSourceResult<T> = Result<T, RowSourceError>;

#[derive(Debug, thiserror::Error)]
pub enum RowSourceError {
    #[error("data file not found: {0}\n  → Fix: Check `database.path` / `csv.file_name` in entityg.toml")]
    NotFound(PathBuf),

    #[error("data source is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("filter on {column} is not supported by this source: {reason}")]
    UnsupportedFilter { column: String, reason: String },

    #[error("query failed: {0}")]
    Query(String),

    #[error("malformed data file {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single equality filter, optionally appended to a base statement.
#[derive(Debug, Clone, Copy)]
pub struct RowFilter<'a> {
    pub base: Option<&'a str>,
    pub column: &'a ColumnRef,
    pub value: &'a str,
}

impl<'a> RowFilter<'a> {
    pub fn new(column: &'a ColumnRef, value: &'a str) -> Self {
        Self {
            base: None,
            column,
            value,
        }
    }

    pub fn with_base(mut self, base: &'a str) -> Self {
        self.base = Some(base);
        self
    }
}

/// One record returned by a row source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    headers: Vec<String>,
    values: Vec<Option<String>>,
}

impl Row {
    /// Build a row; null-like values (`None`, empty, `"null"`) are normalized to `None`.
    pub fn new(headers: Vec<String>, values: Vec<Option<String>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|s| !is_null_value(s)))
            .collect();
        Self { headers, values }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Exact header match first, then ASCII case-insensitive.
    pub fn get_by_header(&self, header: &str) -> Option<&str> {
        let index = self
            .headers
            .iter()
            .position(|h| h == header)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(header))
            })?;
        self.get_by_position(index)
    }

    /// Zero-based.
    pub fn get_by_position(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    pub fn get(&self, column: &ColumnRef) -> Option<&str> {
        match column {
            ColumnRef::Name(name) => self.get_by_header(name),
            ColumnRef::Number(index) => self.get_by_position(*index),
        }
    }
}

/// Whether a raw field counts as null: empty, or the literal `null` in any case.
pub fn is_null_value(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
}

pub trait RowSource {
    /// Human-readable description used in logs, e.g. the file path.
    fn describe(&self) -> String;

    /// All rows whose filter column equals the filter value, in source order.
    fn query(&mut self, filter: &RowFilter<'_>) -> RowSourceResult<Vec<Row>>;
}
