//! Delimited-file row source
//!
//! Linear scan over a small CSV-like file. Every query rewinds to the start
//! of the file, so repeated expansions always see the file's current
//! contents. Headers come from the column→name mapping, falling back to the
//! file's header row when it has one.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::ports::{Row, RowFilter, RowSource, RowSourceError, RowSourceResult};
use crate::domain::value_objects::ColumnRef;

#[derive(Debug, Clone)]
pub struct DelimitedRowSource {
    path: PathBuf,
    delimiter: u8,
    has_header_row: bool,
    column_names: BTreeMap<usize, String>,
}

impl DelimitedRowSource {
    pub fn open(path: impl AsRef<Path>) -> RowSourceResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RowSourceError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(RowSourceError::NotAFile(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b',',
            has_header_row: false,
            column_names: BTreeMap::new(),
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header_row(mut self, has_header_row: bool) -> Self {
        self.has_header_row = has_header_row;
        self
    }

    pub fn with_column_names(mut self, names: BTreeMap<usize, String>) -> Self {
        self.column_names = names;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reopen the file positioned at its first record.
    fn rewind(&self) -> RowSourceResult<csv::Reader<File>> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.malformed(e))
    }

    fn malformed(&self, err: csv::Error) -> RowSourceError {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => RowSourceError::Io(io),
            other => RowSourceError::Malformed {
                path: self.path.clone(),
                message: format!("{:?}", other),
            },
        }
    }

    fn headers(&self, file_headers: &[String], width: usize) -> Vec<String> {
        let width = width
            .max(file_headers.len())
            .max(self.column_names.keys().next_back().map_or(0, |k| k + 1));
        (0..width)
            .map(|i| {
                self.column_names
                    .get(&i)
                    .cloned()
                    .or_else(|| file_headers.get(i).cloned())
                    .unwrap_or_else(|| format!("column{}", i))
            })
            .collect()
    }

    fn resolve_column(&self, column: &ColumnRef, headers: &[String]) -> RowSourceResult<usize> {
        match column {
            ColumnRef::Number(index) => Ok(*index),
            ColumnRef::Name(name) => headers
                .iter()
                .position(|h| h == name)
                .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
                .ok_or_else(|| RowSourceError::UnsupportedFilter {
                    column: name.clone(),
                    reason: format!("no such column in {}", self.path.display()),
                }),
        }
    }
}

impl RowSource for DelimitedRowSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn query(&mut self, filter: &RowFilter<'_>) -> RowSourceResult<Vec<Row>> {
        let mut reader = self.rewind()?;
        let mut records = reader.records();

        let file_headers: Vec<String> = if self.has_header_row {
            match records.next() {
                Some(record) => record
                    .map_err(|e| self.malformed(e))?
                    .iter()
                    .map(String::from)
                    .collect(),
                None => return Ok(Vec::new()),
            }
        } else {
            Vec::new()
        };

        let headers = self.headers(&file_headers, 0);
        let index = self.resolve_column(filter.column, &headers)?;
        tracing::debug!(
            file = %self.path.display(),
            column = %filter.column,
            index,
            value = filter.value,
            "delimited scan"
        );

        let mut out = Vec::new();
        for record in records {
            let record = record.map_err(|e| self.malformed(e))?;
            if record.get(index) != Some(filter.value) {
                continue;
            }
            let values: Vec<Option<String>> = record.iter().map(|f| Some(f.to_string())).collect();
            let headers = if values.len() > headers.len() {
                self.headers(&file_headers, values.len())
            } else {
                headers.clone()
            };
            out.push(Row::new(headers, values));
        }
        Ok(out)
    }
}
