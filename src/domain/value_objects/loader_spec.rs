//! Loader specification value object
//!
//! Everything a data source loader needs before it can answer queries:
//! the filter template, the center column, the ordered attribute columns,
//! and the column position → header name mapping. Built once at setup
//! and immutable afterward.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DataSourceType;
use crate::domain::ports::SetupError;

/// A column addressed by header name or by zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Number(usize),
    Name(String),
}

impl ColumnRef {
    pub fn name(name: impl Into<String>) -> Self {
        ColumnRef::Name(name.into())
    }

    pub fn number(index: usize) -> Self {
        ColumnRef::Number(index)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => f.write_str(name),
            ColumnRef::Number(index) => write!(f, "#{}", index),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(value: &str) -> Self {
        ColumnRef::Name(value.to_string())
    }
}

impl From<usize> for ColumnRef {
    fn from(value: usize) -> Self {
        ColumnRef::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderSpec {
    filter_template: Option<String>,
    center_column: Option<ColumnRef>,
    information_columns: Vec<ColumnRef>,
    column_names: BTreeMap<usize, String>,
}

impl LoaderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base statement the filter clause is appended to (relational only).
    pub fn with_filter_template(mut self, template: impl Into<String>) -> Self {
        self.filter_template = Some(template.into());
        self
    }

    pub fn with_center_column(mut self, column: impl Into<ColumnRef>) -> Self {
        self.center_column = Some(column.into());
        self
    }

    pub fn with_information_columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnRef>,
    {
        self.information_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_column_name(mut self, index: usize, name: impl Into<String>) -> Self {
        self.column_names.insert(index, name.into());
        self
    }

    pub fn with_column_names(mut self, names: BTreeMap<usize, String>) -> Self {
        self.column_names = names;
        self
    }

    pub fn filter_template(&self) -> Option<&str> {
        self.filter_template.as_deref()
    }

    pub fn center_column(&self) -> Option<&ColumnRef> {
        self.center_column.as_ref()
    }

    pub fn information_columns(&self) -> &[ColumnRef] {
        &self.information_columns
    }

    pub fn column_names(&self) -> &BTreeMap<usize, String> {
        &self.column_names
    }

    /// Display header for a column: the mapped name for numbers, the name itself otherwise.
    pub fn header_for(&self, column: &ColumnRef) -> Option<String> {
        match column {
            ColumnRef::Name(name) => Some(name.clone()),
            ColumnRef::Number(index) => self.column_names.get(index).cloned(),
        }
    }

    /// Find the configured column whose header matches `header` (case-insensitive).
    pub fn column_for_header(&self, header: &str) -> Option<ColumnRef> {
        let matches = |column: &ColumnRef| {
            self.header_for(column)
                .is_some_and(|h| h.eq_ignore_ascii_case(header))
        };
        if let Some(center) = self.center_column.as_ref().filter(|c| matches(c)) {
            return Some(center.clone());
        }
        if let Some(info) = self.information_columns.iter().find(|c| matches(c)) {
            return Some(info.clone());
        }
        self.column_names
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(header))
            .map(|(index, _)| ColumnRef::Number(*index))
    }

    /// Check that everything the given loader variant needs is present.
    pub fn validate_for(&self, source: DataSourceType) -> Result<(), SetupError> {
        if source == DataSourceType::Database
            && self
                .filter_template
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
        {
            return Err(SetupError::MissingFilterTemplate);
        }

        let center = self
            .center_column
            .as_ref()
            .filter(|c| !matches!(c, ColumnRef::Name(n) if n.trim().is_empty()))
            .ok_or(SetupError::MissingCenterColumn)?;

        if self.information_columns.is_empty() {
            return Err(SetupError::MissingInformationColumns);
        }

        match source {
            DataSourceType::Database => {
                for column in std::iter::once(center).chain(&self.information_columns) {
                    if self.header_for(column).is_none() {
                        return Err(SetupError::UnmappedColumn {
                            column: column.to_string(),
                        });
                    }
                }
            }
            DataSourceType::Csv => {
                if self.column_names.is_empty() {
                    return Err(SetupError::MissingColumnMapping);
                }
                for column in std::iter::once(center).chain(&self.information_columns) {
                    match column {
                        ColumnRef::Number(index) if !self.column_names.contains_key(index) => {
                            return Err(SetupError::UnmappedColumn {
                                column: column.to_string(),
                            });
                        }
                        ColumnRef::Name(name)
                            if !self
                                .column_names
                                .values()
                                .any(|n| n.eq_ignore_ascii_case(name)) =>
                        {
                            return Err(SetupError::UnmappedColumn {
                                column: column.to_string(),
                            });
                        }
                        _ => {}
                    }
                }
            }
        }

        Ok(())
    }
}
