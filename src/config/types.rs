//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ColumnRef, DataSourceType, LoaderSpec};

use super::loader::{self, LoadedConfig};
use super::{ConfigError, ConfigWarning};

/// Which backing store to read and where exploration starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default, rename = "type")]
    pub source_type: DataSourceType,

    /// Seed value for the center column
    #[serde(default)]
    pub first_node_entry: Option<String>,
}

/// Graph behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Fan-out cap for center expansions
    #[serde(default = "default_max_nodes")]
    pub default_max_nodes: usize,

    #[serde(default)]
    pub use_tool_tip: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            default_max_nodes: default_max_nodes(),
            use_tool_tip: false,
        }
    }
}

fn default_max_nodes() -> usize {
    7
}

/// SQLite backing store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Statement the equality filter is appended to
    #[serde(default)]
    pub base_query: Option<String>,

    /// Center column name
    #[serde(default)]
    pub base_column_name: Option<String>,

    /// Attribute columns, in display order
    #[serde(default)]
    pub children_columns: Vec<String>,
}

/// Column position → header name, either positional or keyed.
///
/// ```toml
/// column_to_name_mapping = ["Name", "Title", "City"]
/// # or
/// column_to_name_mapping = { "0" = "Name", "2" = "City" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnMapping {
    List(Vec<String>),
    Table(BTreeMap<String, String>),
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping::List(Vec::new())
    }
}

impl ColumnMapping {
    pub fn is_empty(&self) -> bool {
        match self {
            ColumnMapping::List(names) => names.is_empty(),
            ColumnMapping::Table(names) => names.is_empty(),
        }
    }

    pub fn to_map(&self) -> Result<BTreeMap<usize, String>, ConfigError> {
        match self {
            ColumnMapping::List(names) => Ok(names
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.trim().is_empty())
                .map(|(i, name)| (i, name.trim().to_string()))
                .collect()),
            ColumnMapping::Table(names) => names
                .iter()
                .map(|(key, name)| {
                    key.trim()
                        .parse::<usize>()
                        .map(|index| (index, name.trim().to_string()))
                        .map_err(|_| ConfigError::InvalidValue {
                            key: "column_to_name_mapping".to_string(),
                            value: key.clone(),
                            reason: "keys must be column numbers".to_string(),
                        })
                })
                .collect(),
        }
    }
}

/// Delimited-file backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default)]
    pub file_name: Option<PathBuf>,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default)]
    pub has_header_row: bool,

    #[serde(default)]
    pub center_node_column_number: Option<usize>,

    /// Used when no column number is given
    #[serde(default)]
    pub center_node_column_name: Option<String>,

    #[serde(default)]
    pub information_node_column_numbers: Vec<usize>,

    #[serde(default)]
    pub column_to_name_mapping: ColumnMapping,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            file_name: None,
            delimiter: default_delimiter(),
            has_header_row: false,
            center_node_column_number: None,
            center_node_column_name: None,
            information_node_column_numbers: Vec::new(),
            column_to_name_mapping: ColumnMapping::default(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub csv: CsvConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit path, `./entityg.toml`, the user config, or defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (ENTITYG_* prefix)
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        loader::with_env_overrides(self)
    }

    /// Apply one `key=value` option through the setter table.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        super::options::apply_option(self, key, value)
    }

    pub fn source_type(&self) -> DataSourceType {
        self.source.source_type
    }

    /// The data file for the active source type.
    pub fn data_path(&self) -> Option<&Path> {
        match self.source.source_type {
            DataSourceType::Database => self.database.path.as_deref(),
            DataSourceType::Csv => self.csv.file_name.as_deref(),
        }
    }

    /// Delimiter as a single byte, as the CSV reader wants it.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        let c = self.csv.delimiter;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(ConfigError::InvalidValue {
                key: "delimiter".to_string(),
                value: c.to_string(),
                reason: "must be a single ASCII character".to_string(),
            })
        }
    }

    /// Translate the active source section into a `LoaderSpec`.
    pub fn loader_spec(&self) -> Result<LoaderSpec, ConfigError> {
        let spec = match self.source.source_type {
            DataSourceType::Database => {
                let db = &self.database;
                let mut spec = LoaderSpec::new()
                    .with_information_columns(db.children_columns.iter().map(|c| c.trim()));
                if let Some(query) = &db.base_query {
                    spec = spec.with_filter_template(query.clone());
                }
                if let Some(column) = &db.base_column_name {
                    spec = spec.with_center_column(column.trim());
                }
                spec
            }
            DataSourceType::Csv => {
                let csv = &self.csv;
                let mut spec = LoaderSpec::new()
                    .with_information_columns(csv.information_node_column_numbers.iter().copied())
                    .with_column_names(csv.column_to_name_mapping.to_map()?);
                if let Some(number) = csv.center_node_column_number {
                    spec = spec.with_center_column(number);
                } else if let Some(name) = &csv.center_node_column_name {
                    spec = spec.with_center_column(ColumnRef::name(name.trim()));
                }
                spec
            }
        };
        Ok(spec)
    }
}
