//! Data source type value object
//!
//! Selects which loader variant is constructed at setup time.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    /// Relational store (SQLite)
    #[default]
    #[serde(alias = "sqlite")]
    Database,
    /// Delimited text file
    #[serde(alias = "delimited")]
    Csv,
}

impl DataSourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceType::Database => "database",
            DataSourceType::Csv => "csv",
        }
    }
}

impl FromStr for DataSourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" | "sqlite" => Ok(DataSourceType::Database),
            "csv" | "delimited" => Ok(DataSourceType::Csv),
            other => Err(format!(
                "unknown data source type '{}' (expected 'database' or 'csv')",
                other
            )),
        }
    }
}

impl std::fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
