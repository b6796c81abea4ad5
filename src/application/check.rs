//! Check Use Case
//!
//! Validates a loaded configuration without touching the backing store's
//! contents. Covers the file it came from and its unknown keys, the column
//! setup for the active source type, the data file and the starting entity.

use serde::Serialize;

use crate::config::{Config, LoadedConfig};
use crate::domain::value_objects::DataSourceType;

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    /// Name of the check
    pub name: String,
    pub status: CheckStatus,
    /// Human-readable message
    pub message: String,
    /// Recommendation for fixing issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckItem {
    fn pass(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            message: message.into(),
            recommendation: None,
            details: Vec::new(),
        }
    }

    fn warning(name: &str, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            ..Self::pass(name, message)
        }
    }

    fn error(name: &str, message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            ..Self::pass(name, message)
        }
    }

    fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

/// Result of the check operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub items: Vec<CheckItem>,
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl CheckResult {
    /// No errors
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    /// No errors and no warnings
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.warnings == 0
    }

    fn push(&mut self, item: CheckItem) {
        match item.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warning => self.warnings += 1,
            CheckStatus::Error => self.errors += 1,
        }
        self.items.push(item);
    }
}

pub struct CheckUseCase<'a> {
    loaded: &'a LoadedConfig,
}

impl<'a> CheckUseCase<'a> {
    pub fn new(loaded: &'a LoadedConfig) -> Self {
        Self { loaded }
    }

    pub fn execute(&self) -> CheckResult {
        self.execute_with_callback(|_| {})
    }

    /// Execute with a callback for each check (for streaming output)
    pub fn execute_with_callback<F>(&self, mut on_check: F) -> CheckResult
    where
        F: FnMut(&CheckItem),
    {
        let config = &self.loaded.config;
        let mut result = CheckResult::default();

        let items = [
            self.check_config_file(),
            check_loader_spec(config),
            check_data_file(config),
            check_delimiter(config),
            check_seed(config),
            check_max_nodes(config),
        ];

        for item in items.into_iter().flatten() {
            on_check(&item);
            result.push(item);
        }

        result
    }

    fn check_config_file(&self) -> Option<CheckItem> {
        let loaded = self.loaded;
        let source = loaded
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string());

        let item = if loaded.warnings.is_empty() {
            CheckItem::pass("config", format!("loaded from {source}"))
        } else {
            CheckItem::warning(
                "config",
                format!("{} unknown key(s) in {source}", loaded.warnings.len()),
            )
            .with_recommendation("Remove or rename the keys listed below")
            .with_details(loaded.warnings.iter().map(|w| w.to_string()).collect())
        };
        Some(item)
    }
}

fn check_loader_spec(config: &Config) -> Option<CheckItem> {
    let source_type = config.source_type();
    let item = match config.loader_spec() {
        Err(err) => CheckItem::error("loader", err.to_string()),
        Ok(spec) => match spec.validate_for(source_type) {
            Ok(()) => CheckItem::pass(
                "loader",
                format!(
                    "{source_type} loader with {} information column(s)",
                    spec.information_columns().len()
                ),
            ),
            Err(err) => {
                let text = err.to_string();
                let (message, fix) = split_fix(&text);
                let item = CheckItem::error("loader", message);
                match fix {
                    Some(fix) => item.with_recommendation(fix),
                    None => item,
                }
            }
        },
    };
    Some(item)
}

fn check_data_file(config: &Config) -> Option<CheckItem> {
    let key = match config.source_type() {
        DataSourceType::Database => "database.path",
        DataSourceType::Csv => "csv.file_name",
    };
    let item = match config.data_path() {
        None => CheckItem::error("data file", "no data file configured")
            .with_recommendation(format!("Set `{key}`")),
        Some(path) if path.is_file() => {
            CheckItem::pass("data file", path.display().to_string())
        }
        Some(path) if path.exists() => {
            CheckItem::error("data file", format!("{} is not a file", path.display()))
        }
        Some(path) => CheckItem::error("data file", format!("{} does not exist", path.display()))
            .with_recommendation(format!("Fix `{key}` or create the file")),
    };
    Some(item)
}

fn check_delimiter(config: &Config) -> Option<CheckItem> {
    if config.source_type() != DataSourceType::Csv {
        return None;
    }
    let item = match config.delimiter_byte() {
        Ok(_) => CheckItem::pass("delimiter", format!("{:?}", config.csv.delimiter)),
        Err(err) => CheckItem::error("delimiter", err.to_string()),
    };
    Some(item)
}

fn check_seed(config: &Config) -> Option<CheckItem> {
    let item = match config.source.first_node_entry.as_deref().map(str::trim) {
        Some(seed) if !seed.is_empty() => CheckItem::pass("seed", format!("starts at '{seed}'")),
        _ => CheckItem::warning("seed", "no starting entity configured")
            .with_recommendation("Set `source.first_node_entry` or pass --seed"),
    };
    Some(item)
}

fn check_max_nodes(config: &Config) -> Option<CheckItem> {
    let max = config.graph.default_max_nodes;
    let item = if max == 0 {
        CheckItem::warning("max nodes", "0: expanding an attribute will never add entities")
            .with_recommendation("Set `graph.default_max_nodes` to at least 1")
    } else {
        CheckItem::pass("max nodes", max.to_string())
    };
    Some(item)
}

/// Split an error's "→ Fix:" hint off its message.
fn split_fix(text: &str) -> (String, Option<String>) {
    match text.split_once("\n  → Fix: ") {
        Some((message, fix)) => (message.to_string(), Some(fix.to_string())),
        None => (text.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigWarning;
    use std::fs;

    fn loaded(config: Config) -> LoadedConfig {
        LoadedConfig {
            config,
            warnings: Vec::new(),
            path: None,
        }
    }

    fn statuses(result: &CheckResult) -> Vec<(&str, CheckStatus)> {
        result
            .items
            .iter()
            .map(|i| (i.name.as_str(), i.status))
            .collect()
    }

    #[test]
    fn defaults_fail_on_loader_and_data_file() {
        let loaded = loaded(Config::default());
        let result = CheckUseCase::new(&loaded).execute();

        assert!(!result.is_success());
        assert_eq!(
            statuses(&result),
            vec![
                ("config", CheckStatus::Pass),
                ("loader", CheckStatus::Error),
                ("data file", CheckStatus::Error),
                ("seed", CheckStatus::Warning),
                ("max nodes", CheckStatus::Pass),
            ]
        );
        let loader = &result.items[1];
        assert_eq!(loader.message, "no filter template configured");
        assert!(loader
            .recommendation
            .as_deref()
            .is_some_and(|r| r.contains("database.base_query")));
    }

    #[test]
    fn complete_csv_config_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("people.csv");
        fs::write(&data, "Alice,Dr.\n").unwrap();

        let mut config = Config::default();
        for (key, value) in [
            ("datasource_type", "csv"),
            ("file_name", data.to_str().unwrap()),
            ("center_node_column_number", "0"),
            ("information_node_column_numbers", "1"),
            ("column_to_name_mapping", "Name,Title"),
            ("first_node_entry", "Alice"),
        ] {
            config.set_option(key, value).unwrap();
        }

        let loaded = loaded(config);
        let result = CheckUseCase::new(&loaded).execute();
        assert!(result.is_clean(), "{:?}", result.items);
        assert_eq!(result.passed, 6);
    }

    #[test]
    fn warnings_are_listed_as_details() {
        let mut loaded = loaded(Config::default());
        loaded.warnings.push(ConfigWarning {
            key: "graph.max".to_string(),
            file: "entityg.toml".into(),
            line: Some(3),
            suggestion: None,
        });

        let mut seen = Vec::new();
        let result = CheckUseCase::new(&loaded).execute_with_callback(|item| {
            seen.push(item.name.clone());
        });

        assert_eq!(seen.len(), result.items.len());
        assert_eq!(result.items[0].status, CheckStatus::Warning);
        assert_eq!(result.items[0].details.len(), 1);
    }

    #[test]
    fn zero_max_nodes_warns() {
        let mut config = Config::default();
        config.graph.default_max_nodes = 0;
        let loaded = loaded(config);
        let result = CheckUseCase::new(&loaded).execute();
        let item = result.items.iter().find(|i| i.name == "max nodes").unwrap();
        assert_eq!(item.status, CheckStatus::Warning);
    }
}
