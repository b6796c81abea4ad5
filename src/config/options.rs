//! Flat option table
//!
//! Every option the tool understands as a plain `key=value` string, mapped
//! to a typed setter. Environment overrides and `--set` both go through
//! [`apply_option`].

use std::path::PathBuf;

use crate::domain::value_objects::DataSourceType;

use super::loader::closest;
use super::types::{ColumnMapping, Config};
use super::ConfigError;

type Setter = fn(&mut Config, &str) -> Result<(), ConfigError>;

pub static OPTION_SETTERS: &[(&str, Setter)] = &[
    ("datasource_type", set_datasource_type),
    ("first_node_entry", set_first_node_entry),
    ("default_max_nodes", set_default_max_nodes),
    ("use_tool_tip", set_use_tool_tip),
    ("database_path", set_database_path),
    ("base_query", set_base_query),
    ("base_column_name", set_base_column_name),
    ("children_columns", set_children_columns),
    ("file_name", set_file_name),
    ("delimiter", set_delimiter),
    ("has_header_row", set_has_header_row),
    ("center_node_column_number", set_center_node_column_number),
    ("center_node_column_name", set_center_node_column_name),
    ("information_node_column_numbers", set_information_node_column_numbers),
    ("column_to_name_mapping", set_column_to_name_mapping),
];

/// Older option names that map onto a current one.
const ALIASES: &[(&str, &str)] = &[("database_name", "database_path")];

/// Connection options for networked databases, which are not supported.
const UNSUPPORTED: &[&str] = &["host", "port", "user", "password"];

pub fn option_keys() -> impl Iterator<Item = &'static str> {
    OPTION_SETTERS.iter().map(|(key, _)| *key)
}

pub fn apply_option(config: &mut Config, key: &str, value: &str) -> Result<(), ConfigError> {
    let normalized = key.trim().to_ascii_lowercase();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map_or(normalized.as_str(), |(_, target)| *target);

    if UNSUPPORTED.contains(&canonical) {
        return Err(ConfigError::Unsupported {
            key: canonical.to_string(),
        });
    }

    let (_, setter) = OPTION_SETTERS
        .iter()
        .find(|(name, _)| *name == canonical)
        .ok_or_else(|| ConfigError::UnknownOption {
            key: key.to_string(),
            suggestion: closest(canonical, option_keys()),
        })?;
    setter(config, value.trim())
}

/// Split a `key=value` assignment as passed to `--set`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidAssignment(raw.to_string())),
    }
}

fn invalid(key: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(key, value, "expected a non-negative integer"))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn set_datasource_type(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.source.source_type = value
        .parse::<DataSourceType>()
        .map_err(|reason| invalid("datasource_type", value, reason))?;
    Ok(())
}

fn set_first_node_entry(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.source.first_node_entry = non_empty(value);
    Ok(())
}

fn set_default_max_nodes(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.graph.default_max_nodes = parse_usize("default_max_nodes", value)?;
    Ok(())
}

fn set_use_tool_tip(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.graph.use_tool_tip = parse_bool("use_tool_tip", value)?;
    Ok(())
}

fn set_database_path(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.database.path = non_empty(value).map(PathBuf::from);
    Ok(())
}

fn set_base_query(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.database.base_query = non_empty(value);
    Ok(())
}

fn set_base_column_name(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.database.base_column_name = non_empty(value);
    Ok(())
}

fn set_children_columns(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.database.children_columns = split_list(value).map(String::from).collect();
    Ok(())
}

fn set_file_name(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.csv.file_name = non_empty(value).map(PathBuf::from);
    Ok(())
}

fn set_delimiter(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    config.csv.delimiter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ if value.eq_ignore_ascii_case("tab") || value == "\\t" => '\t',
        _ => return Err(invalid("delimiter", value, "expected a single character")),
    };
    Ok(())
}

fn set_has_header_row(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.csv.has_header_row = parse_bool("has_header_row", value)?;
    Ok(())
}

fn set_center_node_column_number(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.csv.center_node_column_number = if value.is_empty() {
        None
    } else {
        Some(parse_usize("center_node_column_number", value)?)
    };
    Ok(())
}

fn set_center_node_column_name(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    config.csv.center_node_column_name = non_empty(value);
    Ok(())
}

fn set_information_node_column_numbers(
    config: &mut Config,
    value: &str,
) -> Result<(), ConfigError> {
    config.csv.information_node_column_numbers = split_list(value)
        .map(|n| parse_usize("information_node_column_numbers", n))
        .collect::<Result<_, _>>()?;
    Ok(())
}

fn set_column_to_name_mapping(config: &mut Config, value: &str) -> Result<(), ConfigError> {
    // Positional: an empty slot still occupies its column number.
    config.csv.column_to_name_mapping =
        ColumnMapping::List(value.split(',').map(|s| s.trim().to_string()).collect());
    Ok(())
}
