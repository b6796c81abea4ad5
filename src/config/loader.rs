//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use super::options::{apply_option, OPTION_SETTERS};
use super::types::Config;
use super::{ConfigError, ConfigWarning};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "entityg.toml";

/// Prefix for environment overrides, e.g. `ENTITYG_DEFAULT_MAX_NODES`
pub const ENV_PREFIX: &str = "ENTITYG_";

/// A configuration together with where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when built-in defaults were used
    pub path: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Relative data paths are resolved against the config file's directory.
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(&content, &leaf),
                suggestion: suggest_key(&leaf),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    if let Some(base) = path.parent() {
        resolve_relative(&mut config.database.path, base);
        resolve_relative(&mut config.csv.file_name, base);
    }

    Ok((config, warnings))
}

fn resolve_relative(target: &mut Option<PathBuf>, base: &Path) {
    if let Some(path) = target.as_mut() {
        if path.is_relative() && !base.as_os_str().is_empty() {
            *path = base.join(&*path);
        }
    }
}

/// Find the config file to use, if any.
///
/// An explicit path must exist; otherwise `./entityg.toml` and then the
/// user config directory are tried.
pub fn discover(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    if let Some(user) = user_config_path() {
        if user.is_file() {
            return Ok(Some(user));
        }
    }

    Ok(None)
}

/// `<config dir>/entityg/config.toml`, e.g. `~/.config/entityg/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("entityg").join("config.toml"))
}

/// Load from the discovered file or defaults, then apply env overrides.
pub fn load_or_default(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let loaded = match discover(explicit)? {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            tracing::debug!(path = %path.display(), warnings = warnings.len(), "loaded config");
            LoadedConfig {
                config,
                warnings,
                path: Some(path),
            }
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            LoadedConfig::default()
        }
    };

    Ok(LoadedConfig {
        config: with_env_overrides(loaded.config)?,
        ..loaded
    })
}

/// Apply environment variable overrides (ENTITYG_* prefix)
pub fn with_env_overrides(config: Config) -> Result<Config, ConfigError> {
    with_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides for every known option that `lookup` has a value for.
pub fn with_overrides_from<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (key, _) in OPTION_SETTERS {
        let var = format!("{}{}", ENV_PREFIX, key.to_ascii_uppercase());
        if let Some(value) = lookup(&var) {
            tracing::debug!(var = %var, "applying environment override");
            apply_option(&mut config, key, &value)?;
        }
    }
    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

const CONFIG_KEYS: &[&str] = &[
    "source",
    "type",
    "first_node_entry",
    "graph",
    "default_max_nodes",
    "use_tool_tip",
    "database",
    "path",
    "base_query",
    "base_column_name",
    "children_columns",
    "csv",
    "file_name",
    "delimiter",
    "has_header_row",
    "center_node_column_number",
    "center_node_column_name",
    "information_node_column_numbers",
    "column_to_name_mapping",
];

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    closest(unknown, CONFIG_KEYS.iter().copied())
}

/// Closest candidate within an edit distance of 2.
pub(crate) fn closest<'a, I>(unknown: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
