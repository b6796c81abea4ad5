//! Session Factory
//!
//! Wires configuration to a row source, a loader and a session.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::{ExploreSession, SessionOptions};
use crate::config::{parse_assignment, Config, ConfigError, LoadedConfig};
use crate::domain::ports::DataSourceLoader;
use crate::domain::value_objects::DataSourceType;
use crate::error::EntityGResult;
use crate::infrastructure::{
    DelimitedLoader, DelimitedRowSource, RelationalLoader, SqliteRowSource,
};

/// Load the configuration and apply `--set key=value` overrides on top.
pub fn load_config(
    explicit: Option<&Path>,
    overrides: &[String],
) -> Result<LoadedConfig, ConfigError> {
    let mut loaded = Config::load_or_default(explicit)?;
    for assignment in overrides {
        let (key, value) = parse_assignment(assignment)?;
        loaded.config.set_option(&key, &value)?;
    }
    Ok(loaded)
}

/// CLI seed first, then `source.first_node_entry`.
pub fn resolve_seed(config: &Config, cli_seed: Option<&str>) -> Result<String, ConfigError> {
    cli_seed
        .or(config.source.first_node_entry.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingSeed)
}

pub fn session_options(config: &Config) -> SessionOptions {
    SessionOptions {
        max_nodes: config.graph.default_max_nodes,
        use_tool_tip: config.graph.use_tool_tip,
    }
}

/// Open the configured backing store and build the matching loader.
pub fn create_loader(config: &Config) -> EntityGResult<Box<dyn DataSourceLoader>> {
    let spec = config.loader_spec()?;
    let source_type = config.source_type();
    let path = config
        .data_path()
        .ok_or_else(|| ConfigError::MissingDataFile {
            source_type: source_type.to_string(),
            key: match source_type {
                DataSourceType::Database => "database.path".to_string(),
                DataSourceType::Csv => "csv.file_name".to_string(),
            },
        })?;

    let loader: Box<dyn DataSourceLoader> = match source_type {
        DataSourceType::Database => {
            let source = SqliteRowSource::open(path)?;
            Box::new(RelationalLoader::new(source, spec)?)
        }
        DataSourceType::Csv => {
            let source = DelimitedRowSource::open(path)?
                .with_delimiter(config.delimiter_byte()?)
                .with_header_row(config.csv.has_header_row)
                .with_column_names(spec.column_names().clone());
            Box::new(DelimitedLoader::new(source, spec)?)
        }
    };

    tracing::debug!(source_type = %source_type, path = %path.display(), "loader ready");
    Ok(loader)
}

/// Create an unstarted session for the configured source.
pub fn create_session(config: &Config) -> EntityGResult<ExploreSession> {
    let loader = create_loader(config)?;
    Ok(ExploreSession::new(loader, session_options(config)))
}

/// Create a session and load `seed` (or the configured first entry).
pub fn start_session(config: &Config, cli_seed: Option<&str>) -> EntityGResult<ExploreSession> {
    let seed = resolve_seed(config, cli_seed)?;
    let mut session = create_session(config)?;
    session.start(&seed)?;
    Ok(session)
}
