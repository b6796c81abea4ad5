//! EntityG - incremental entity-relationship graph explorer
//!
//! EntityG starts from one entity in a table (a SQLite database or a
//! delimited file), shows it with its attribute values, and grows the graph
//! on demand: expanding an attribute brings in the other entities that share
//! it, and expanding an entity brings in its attributes. Shared values are
//! shown once, so the graph converges instead of repeating itself.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ClickOutcome, ExploreSession, GraphSnapshot, SessionError, SessionOptions};
pub use config::{Config, ConfigError};
pub use domain::entities::{EntityTree, TreeError};
pub use domain::ports::{DataSourceLoader, LoadError, Row, RowFilter, RowSource, SetupError};
pub use domain::services::{DisplayGraph, MergeReport};
pub use domain::value_objects::{ColumnRef, DataSourceType, DisplayNodeId, LoaderSpec, NodeRole};
pub use error::{EntityGError, EntityGResult};
