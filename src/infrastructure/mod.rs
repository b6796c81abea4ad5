//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `sources/` - Row sources (SQLite, delimited files)
//! - `loaders/` - Expansion protocol per data source type

pub mod loaders;
pub mod sources;

pub use loaders::{DelimitedLoader, RelationalLoader};
pub use sources::{DelimitedRowSource, SqliteRowSource};
