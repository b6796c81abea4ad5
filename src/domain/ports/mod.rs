//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod data_loader;
pub mod row_source;

pub(crate) use data_loader::{cap_center_values, collect_information_values};
pub use data_loader::{DataSourceLoader, LoadError, LoadResult, SetupError};
pub use row_source::{is_null_value, Row, RowFilter, RowSource, RowSourceError, RowSourceResult};
