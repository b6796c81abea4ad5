//! Data source loaders
//!
//! One loader per data source type; both implement
//! [`DataSourceLoader`](crate::domain::ports::DataSourceLoader).

mod delimited;
mod relational;

pub use delimited::DelimitedLoader;
pub use relational::RelationalLoader;
