//! Row source implementations

mod delimited;
mod sqlite;

pub use delimited::DelimitedRowSource;
pub use sqlite::SqliteRowSource;
