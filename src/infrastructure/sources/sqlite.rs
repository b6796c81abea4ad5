//! SQLite row source
//!
//! Compiles a filter into `SELECT * FROM (<base>) WHERE "<column>" = ?1` and
//! runs it against a read-only connection. The value is always bound, never
//! interpolated.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};

use crate::domain::ports::{Row, RowFilter, RowSource, RowSourceError, RowSourceResult};
use crate::domain::value_objects::ColumnRef;

pub struct SqliteRowSource {
    conn: Connection,
    label: String,
}

impl SqliteRowSource {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> RowSourceResult<Self> {
        if !path.exists() {
            return Err(RowSourceError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(RowSourceError::NotAFile(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(query_error)?;
        Ok(Self {
            conn,
            label: path.display().to_string(),
        })
    }

    /// Wrap an already-open connection (e.g. in-memory, for tests).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            label: "sqlite connection".to_string(),
        }
    }
}

fn query_error(err: rusqlite::Error) -> RowSourceError {
    RowSourceError::Query(err.to_string())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Filter the rows of `base` on `column`.
///
/// The base runs as a subquery so its own WHERE, ORDER BY and LIMIT clauses
/// stay intact. A base ending in a bare `WHERE` is completed in place.
pub(crate) fn compile_filter(base: &str, column: &str) -> String {
    let base = base.trim().trim_end_matches(';').trim_end();
    let lower = base.to_ascii_lowercase();
    let condition = format!("{} = ?1", quote_identifier(column));

    if lower.ends_with(" where") || lower == "where" {
        format!("{} {}", base, condition)
    } else {
        format!("SELECT * FROM ({}) WHERE {}", base, condition)
    }
}

fn value_to_string(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Some(format!("<{} bytes>", b.len())),
    }
}

impl RowSource for SqliteRowSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn query(&mut self, filter: &RowFilter<'_>) -> RowSourceResult<Vec<Row>> {
        let column = match filter.column {
            ColumnRef::Name(name) => name,
            ColumnRef::Number(index) => {
                return Err(RowSourceError::UnsupportedFilter {
                    column: format!("#{}", index),
                    reason: "SQL filters need a column name".to_string(),
                })
            }
        };
        let base = filter.base.ok_or_else(|| RowSourceError::UnsupportedFilter {
            column: column.clone(),
            reason: "no base query configured".to_string(),
        })?;

        let sql = compile_filter(base, column);
        tracing::debug!(sql = %sql, value = filter.value, "sqlite query");

        let mut stmt = self.conn.prepare(&sql).map_err(query_error)?;
        let headers: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = headers.len();

        let mut rows = stmt.query(params![filter.value]).map_err(query_error)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                values.push(value_to_string(row.get_ref(index).map_err(query_error)?));
            }
            out.push(Row::new(headers.clone(), values));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> SqliteRowSource {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE people (Name TEXT, Title TEXT, City TEXT, Age INTEGER);
             INSERT INTO people VALUES ('Alice', 'Dr.', 'Boston', 41);
             INSERT INTO people VALUES ('Bob', NULL, 'Boston', 35);
             INSERT INTO people VALUES ('Carol', 'Ms.', 'Boston', NULL);
             INSERT INTO people VALUES ('Dan', 'Mr.', 'Denver', 29);",
        )
        .unwrap();
        SqliteRowSource::from_connection(conn)
    }

    #[test]
    fn compile_filter_wraps_base_query() {
        assert_eq!(
            compile_filter("SELECT * FROM people", "City"),
            r#"SELECT * FROM (SELECT * FROM people) WHERE "City" = ?1"#
        );
    }

    #[test]
    fn compile_filter_keeps_existing_where() {
        assert_eq!(
            compile_filter("SELECT * FROM people WHERE Age > 30;", "City"),
            r#"SELECT * FROM (SELECT * FROM people WHERE Age > 30) WHERE "City" = ?1"#
        );
    }

    #[test]
    fn compile_filter_completes_trailing_where() {
        assert_eq!(
            compile_filter("select * from people where", "Name"),
            r#"select * from people where "Name" = ?1"#
        );
    }

    #[test]
    fn compile_filter_quotes_identifier() {
        assert_eq!(
            compile_filter("SELECT * FROM t", r#"we"ird"#),
            r#"SELECT * FROM (SELECT * FROM t) WHERE "we""ird" = ?1"#
        );
    }

    #[test]
    fn query_returns_matching_rows_in_order() {
        let mut source = people();
        let column = ColumnRef::name("City");
        let rows = source
            .query(&RowFilter::new(&column, "Boston").with_base("SELECT * FROM people"))
            .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.get_by_header("Name").unwrap()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(rows[0].get_by_header("Age"), Some("41"));
        assert_eq!(rows[1].get_by_header("Title"), None);
        assert_eq!(rows[2].get_by_header("Age"), None);
    }

    #[test]
    fn base_with_trailing_clauses_still_filters() {
        let mut source = people();
        let column = ColumnRef::name("City");
        let base = "SELECT * FROM people WHERE Age IS NOT NULL ORDER BY Name LIMIT 2;";
        let rows = source
            .query(&RowFilter::new(&column, "Boston").with_base(base))
            .unwrap();

        let mut names: Vec<_> = rows.iter().map(|r| r.get_by_header("Name").unwrap()).collect();
        names.sort();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn value_is_bound_not_interpolated() {
        let mut source = people();
        let column = ColumnRef::name("Name");
        let rows = source
            .query(&RowFilter::new(&column, "x' OR '1'='1").with_base("SELECT * FROM people"))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn positional_filter_is_unsupported() {
        let mut source = people();
        let column = ColumnRef::number(0);
        let err = source
            .query(&RowFilter::new(&column, "Alice").with_base("SELECT * FROM people"))
            .unwrap_err();
        assert!(matches!(err, RowSourceError::UnsupportedFilter { .. }));
    }

    #[test]
    fn unknown_column_is_a_query_error() {
        let mut source = people();
        let column = ColumnRef::name("Nope");
        let err = source
            .query(&RowFilter::new(&column, "x").with_base("SELECT * FROM people"))
            .unwrap_err();
        assert!(matches!(err, RowSourceError::Query(_)));
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.db");
        assert!(matches!(
            SqliteRowSource::open(&missing),
            Err(RowSourceError::NotFound(_))
        ));
    }
}
