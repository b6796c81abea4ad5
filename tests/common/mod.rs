//! Common test utilities for EntityG integration tests.
//!
//! This module provides:
//! - `PEOPLE`: the rows every fixture is built from
//! - Fixture writers for a SQLite database, a delimited file and a config file
//! - Config builders that go through the same option table as `--set`

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use entityg::Config;

/// (Name, Title, City). Erin has no title.
pub const PEOPLE: &[(&str, Option<&str>, &str)] = &[
    ("Alice", Some("Dr."), "Boston"),
    ("Bob", Some("Mr."), "Boston"),
    ("Carol", Some("Dr."), "Boston"),
    ("Dan", Some("Mr."), "Denver"),
    ("Erin", None, "Denver"),
];

pub fn people_db(dir: &Path) -> PathBuf {
    let path = dir.join("people.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE people (Name TEXT, Title TEXT, City TEXT);")
        .unwrap();
    for (name, title, city) in PEOPLE {
        conn.execute(
            "INSERT INTO people (Name, Title, City) VALUES (?1, ?2, ?3)",
            rusqlite::params![name, title, city],
        )
        .unwrap();
    }
    path
}

/// Same rows as `people_db`; a missing title is an empty field.
pub fn people_csv(dir: &Path, header_row: bool) -> PathBuf {
    let path = dir.join("people.csv");
    let mut content = String::new();
    if header_row {
        content.push_str("Name,Title,City\n");
    }
    for (name, title, city) in PEOPLE {
        content.push_str(&format!("{},{},{}\n", name, title.unwrap_or(""), city));
    }
    fs::write(&path, content).unwrap();
    path
}

fn apply(config: &mut Config, options: &[(&str, &str)]) {
    for (key, value) in options {
        config.set_option(key, value).unwrap();
    }
}

pub fn db_config(db: &Path, max_nodes: usize) -> Config {
    let mut config = Config::default();
    apply(
        &mut config,
        &[
            ("datasource_type", "database"),
            ("base_query", "SELECT * FROM people"),
            ("base_column_name", "Name"),
            ("children_columns", "Title,City"),
            ("default_max_nodes", &max_nodes.to_string()),
        ],
    );
    config.database.path = Some(db.to_path_buf());
    config
}

pub fn csv_config(csv: &Path, max_nodes: usize) -> Config {
    let mut config = Config::default();
    apply(
        &mut config,
        &[
            ("datasource_type", "csv"),
            ("center_node_column_number", "0"),
            ("information_node_column_numbers", "1,2"),
            ("column_to_name_mapping", "Name,Title,City"),
            ("default_max_nodes", &max_nodes.to_string()),
        ],
    );
    config.csv.file_name = Some(csv.to_path_buf());
    config
}

/// `entityg.toml` for the SQLite fixture, with a relative data path.
pub fn write_db_config_file(dir: &Path, extra: &str) -> PathBuf {
    people_db(dir);
    let path = dir.join("entityg.toml");
    fs::write(
        &path,
        format!(
            r#"[source]
type = "database"
first_node_entry = "Alice"

[graph]
default_max_nodes = 7

[database]
path = "people.db"
base_query = "SELECT * FROM people"
base_column_name = "Name"
children_columns = ["Title", "City"]
{extra}"#
        ),
    )
    .unwrap();
    path
}
