//! Random people tables and the sessions built over them.

use proptest::prelude::*;
use rusqlite::{params, Connection};

use entityg::infrastructure::{RelationalLoader, SqliteRowSource};
use entityg::{ExploreSession, LoaderSpec, SessionOptions};

/// (Name, Title, City). Titles differ only by case in places.
pub type Person = (String, String, String);

const TITLES: &[&str] = &["Dr.", "Mr.", "dr.", "Ms."];

pub fn people() -> impl Strategy<Value = Vec<Person>> {
    let person = (0..6usize, 0..TITLES.len(), 0..3usize).prop_map(|(n, t, c)| {
        (format!("p{n}"), TITLES[t].to_string(), format!("c{c}"))
    });
    proptest::collection::vec(person, 1..12)
}

/// Indices into the visible node list at the time of each click.
pub fn clicks() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(any::<usize>(), 0..10)
}

pub fn session(people: &[Person], max_nodes: usize) -> ExploreSession {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE people (Name TEXT, Title TEXT, City TEXT);")
        .unwrap();
    for (name, title, city) in people {
        conn.execute(
            "INSERT INTO people (Name, Title, City) VALUES (?1, ?2, ?3)",
            params![name, title, city],
        )
        .unwrap();
    }

    let spec = LoaderSpec::new()
        .with_filter_template("SELECT * FROM people")
        .with_center_column("Name")
        .with_information_columns(["Title", "City"]);
    let loader = RelationalLoader::new(SqliteRowSource::from_connection(conn), spec).unwrap();

    let mut session = ExploreSession::new(
        Box::new(loader),
        SessionOptions {
            max_nodes,
            use_tool_tip: false,
        },
    );
    session.start(&people[0].0).unwrap();
    session
}

/// Double-click visible nodes picked by `picks`.
///
/// With `loads_only`, nodes that already have children are skipped so
/// nothing gets collapsed.
pub fn explore(session: &mut ExploreSession, picks: &[usize], loads_only: bool) {
    for &pick in picks {
        let visible = session.graph().visible_nodes();
        let node = visible[pick % visible.len()];
        if loads_only {
            let tree_node = session.graph().resolve(node).unwrap();
            if session.tree().has_children(tree_node) {
                continue;
            }
        }
        session.on_node_double_clicked(node).unwrap();
    }
}
