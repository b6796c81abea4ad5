//! Exploration sessions against delimited files.

mod common;

use std::fs;

use entityg::presentation::factory;
use entityg::{ClickOutcome, ExploreSession};

use common::{csv_config, people_csv};

fn started(header_row: bool, max_nodes: usize, seed: &str) -> (tempfile::TempDir, ExploreSession) {
    let dir = tempfile::tempdir().unwrap();
    let csv = people_csv(dir.path(), header_row);
    let mut config = csv_config(&csv, max_nodes);
    config.csv.has_header_row = header_row;
    let session = factory::start_session(&config, Some(seed)).unwrap();
    (dir, session)
}

#[test]
fn root_children_are_labelled_through_the_mapping() {
    let (_dir, session) = started(false, 7, "Alice");
    let snapshot = session.snapshot();

    let outline: Vec<(&str, &str, usize)> = snapshot
        .tree
        .iter()
        .map(|e| (e.value.as_str(), e.header.as_str(), e.depth))
        .collect();
    assert_eq!(
        outline,
        vec![("Alice", "Name", 0), ("Dr.", "Title", 1), ("Boston", "City", 1)]
    );
}

#[test]
fn header_row_is_not_treated_as_data() {
    let (_dir, mut session) = started(true, 7, "Bob");
    session.click_label("Mr.").unwrap();

    assert!(session.find_node("Dan").is_some());
    assert!(session.find_node("Title").is_none());
    assert!(session.find_node("Name").is_none());
}

#[test]
fn center_expansion_respects_the_cap() {
    let (_dir, mut session) = started(false, 1, "Carol");
    let outcome = session.click_label("Boston").unwrap();

    // Alice is the first Boston row and is new to this graph.
    assert!(matches!(outcome, ClickOutcome::Loaded { report } if report.added_nodes == 1));
    assert!(session.find_node("Alice").is_some());
    assert!(session.find_node("Bob").is_none());
}

#[test]
fn empty_field_counts_as_null() {
    let (_dir, mut session) = started(false, 7, "Dan");
    session.click_label("Denver").unwrap();

    assert!(matches!(
        session.click_label("Erin").unwrap(),
        ClickOutcome::Failed { .. }
    ));
    let erin = session.find_node("Erin").unwrap();
    let tree_node = session.graph().resolve(erin).unwrap();
    assert!(!session.tree().has_children(tree_node));
}

#[test]
fn file_is_rescanned_on_every_click() {
    let dir = tempfile::tempdir().unwrap();
    let csv = people_csv(dir.path(), false);
    let mut session = factory::start_session(&csv_config(&csv, 7), Some("Alice")).unwrap();

    fs::write(&csv, "Alice,Dr.,Boston\nZoe,Ms.,Boston\n").unwrap();
    session.click_label("Boston").unwrap();

    assert!(session.find_node("Zoe").is_some());
    assert!(session.find_node("Bob").is_none());
}

#[test]
fn semicolon_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("people.csv");
    fs::write(&csv, "Alice;Dr.;Boston\n").unwrap();
    let mut config = csv_config(&csv, 7);
    config.set_option("delimiter", ";").unwrap();

    let session = factory::start_session(&config, Some("Alice")).unwrap();
    assert_eq!(session.graph().node_count(), 3);
}
