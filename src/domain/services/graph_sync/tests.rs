use super::*;
use crate::domain::value_objects::NodeRole;

/// Alice → {Dr., Boston}
fn alice() -> (EntityTree, TreeNodeId, DisplayGraph) {
    let mut tree = EntityTree::new();
    let root = tree.create_node("Alice", "Name", NodeRole::Center);
    tree.set_root(root);
    tree.extend_children(root, [("Dr.", "Title"), ("Boston", "City")])
        .unwrap();
    let mut graph = DisplayGraph::new();
    graph.materialize_root(&tree, root).unwrap();
    (tree, root, graph)
}

fn labels(graph: &DisplayGraph) -> Vec<String> {
    graph.nodes().map(|(_, n)| n.label().to_string()).collect()
}

#[test]
fn materialize_root_creates_star() {
    let (_, root, graph) = alice();

    assert_eq!(labels(&graph), vec!["Alice", "Dr.", "Boston"]);
    assert_eq!(graph.edge_count(), 2);
    let root_display = graph.root().unwrap();
    assert_eq!(graph.resolve(root_display), Some(root));
    for (id, _) in graph.nodes().skip(1) {
        assert!(graph.has_edge(root_display, id));
        assert!(graph.has_edge(id, root_display));
    }
}

#[test]
fn materialize_root_twice_is_noop() {
    let (tree, root, mut graph) = alice();
    let report = graph.materialize_root(&tree, root).unwrap();
    assert!(report.is_empty());
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn materialize_root_reports_counts() {
    let mut tree = EntityTree::new();
    let root = tree.create_node("Alice", "Name", NodeRole::Center);
    tree.extend_children(root, [("Dr.", "Title")]).unwrap();
    let mut graph = DisplayGraph::new();
    let report = graph.materialize_root(&tree, root).unwrap();
    assert_eq!(
        report,
        MergeReport {
            added_nodes: 2,
            added_edges: 1,
            reused_nodes: 0
        }
    );
}

#[test]
fn merge_converges_on_existing_label_case_insensitively() {
    let (mut tree, root, mut graph) = alice();
    let dr = tree.children_of(root)[0];
    let dr_display = graph.display_for_tree(dr).unwrap();

    // Dr. → {Bob, alice}; "alice" must reuse the root node.
    tree.extend_children(dr, [("Bob", "Name"), ("alice", "Name")])
        .unwrap();
    let report = graph.merge_subtree(&tree, dr_display, dr).unwrap();

    assert_eq!(report.added_nodes, 1);
    assert_eq!(report.reused_nodes, 1);
    // Dr.–Alice already exists, so only Dr.–Bob is new.
    assert_eq!(report.added_edges, 1);
    assert_eq!(labels(&graph), vec!["Alice", "Dr.", "Boston", "Bob"]);

    let reused_tree = tree.children_of(dr)[1];
    assert_eq!(graph.display_for_tree(reused_tree), graph.root());
}

#[test]
fn merge_adds_cross_edge_for_second_path() {
    let (mut tree, root, mut graph) = alice();
    let boston = tree.children_of(root)[1];
    let boston_display = graph.display_for_tree(boston).unwrap();
    tree.extend_children(boston, [("Alice", "Name"), ("Bob", "Name")])
        .unwrap();
    graph.merge_subtree(&tree, boston_display, boston).unwrap();

    // Bob → {Dr., Boston}: Dr. is reached a second way.
    let bob = tree.children_of(boston)[1];
    let bob_display = graph.display_for_tree(bob).unwrap();
    tree.extend_children(bob, [("Dr.", "Title"), ("Boston", "City")])
        .unwrap();
    let report = graph.merge_subtree(&tree, bob_display, bob).unwrap();

    assert_eq!(report.added_nodes, 0);
    assert_eq!(report.reused_nodes, 2);
    assert_eq!(report.added_edges, 1);
    let dr_display = graph.find_by_label("dr.").unwrap();
    assert!(graph.has_edge(bob_display, dr_display));
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn merging_same_subtree_twice_adds_nothing() {
    let (mut tree, root, mut graph) = alice();
    let boston = tree.children_of(root)[1];
    let boston_display = graph.display_for_tree(boston).unwrap();
    tree.extend_children(boston, [("Bob", "Name"), ("Carol", "Name")])
        .unwrap();

    graph.merge_subtree(&tree, boston_display, boston).unwrap();
    let edges = graph.edge_count();
    let second = graph.merge_subtree(&tree, boston_display, boston).unwrap();

    assert_eq!(second.added_nodes, 0);
    assert_eq!(second.added_edges, 0);
    assert_eq!(second.reused_nodes, 2);
    assert_eq!(graph.edge_count(), edges);
}

#[test]
fn merge_childless_node_is_noop() {
    let (tree, root, mut graph) = alice();
    let dr = tree.children_of(root)[0];
    let dr_display = graph.display_for_tree(dr).unwrap();
    let report = graph.merge_subtree(&tree, dr_display, dr).unwrap();
    assert!(report.is_empty());
}

#[test]
fn child_with_parent_label_gets_no_self_edge() {
    let mut tree = EntityTree::new();
    let root = tree.create_node("Boston", "Name", NodeRole::Center);
    tree.extend_children(root, [("boston", "City")]).unwrap();
    let mut graph = DisplayGraph::new();
    let report = graph.materialize_root(&tree, root).unwrap();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(report.reused_nodes, 1);
}

#[test]
fn spanning_structure_records_first_introducer() {
    let (mut tree, root, mut graph) = alice();
    let boston = tree.children_of(root)[1];
    let boston_display = graph.display_for_tree(boston).unwrap();
    tree.extend_children(boston, [("Bob", "Name")]).unwrap();
    graph.merge_subtree(&tree, boston_display, boston).unwrap();

    let bob_display = graph.find_by_label("Bob").unwrap();
    assert_eq!(
        graph.node(bob_display).unwrap().spanning_parent(),
        Some(boston_display)
    );
    let root_display = graph.root().unwrap();
    let descendants = graph.spanning_descendants(root_display);
    assert_eq!(descendants.len(), 3);
    assert!(descendants.contains(&bob_display));
}

#[test]
fn edge_rendered_only_with_visible_endpoints() {
    let (tree, root, mut graph) = alice();
    let dr_display = graph.display_for_tree(tree.children_of(root)[0]).unwrap();

    assert_eq!(graph.rendered_edges().len(), 2);
    graph.set_node_visible(dr_display, false);
    assert_eq!(graph.rendered_edges().len(), 1);
    assert_eq!(graph.visible_nodes().len(), 2);
}

#[test]
fn merge_under_unknown_parent_is_noop() {
    let (tree, root, mut graph) = alice();
    let report = graph
        .merge_subtree(&tree, DisplayNodeId::new(99), root)
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn converging_on_hidden_node_moves_it_under_the_new_parent() {
    let (mut tree, root, mut graph) = alice();
    let dr = tree.children_of(root)[0];
    let boston = tree.children_of(root)[1];
    let dr_display = graph.display_for_tree(dr).unwrap();
    let boston_display = graph.display_for_tree(boston).unwrap();

    tree.extend_children(boston, [("Bob", "Name")]).unwrap();
    graph.merge_subtree(&tree, boston_display, boston).unwrap();
    let bob = graph.find_by_label("Bob").unwrap();
    crate::domain::services::visibility::toggle(&mut graph, boston_display);
    assert!(!graph.is_visible(bob));

    tree.extend_children(dr, [("bob", "Name")]).unwrap();
    let report = graph.merge_subtree(&tree, dr_display, dr).unwrap();

    assert_eq!(report.reused_nodes, 1);
    assert_eq!(report.added_edges, 1);
    assert!(graph.is_visible(bob));
    assert_eq!(graph.node(bob).unwrap().spanning_parent(), Some(dr_display));
    assert_eq!(graph.node(dr_display).unwrap().spanning_children(), &[bob]);
    assert!(graph.node(boston_display).unwrap().spanning_children().is_empty());

    let rendered: Vec<_> = graph.rendered_edges().iter().map(|e| e.endpoints()).collect();
    assert!(rendered.contains(&(dr_display, bob)));
    assert!(rendered.contains(&(boston_display, bob)));
}

#[test]
fn converging_on_visible_node_keeps_its_introducer() {
    let (mut tree, root, mut graph) = alice();
    let dr = tree.children_of(root)[0];
    let boston = tree.children_of(root)[1];
    let dr_display = graph.display_for_tree(dr).unwrap();
    let boston_display = graph.display_for_tree(boston).unwrap();

    tree.extend_children(boston, [("Bob", "Name")]).unwrap();
    graph.merge_subtree(&tree, boston_display, boston).unwrap();
    tree.extend_children(dr, [("Bob", "Name")]).unwrap();
    graph.merge_subtree(&tree, dr_display, dr).unwrap();

    let bob = graph.find_by_label("Bob").unwrap();
    assert_eq!(graph.node(bob).unwrap().spanning_parent(), Some(boston_display));
    assert!(graph.node(dr_display).unwrap().spanning_children().is_empty());
}

#[test]
fn incident_edges_change_only_for_that_node() {
    let (tree, root, mut graph) = alice();
    let root_display = graph.root().unwrap();
    let dr_display = graph.display_for_tree(tree.children_of(root)[0]).unwrap();
    let boston_display = graph.display_for_tree(tree.children_of(root)[1]).unwrap();

    graph.set_incident_edges_visible(dr_display, false);

    let visible: Vec<_> = graph
        .edges()
        .iter()
        .filter(|e| e.is_visible())
        .map(|e| e.endpoints())
        .collect();
    assert_eq!(visible, vec![(root_display, boston_display)]);
}
