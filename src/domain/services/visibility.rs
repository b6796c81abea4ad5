//! Visibility controller
//!
//! Collapsing hides a display subtree without discarding any tree data;
//! expanding shows it again. The subtree of a display node is the set of
//! nodes it introduced (transitively), not every node it has an edge to.

use serde::Serialize;

use crate::domain::services::DisplayGraph;
use crate::domain::value_objects::DisplayNodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtreeState {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Collapsed { hidden: usize },
    Expanded { shown: usize },
    /// The node introduced nothing; there is no state to flip
    NoDescendants,
}

/// State of the subtree under `node`, judged by its first child only.
pub fn subtree_state(graph: &DisplayGraph, node: DisplayNodeId) -> Option<SubtreeState> {
    let first = *graph.node(node)?.spanning_children().first()?;
    Some(if graph.is_visible(first) {
        SubtreeState::Expanded
    } else {
        SubtreeState::Collapsed
    })
}

/// Flip the subtree under `node` between expanded and collapsed.
pub fn toggle(graph: &mut DisplayGraph, node: DisplayNodeId) -> ToggleOutcome {
    match subtree_state(graph, node) {
        None => ToggleOutcome::NoDescendants,
        Some(SubtreeState::Expanded) => ToggleOutcome::Collapsed {
            hidden: set_descendants_visibility(graph, node, false),
        },
        Some(SubtreeState::Collapsed) => ToggleOutcome::Expanded {
            shown: set_descendants_visibility(graph, node, true),
        },
    }
}

/// Show or hide every descendant of `node` and every edge touching one.
///
/// Returns how many nodes actually changed.
pub fn set_descendants_visibility(
    graph: &mut DisplayGraph,
    node: DisplayNodeId,
    visible: bool,
) -> usize {
    let mut changed = 0;
    for descendant in graph.spanning_descendants(node) {
        if graph.set_node_visible(descendant, visible) {
            changed += 1;
        }
        graph.set_incident_edges_visible(descendant, visible);
    }
    tracing::debug!(node = %node, visible, changed, "subtree visibility");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntityTree;
    use crate::domain::value_objects::NodeRole;

    /// Alice → {Dr., Boston → {Bob, Carol}}
    fn graph() -> (DisplayGraph, DisplayNodeId, DisplayNodeId, DisplayNodeId) {
        let mut tree = EntityTree::new();
        let root = tree.create_node("Alice", "Name", NodeRole::Center);
        tree.set_root(root);
        let kids = tree
            .extend_children(root, [("Dr.", "Title"), ("Boston", "City")])
            .unwrap();
        tree.extend_children(kids[1], [("Bob", "Name"), ("Carol", "Name")])
            .unwrap();

        let mut graph = DisplayGraph::new();
        graph.materialize_root(&tree, root).unwrap();
        let boston = graph.display_for_tree(kids[1]).unwrap();
        graph.merge_subtree(&tree, boston, kids[1]).unwrap();
        let dr = graph.display_for_tree(kids[0]).unwrap();
        let root_display = graph.root().unwrap();
        (graph, root_display, dr, boston)
    }

    #[test]
    fn initial_state_is_expanded() {
        let (graph, root, dr, boston) = graph();
        assert_eq!(subtree_state(&graph, root), Some(SubtreeState::Expanded));
        assert_eq!(subtree_state(&graph, boston), Some(SubtreeState::Expanded));
        assert_eq!(subtree_state(&graph, dr), None);
    }

    #[test]
    fn collapse_hides_descendants_and_their_edges() {
        let (mut graph, _, _, boston) = graph();

        assert_eq!(toggle(&mut graph, boston), ToggleOutcome::Collapsed { hidden: 2 });
        assert_eq!(subtree_state(&graph, boston), Some(SubtreeState::Collapsed));
        assert!(graph.is_visible(boston));
        let bob = graph.find_by_label("Bob").unwrap();
        assert!(!graph.is_visible(bob));
        assert_eq!(graph.rendered_edges().len(), 2);
    }

    #[test]
    fn toggle_twice_restores_everything() {
        let (mut graph, root, _, _) = graph();
        let before: Vec<bool> = graph.nodes().map(|(_, n)| n.is_visible()).collect();
        let edges_before = graph.rendered_edges().len();

        assert_eq!(toggle(&mut graph, root), ToggleOutcome::Collapsed { hidden: 4 });
        assert_eq!(graph.visible_nodes(), vec![root]);
        assert!(graph.rendered_edges().is_empty());
        assert_eq!(toggle(&mut graph, root), ToggleOutcome::Expanded { shown: 4 });

        let after: Vec<bool> = graph.nodes().map(|(_, n)| n.is_visible()).collect();
        assert_eq!(before, after);
        assert_eq!(graph.rendered_edges().len(), edges_before);
    }

    #[test]
    fn toggle_does_not_touch_siblings() {
        let (mut graph, _, dr, boston) = graph();
        toggle(&mut graph, boston);
        assert!(graph.is_visible(dr));
    }

    #[test]
    fn toggle_leaf_is_noop() {
        let (mut graph, _, dr, _) = graph();
        assert_eq!(toggle(&mut graph, dr), ToggleOutcome::NoDescendants);
        assert_eq!(graph.visible_nodes().len(), 5);
    }
}
