//! Serializable view of a session
//!
//! Used for `--json` output and for asserting on whole-graph state in tests.

use serde::Serialize;

use crate::domain::entities::EntityTree;
use crate::domain::services::{visibility, DisplayGraph, SubtreeState};
use crate::domain::value_objects::{DisplayNodeId, NodeRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotNode {
    pub id: DisplayNodeId,
    pub label: String,
    pub header: String,
    pub role: NodeRole,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SubtreeState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEdge {
    pub a: DisplayNodeId,
    pub b: DisplayNodeId,
    pub visible: bool,
    pub rendered: bool,
}

/// One line of the tree outline, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub depth: usize,
    pub value: String,
    pub header: String,
    pub role: NodeRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayNodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub root: Option<DisplayNodeId>,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
    pub tree: Vec<OutlineEntry>,
}

impl GraphSnapshot {
    pub fn capture(tree: &EntityTree, graph: &DisplayGraph) -> Self {
        let nodes = graph
            .nodes()
            .filter_map(|(id, node)| {
                let data = tree.get(node.tree_node())?;
                Some(SnapshotNode {
                    id,
                    label: node.label().to_string(),
                    header: data.header().to_string(),
                    role: data.role(),
                    visible: node.is_visible(),
                    state: visibility::subtree_state(graph, id),
                })
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| {
                let (a, b) = edge.endpoints();
                SnapshotEdge {
                    a,
                    b,
                    visible: edge.is_visible(),
                    rendered: graph.is_edge_rendered(edge),
                }
            })
            .collect();

        let outline = tree
            .root()
            .map(|root| {
                tree.pre_order_with_depth(root)
                    .into_iter()
                    .filter_map(|(id, depth)| {
                        let data = tree.get(id)?;
                        Some(OutlineEntry {
                            depth,
                            value: data.value().to_string(),
                            header: data.header().to_string(),
                            role: data.role(),
                            display: graph.display_for_tree(id),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            root: graph.root(),
            nodes,
            edges,
            tree: outline,
        }
    }

    pub fn visible_labels(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.visible)
            .map(|n| n.label.as_str())
            .collect()
    }

    pub fn rendered_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.rendered).count()
    }
}
