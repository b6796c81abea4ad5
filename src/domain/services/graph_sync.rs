//! Graph synchronization
//!
//! Keeps the mutable display graph consistent with the entity tree. The
//! tree is a strict hierarchy; the display graph is not: a value reached by
//! two expansion paths converges on a single display node with two edges.
//!
//! Invariants:
//! - at most one display node per case-insensitive label
//! - at most one edge per unordered pair of display nodes
//! - no self-edges

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entities::{EntityTree, TreeError};
use crate::domain::value_objects::{DisplayNodeId, TreeNodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    label: String,
    tree_node: TreeNodeId,
    visible: bool,
    spanning_parent: Option<DisplayNodeId>,
    spanning_children: Vec<DisplayNodeId>,
}

impl DisplayNode {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The tree node this display node was first created for.
    pub fn tree_node(&self) -> TreeNodeId {
        self.tree_node
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The display node whose expansion introduced this one.
    pub fn spanning_parent(&self) -> Option<DisplayNodeId> {
        self.spanning_parent
    }

    /// Nodes this one introduced, in merge order.
    pub fn spanning_children(&self) -> &[DisplayNodeId] {
        &self.spanning_children
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEdge {
    a: DisplayNodeId,
    b: DisplayNodeId,
    visible: bool,
}

impl DisplayEdge {
    pub fn endpoints(&self) -> (DisplayNodeId, DisplayNodeId) {
        (self.a, self.b)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// What a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub added_nodes: usize,
    pub added_edges: usize,
    /// Children that converged on an already-known display node
    pub reused_nodes: usize,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.added_nodes == 0 && self.added_edges == 0 && self.reused_nodes == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct DisplayGraph {
    nodes: Vec<DisplayNode>,
    edges: Vec<DisplayEdge>,
    edge_index: HashMap<(DisplayNodeId, DisplayNodeId), usize>,
    /// Edge indices per endpoint
    incident: HashMap<DisplayNodeId, Vec<usize>>,
    by_label: HashMap<String, DisplayNodeId>,
    by_tree: HashMap<TreeNodeId, DisplayNodeId>,
    root: Option<DisplayNodeId>,
}

fn label_key(label: &str) -> String {
    label.to_lowercase()
}

fn edge_key(a: DisplayNodeId, b: DisplayNodeId) -> (DisplayNodeId, DisplayNodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl DisplayGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root display node and one node per immediate tree child.
    ///
    /// Only the first call has an effect.
    pub fn materialize_root(
        &mut self,
        tree: &EntityTree,
        root: TreeNodeId,
    ) -> Result<MergeReport, TreeError> {
        if self.root.is_some() {
            return Ok(MergeReport::default());
        }
        let node = tree.node(root)?;
        let display = match self.find_by_label(node.value()) {
            Some(existing) => existing,
            None => self.insert_node(node.value(), root, None),
        };
        self.by_tree.entry(root).or_insert(display);
        self.root = Some(display);

        let mut report = self.merge_subtree(tree, display, root)?;
        report.added_nodes += 1;
        Ok(report)
    }

    /// Reconcile the children of `expanded` into the graph under `parent`.
    ///
    /// New labels get a new node and an edge; known labels only get an edge,
    /// and only if the pair is not already connected. A known node that is
    /// hidden under a collapsed subtree moves under `parent` and is shown.
    pub fn merge_subtree(
        &mut self,
        tree: &EntityTree,
        parent: DisplayNodeId,
        expanded: TreeNodeId,
    ) -> Result<MergeReport, TreeError> {
        let mut report = MergeReport::default();
        if self.node(parent).is_none() {
            return Ok(report);
        }

        for &child in tree.node(expanded)?.children() {
            let value = tree.node(child)?.value();
            match self.find_by_label(value) {
                Some(existing) => {
                    self.by_tree.entry(child).or_insert(existing);
                    report.reused_nodes += 1;
                    if existing != parent && self.insert_edge(parent, existing) {
                        report.added_edges += 1;
                    }
                    if !self.is_visible(existing) && self.is_visible(parent) {
                        self.adopt(parent, existing);
                    }
                }
                None => {
                    let display = self.insert_node(value, child, Some(parent));
                    self.by_tree.insert(child, display);
                    self.nodes[parent.index()].spanning_children.push(display);
                    report.added_nodes += 1;
                    if self.insert_edge(parent, display) {
                        report.added_edges += 1;
                    }
                }
            }
        }

        tracing::debug!(
            parent = %parent,
            added_nodes = report.added_nodes,
            added_edges = report.added_edges,
            reused_nodes = report.reused_nodes,
            "merged subtree"
        );
        Ok(report)
    }

    fn insert_node(
        &mut self,
        label: &str,
        tree_node: TreeNodeId,
        spanning_parent: Option<DisplayNodeId>,
    ) -> DisplayNodeId {
        let id = DisplayNodeId::new(self.nodes.len());
        self.nodes.push(DisplayNode {
            label: label.to_string(),
            tree_node,
            visible: true,
            spanning_parent,
            spanning_children: Vec::new(),
        });
        self.by_label.insert(label_key(label), id);
        id
    }

    /// Re-home a hidden node under `parent` in the spanning structure and show
    /// it with its edges. Its own descendants stay hidden, so it reads as
    /// collapsed until clicked.
    fn adopt(&mut self, parent: DisplayNodeId, node: DisplayNodeId) {
        if self.root == Some(node) || self.spanning_descendants(node).contains(&parent) {
            return;
        }
        if let Some(old) = self.nodes[node.index()].spanning_parent {
            self.nodes[old.index()].spanning_children.retain(|&c| c != node);
        }
        self.nodes[node.index()].spanning_parent = Some(parent);
        self.nodes[parent.index()].spanning_children.push(node);
        self.set_node_visible(node, true);
        self.set_incident_edges_visible(node, true);
        tracing::debug!(parent = %parent, node = %node, "adopted hidden node");
    }

    /// Returns false when the pair is already connected or is a self-loop.
    fn insert_edge(&mut self, a: DisplayNodeId, b: DisplayNodeId) -> bool {
        if a == b {
            return false;
        }
        let key = edge_key(a, b);
        if self.edge_index.contains_key(&key) {
            return false;
        }
        let index = self.edges.len();
        self.edge_index.insert(key, index);
        self.incident.entry(a).or_default().push(index);
        self.incident.entry(b).or_default().push(index);
        self.edges.push(DisplayEdge {
            a,
            b,
            visible: true,
        });
        true
    }

    /// The tree node behind a display node.
    pub fn resolve(&self, node: DisplayNodeId) -> Option<TreeNodeId> {
        self.node(node).map(|n| n.tree_node)
    }

    pub fn display_for_tree(&self, tree_node: TreeNodeId) -> Option<DisplayNodeId> {
        self.by_tree.get(&tree_node).copied()
    }

    pub fn find_by_label(&self, label: &str) -> Option<DisplayNodeId> {
        self.by_label.get(&label_key(label)).copied()
    }

    pub fn node(&self, node: DisplayNodeId) -> Option<&DisplayNode> {
        self.nodes.get(node.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (DisplayNodeId, &DisplayNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (DisplayNodeId::new(i), n))
    }

    pub fn edges(&self) -> &[DisplayEdge] {
        &self.edges
    }

    pub fn root(&self) -> Option<DisplayNodeId> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, a: DisplayNodeId, b: DisplayNodeId) -> bool {
        self.edge_index.contains_key(&edge_key(a, b))
    }

    pub fn is_visible(&self, node: DisplayNodeId) -> bool {
        self.node(node).is_some_and(|n| n.visible)
    }

    /// An edge is drawn only if it and both of its endpoints are visible.
    pub fn is_edge_rendered(&self, edge: &DisplayEdge) -> bool {
        edge.visible && self.is_visible(edge.a) && self.is_visible(edge.b)
    }

    pub fn visible_nodes(&self) -> Vec<DisplayNodeId> {
        self.nodes()
            .filter(|(_, n)| n.visible)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn rendered_edges(&self) -> Vec<&DisplayEdge> {
        self.edges
            .iter()
            .filter(|e| self.is_edge_rendered(e))
            .collect()
    }

    /// Every node introduced below `node`, depth-first, excluding `node`.
    pub fn spanning_descendants(&self, node: DisplayNodeId) -> Vec<DisplayNodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<DisplayNodeId> = match self.node(node) {
            Some(n) => n.spanning_children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(n) = self.node(id) {
                stack.extend(n.spanning_children.iter().rev().copied());
            }
        }
        out
    }

    pub(crate) fn set_node_visible(&mut self, node: DisplayNodeId, visible: bool) -> bool {
        match self.nodes.get_mut(node.index()) {
            Some(n) if n.visible != visible => {
                n.visible = visible;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_incident_edges_visible(&mut self, node: DisplayNodeId, visible: bool) {
        let Some(indices) = self.incident.get(&node) else {
            return;
        };
        for &index in indices {
            if let Some(edge) = self.edges.get_mut(index) {
                edge.visible = visible;
            }
        }
    }
}

#[cfg(test)]
mod tests;
