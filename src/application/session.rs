//! Exploration session
//!
//! Owns the loader, the entity tree and the display graph for one running
//! instance, and turns "node X was double-clicked" into a toggle or a load.
//!
//! Everything runs synchronously on the caller's thread; a slow backing store
//! stalls the click that reached it.

use serde::Serialize;

use crate::domain::entities::{EntityTree, TreeError};
use crate::domain::ports::{DataSourceLoader, LoadError};
use crate::domain::services::{visibility, DisplayGraph, MergeReport, ToggleOutcome};
use crate::domain::value_objects::{DataSourceType, DisplayNodeId};

use super::snapshot::GraphSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown display node {0}")]
    UnknownNode(DisplayNodeId),

    #[error("no node labelled '{0}' in the graph")]
    UnknownLabel(String),

    #[error("session has not been started")]
    NotStarted,

    #[error("failed to load the starting entity: {0}")]
    Start(#[from] LoadError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Fan-out cap for center expansions
    pub max_nodes: usize,
    pub use_tool_tip: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_nodes: 7,
            use_tool_tip: false,
        }
    }
}

/// What a double-click did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    Collapsed { hidden: usize },
    Expanded { shown: usize },
    Loaded { report: MergeReport },
    /// The loader ran and found no related entries
    NothingFound,
    /// Already loaded, but every child converged onto nodes introduced elsewhere
    NoChange,
    /// The load failed; the graph is untouched
    Failed { reason: String },
}

pub struct ExploreSession {
    loader: Box<dyn DataSourceLoader>,
    tree: EntityTree,
    graph: DisplayGraph,
    options: SessionOptions,
    hovered: Option<DisplayNodeId>,
}

impl ExploreSession {
    pub fn new(loader: Box<dyn DataSourceLoader>, options: SessionOptions) -> Self {
        Self {
            loader,
            tree: EntityTree::new(),
            graph: DisplayGraph::new(),
            options,
            hovered: None,
        }
    }

    pub fn source_type(&self) -> DataSourceType {
        self.loader.source_type()
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn tree(&self) -> &EntityTree {
        &self.tree
    }

    pub fn graph(&self) -> &DisplayGraph {
        &self.graph
    }

    pub fn root(&self) -> Option<DisplayNodeId> {
        self.graph.root()
    }

    /// Load the seed entity and show it with its attributes.
    ///
    /// The first successful call wins; later calls return the existing root.
    pub fn start(&mut self, seed: &str) -> Result<DisplayNodeId, SessionError> {
        if let Some(root) = self.graph.root() {
            tracing::debug!(seed, "session already started");
            return Ok(root);
        }

        let root = self.loader.load_root(&mut self.tree, seed)?;
        self.tree.set_root(root);
        let report = self.graph.materialize_root(&self.tree, root)?;
        tracing::info!(
            seed,
            attributes = report.added_nodes.saturating_sub(1),
            "session started"
        );
        self.graph.root().ok_or(SessionError::NotStarted)
    }

    /// Toggle an expanded node, or load the children of an unexpanded one.
    ///
    /// Load failures are reported in the outcome, never as an error, and
    /// leave both the tree and the graph exactly as they were.
    pub fn on_node_double_clicked(
        &mut self,
        node: DisplayNodeId,
    ) -> Result<ClickOutcome, SessionError> {
        let tree_node = self
            .graph
            .resolve(node)
            .ok_or(SessionError::UnknownNode(node))?;

        if self.tree.has_children(tree_node) {
            let outcome = match visibility::toggle(&mut self.graph, node) {
                ToggleOutcome::Collapsed { hidden } => ClickOutcome::Collapsed { hidden },
                ToggleOutcome::Expanded { shown } => ClickOutcome::Expanded { shown },
                ToggleOutcome::NoDescendants => ClickOutcome::NoChange,
            };
            return Ok(outcome);
        }

        let data = self.tree.node(tree_node)?;
        let (value, header, is_center) =
            (data.value().to_string(), data.header().to_string(), data.is_center());

        let loaded = if is_center {
            self.loader
                .expand_information(&mut self.tree, tree_node, &value, &header)
        } else {
            self.loader.expand_center(
                &mut self.tree,
                tree_node,
                self.options.max_nodes,
                &value,
                &header,
            )
        };

        if let Err(err) = loaded {
            tracing::warn!(node = %node, value = %value, header = %header, %err, "expansion failed");
            return Ok(ClickOutcome::Failed {
                reason: err.to_string(),
            });
        }

        if !self.tree.has_children(tree_node) {
            tracing::info!(value = %value, header = %header, "nothing related found");
            return Ok(ClickOutcome::NothingFound);
        }

        let report = self.graph.merge_subtree(&self.tree, node, tree_node)?;
        Ok(ClickOutcome::Loaded { report })
    }

    /// Tooltip text for `node`: its header, when tooltips are enabled.
    pub fn on_node_hover_enter(&mut self, node: DisplayNodeId) -> Option<&str> {
        self.hovered = Some(node);
        if !self.options.use_tool_tip {
            return None;
        }
        let tree_node = self.graph.resolve(node)?;
        self.tree.get(tree_node).map(|n| n.header())
    }

    pub fn on_node_hover_exit(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<DisplayNodeId> {
        self.hovered
    }

    /// Case-insensitive label lookup.
    pub fn find_node(&self, label: &str) -> Option<DisplayNodeId> {
        self.graph.find_by_label(label.trim())
    }

    /// Double-click the node with the given label.
    pub fn click_label(&mut self, label: &str) -> Result<ClickOutcome, SessionError> {
        let node = self
            .find_node(label)
            .ok_or_else(|| SessionError::UnknownLabel(label.to_string()))?;
        self.on_node_double_clicked(node)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.tree, &self.graph)
    }
}
