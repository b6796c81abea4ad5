//! Entity tree
//!
//! The logical record of everything discovered so far. Nodes live in an arena
//! owned by [`EntityTree`] and are addressed by [`TreeNodeId`]. A node is never
//! removed and never changes after creation except for gaining children.

use crate::domain::value_objects::{NodeRole, TreeNodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("unknown tree node {0}")]
    UnknownNode(TreeNodeId),

    #[error("cannot attach {child_role} node '{child}' under {parent_role} node '{parent}'\n  → Children of a {parent_role} node must be {expected} nodes")]
    RoleMismatch {
        parent: String,
        parent_role: NodeRole,
        child: String,
        child_role: NodeRole,
        expected: NodeRole,
    },

    #[error("tree node '{child}' already has a parent")]
    AlreadyAttached { child: String },

    #[error("a node cannot be its own child: '{0}'")]
    SelfReference(String),

    #[error("{role} node '{node}' cannot be expanded this way (expected a {expected} node)")]
    UnexpectedRole {
        node: String,
        role: NodeRole,
        expected: NodeRole,
    },
}

/// One discovered fact: a value, the column it came from, and its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    value: String,
    header: String,
    role: NodeRole,
    parent: Option<TreeNodeId>,
    children: Vec<TreeNodeId>,
}

impl TreeNode {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn is_center(&self) -> bool {
        self.role.is_center()
    }

    pub fn parent(&self) -> Option<TreeNodeId> {
        self.parent
    }

    pub fn children(&self) -> &[TreeNodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityTree {
    nodes: Vec<TreeNode>,
    root: Option<TreeNodeId>,
}

impl EntityTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node. It joins the tree via [`append_child`](Self::append_child)
    /// or [`set_root`](Self::set_root).
    pub fn create_node(
        &mut self,
        value: impl Into<String>,
        header: impl Into<String>,
        role: NodeRole,
    ) -> TreeNodeId {
        let id = TreeNodeId::new(self.nodes.len());
        self.nodes.push(TreeNode {
            value: value.into(),
            header: header.into(),
            role,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: TreeNodeId, child: TreeNodeId) -> Result<(), TreeError> {
        if parent == child {
            return Err(TreeError::SelfReference(self.node(parent)?.value.clone()));
        }
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        let expected = parent_node.role.child_role();
        if child_node.role != expected {
            return Err(TreeError::RoleMismatch {
                parent: parent_node.value.clone(),
                parent_role: parent_node.role,
                child: child_node.value.clone(),
                child_role: child_node.role,
                expected,
            });
        }
        if child_node.parent.is_some() || self.root == Some(child) {
            return Err(TreeError::AlreadyAttached {
                child: child_node.value.clone(),
            });
        }

        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    /// Create and append a batch of children carrying the role opposite to `parent`'s.
    pub fn extend_children<I, V, H>(
        &mut self,
        parent: TreeNodeId,
        children: I,
    ) -> Result<Vec<TreeNodeId>, TreeError>
    where
        I: IntoIterator<Item = (V, H)>,
        V: Into<String>,
        H: Into<String>,
    {
        let role = self.node(parent)?.role.child_role();
        let mut added = Vec::new();
        for (value, header) in children {
            let child = self.create_node(value, header, role);
            self.append_child(parent, child)?;
            added.push(child);
        }
        Ok(added)
    }

    pub fn has_children(&self, node: TreeNodeId) -> bool {
        self.get(node).is_some_and(|n| !n.children.is_empty())
    }

    pub fn children_of(&self, node: TreeNodeId) -> &[TreeNodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Install the root. Only the first call has any effect; returns whether it did.
    pub fn set_root(&mut self, node: TreeNodeId) -> bool {
        if self.root.is_some() || self.get(node).is_none() {
            return false;
        }
        self.root = Some(node);
        true
    }

    pub fn root(&self) -> Option<TreeNodeId> {
        self.root
    }

    pub fn get(&self, node: TreeNodeId) -> Option<&TreeNode> {
        self.nodes.get(node.index())
    }

    pub fn node(&self, node: TreeNodeId) -> Result<&TreeNode, TreeError> {
        self.get(node).ok_or(TreeError::UnknownNode(node))
    }

    /// Fails unless `node` exists and has the `expected` role.
    pub fn ensure_role(&self, node: TreeNodeId, expected: NodeRole) -> Result<(), TreeError> {
        let n = self.node(node)?;
        if n.role != expected {
            return Err(TreeError::UnexpectedRole {
                node: n.value.clone(),
                role: n.role,
                expected,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node, in pre-order from the root, whose value and header both match.
    pub fn find(&self, value: &str, header: &str) -> Option<TreeNodeId> {
        let root = self.root?;
        self.pre_order(root).into_iter().find(|id| {
            self.get(*id)
                .is_some_and(|n| n.value == value && n.header == header)
        })
    }

    pub fn pre_order(&self, start: TreeNodeId) -> Vec<TreeNodeId> {
        self.pre_order_with_depth(start)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// Pre-order walk yielding each node with its depth relative to `start`.
    pub fn pre_order_with_depth(&self, start: TreeNodeId) -> Vec<(TreeNodeId, usize)> {
        let mut out = Vec::new();
        if self.get(start).is_none() {
            return out;
        }
        let mut stack = vec![(start, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for child in self.children_of(id).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }
}
