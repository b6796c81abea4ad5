//! Node role value object
//!
//! Every tree node is either a center entity or an information attribute.
//! Roles alternate level by level: a center node's children are information
//! nodes and vice versa.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// A primary entity; expands into its attributes
    Center,
    /// An attribute of a center entity; expands into sibling entities sharing it
    Information,
}

impl NodeRole {
    pub fn from_is_center(is_center: bool) -> Self {
        if is_center {
            NodeRole::Center
        } else {
            NodeRole::Information
        }
    }

    pub fn is_center(&self) -> bool {
        matches!(self, NodeRole::Center)
    }

    /// The role every child of a node with this role must have.
    pub fn child_role(&self) -> Self {
        match self {
            NodeRole::Center => NodeRole::Information,
            NodeRole::Information => NodeRole::Center,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Center => "center",
            NodeRole::Information => "information",
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
