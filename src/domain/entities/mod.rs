//! Domain Entities
//!
//! - `EntityTree` - arena of discovered facts, rooted at the seed entity
//! - `TreeNode` - one value with its source column and role

mod tree;

pub use tree::{EntityTree, TreeError, TreeNode};
