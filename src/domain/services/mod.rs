//! Domain Services
//!
//! Pure logic over the tree and the display graph.
//! No I/O; everything here is testable without a backing store.

mod graph_sync;
pub mod visibility;

pub use graph_sync::{DisplayEdge, DisplayGraph, DisplayNode, MergeReport};
pub use visibility::{SubtreeState, ToggleOutcome};
