//! Terminal UI for the `entityg` binary
//!
//! Views return strings; commands decide where they go.

pub mod blocks;
pub mod context;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
