//! Subcommand handlers for the `entityg` binary

pub mod check;
pub mod explore;
pub mod show;
