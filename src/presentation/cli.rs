//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose) are inherited by all subcommands
//! - `--set key=value` accepts the same flat option names as `ENTITYG_<KEY>`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// EntityG - explore entity relationships one double-click at a time
#[derive(Parser, Debug)]
#[command(name = "entityg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand that reads a configuration
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Path to the config file (default: ./entityg.toml, then the user config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override one option, e.g. --set default_max_nodes=3 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explore interactively: pick a node to expand or collapse it
    Explore {
        #[command(flatten)]
        config: ConfigArgs,

        /// Starting entity (overrides source.first_node_entry)
        #[arg(short, long)]
        seed: Option<String>,
    },

    /// Run a scripted session and print the resulting graph
    Show {
        #[command(flatten)]
        config: ConfigArgs,

        /// Starting entity (overrides source.first_node_entry)
        #[arg(short, long)]
        seed: Option<String>,

        /// Double-click the node with this label (repeatable, applied in order)
        #[arg(long = "click", value_name = "LABEL")]
        clicks: Vec<String>,

        /// Also print the underlying tree
        #[arg(long)]
        tree: bool,
    },

    /// Validate the configuration without exploring
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
}
