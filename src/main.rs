//! EntityG CLI - incremental entity-relationship graph explorer
//!
//! Usage: entityg <COMMAND>
//!
//! Commands:
//!   explore  Expand and collapse nodes interactively
//!   show     Apply scripted clicks and print the graph
//!   check    Validate the configuration

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use entityg::presentation::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ui = ui::context::UiContext::new(cli.json, cli.verbose, cli.color);

    match &cli.command {
        Commands::Explore { config, seed } => {
            commands::explore::cmd_explore(config, seed.as_deref(), &ui)
        }
        Commands::Show {
            config,
            seed,
            clicks,
            tree,
        } => commands::show::cmd_show(
            config,
            commands::show::ShowOptions {
                seed: seed.as_deref(),
                clicks,
                tree: *tree,
            },
            &ui,
        ),
        Commands::Check { config } => commands::check::cmd_check(config, &ui),
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from warn.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
