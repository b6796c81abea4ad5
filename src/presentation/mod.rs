//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring configuration to infrastructure and creating sessions
//!
//! ## Usage
//!
//! ```ignore
//! use entityg::presentation::factory;
//!
//! let loaded = factory::load_config(None, &[])?;
//! let mut session = factory::start_session(&loaded.config, Some("Alice"))?;
//! session.click_label("Boston")?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, ConfigArgs};
pub use factory::{create_loader, create_session, load_config, resolve_seed, start_session};
