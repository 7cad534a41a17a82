//! # Declara CLI
//!
//! Command-line interface for Declara.
//!
//! Runs the engines against the bundled sample models from the command line.
//!
//! ## Commands
//!
//! - `scan` - Print every descriptor declared on the models
//! - `validate` - Validate a sample instance
//! - `json` - Serialize the sample instances
//! - `instantiate` - Create component instances
//! - `demo` - All of the above in sequence
//!

pub mod commands;
pub mod models;
pub mod render;

pub use commands::{Cli, Command, demo, resolve_config, run};
pub use models::{Product, User};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");
