//! Declara v0.1
//!
//! Declarative metadata engine showcase
//!
//! Scans the sample models, validates a broken and a correct user, prints
//! their JSON and creates the registered components.

use declara_cli::resolve_config;
use declara_engine::Engine;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner
    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   Declara v{:<47}║", declara_core::VERSION);
    println!("║   Declarative metadata for validation and JSON            ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");

    let config = resolve_config(None)?;
    declara_cli::demo(&Engine::from_config(&config))
}
