//! Command-line definition and command handlers

use crate::models::{Product, User};
use crate::render::{ReportView, header, render_validation};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use declara_core::{Reflect, TypeDescriptor};
use declara_engine::{
    CONFIG_FILENAME, Engine, EngineConfig, create_instance, reports_to_json,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "declara")]
#[command(author, version, about = "Inspect, validate and serialize annotated models", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./declara.toml when present)
    #[arg(short, long, global = true, env = "DECLARA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every descriptor declared on the models
    Scan {
        #[arg(short, long, value_enum, default_value_t = Model::All)]
        model: Model,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Validate a sample instance against its declared rules
    Validate {
        #[arg(short, long, value_enum, default_value_t = Model::All)]
        model: Model,

        #[arg(short, long, value_enum, default_value_t = Sample::Invalid)]
        sample: Sample,
    },

    /// Serialize the sample instances as JSON
    Json {
        #[arg(short, long, value_enum, default_value_t = Model::All)]
        model: Model,
    },

    /// Create fresh component instances
    Instantiate {
        #[arg(short, long, value_enum, default_value_t = Model::All)]
        model: Model,
    },

    /// Run scan, validation, serialization and instantiation in sequence
    Demo,
}

/// Sample model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Model {
    User,
    Product,
    All,
}

impl Model {
    pub fn descriptors(self) -> Vec<&'static TypeDescriptor> {
        match self {
            Model::User => vec![User::type_descriptor()],
            Model::Product => vec![Product::type_descriptor()],
            Model::All => vec![User::type_descriptor(), Product::type_descriptor()],
        }
    }

    pub fn samples(self, sample: Sample) -> Vec<Box<dyn Reflect>> {
        let user = || -> Box<dyn Reflect> {
            match sample {
                Sample::Valid => Box::new(User::sample()),
                Sample::Invalid => Box::new(User::invalid_sample()),
            }
        };
        let product = || -> Box<dyn Reflect> {
            match sample {
                Sample::Valid => Box::new(Product::sample()),
                Sample::Invalid => Box::new(Product::invalid_sample()),
            }
        };
        match self {
            Model::User => vec![user()],
            Model::Product => vec![product()],
            Model::All => vec![user(), product()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    Valid,
    Invalid,
}

// ============================================================================
// Entry Point
// ============================================================================

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = resolve_config(cli.config.as_deref())?;
    let engine = Engine::from_config(&config);

    match cli.command {
        Command::Scan { model, format } => cmd_scan(&engine, model, format),
        Command::Validate { model, sample } => cmd_validate(&engine, model, sample),
        Command::Json { model } => cmd_json(&engine, model),
        Command::Instantiate { model } => {
            cmd_instantiate(model);
            Ok(())
        }
        Command::Demo => demo(&engine),
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Pick the configuration: explicit path, then `./declara.toml`, then defaults
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        return EngineConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()));
    }

    let local = Path::new(CONFIG_FILENAME);
    if local.is_file() {
        return EngineConfig::load(local)
            .with_context(|| format!("failed to load configuration {}", local.display()));
    }

    Ok(EngineConfig::default())
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_scan(engine: &Engine, model: Model, format: Format) -> Result<()> {
    let reports = engine.scanner().scan_many(&model.descriptors());
    match format {
        Format::Text => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", ReportView(report));
            }
        }
        Format::Json => {
            let json = reports_to_json(&reports).context("failed to encode scan reports")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_validate(engine: &Engine, model: Model, sample: Sample) -> Result<()> {
    for instance in model.samples(sample) {
        let errors = engine
            .validate(instance.as_ref())
            .with_context(|| format!("failed to validate {}", instance.type_name()))?;
        println!("{}", render_validation(instance.type_name(), &errors));
    }
    Ok(())
}

fn cmd_json(engine: &Engine, model: Model) -> Result<()> {
    for instance in model.samples(Sample::Valid) {
        let json = engine
            .to_json(instance.as_ref())
            .with_context(|| format!("failed to serialize {}", instance.type_name()))?;
        println!("{}", json);
    }
    Ok(())
}

fn cmd_instantiate(model: Model) {
    let lines = match model {
        Model::User => vec![created::<User>()],
        Model::Product => vec![created::<Product>()],
        Model::All => vec![created::<User>(), created::<Product>()],
    };
    for line in lines {
        println!("{}", line);
    }
}

fn created<T: Reflect + Default>() -> String {
    let descriptor = T::type_descriptor();
    match (create_instance::<T>(), &descriptor.component) {
        (Some(_), Some(tag)) => format!(
            "{} Created component {} ({})",
            "✓".green(),
            tag.name,
            descriptor.name
        ),
        _ => format!("{} {} is not a component", "✗".red(), descriptor.name),
    }
}

/// Walk through every engine on the sample models
pub fn demo(engine: &Engine) -> Result<()> {
    header("Scanning models");
    cmd_scan(engine, Model::All, Format::Text)?;

    header("Validating an invalid user");
    println!("{:?}", User::invalid_sample());
    cmd_validate(engine, Model::User, Sample::Invalid)?;

    header("Validating a valid user");
    println!("{:?}", User::sample());
    cmd_validate(engine, Model::User, Sample::Valid)?;

    header("Serializing to JSON");
    cmd_json(engine, Model::All)?;

    header("Creating components");
    cmd_instantiate(Model::All);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["declara", "validate"]).unwrap();
        match cli.command {
            Command::Validate { model, sample } => {
                assert_eq!(model, Model::All);
                assert_eq!(sample, Sample::Invalid);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["declara", "json", "--model", "product", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Json {
                model: Model::Product
            }
        ));
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        assert!(Cli::try_parse_from(["declara", "scan", "--model", "order"]).is_err());
    }

    #[test]
    fn test_model_selection() {
        assert_eq!(Model::All.descriptors().len(), 2);
        assert_eq!(Model::Product.descriptors()[0].name, "Product");
        let samples = Model::User.samples(Sample::Valid);
        assert_eq!(samples[0].type_name(), "User");
    }

    #[test]
    fn test_resolve_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[serialization]\nmax_depth = 3").unwrap();
        let config = resolve_config(Some(file.path())).unwrap();
        assert_eq!(config.serialization.max_depth, 3);
    }

    #[test]
    fn test_resolve_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_config(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to load configuration"));
    }

    #[test]
    fn test_created_line() {
        colored::control::set_override(false);
        assert_eq!(
            created::<Product>(),
            "✓ Created component productService (Product)"
        );
    }
}
