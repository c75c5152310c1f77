//! optschema - resolve server options from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Snapshot the process environment and resolve the schema against it.
//! - Print the resolved options as JSON, or a structured error with an exit code.
//!
//! Does NOT handle:
//! - Resolution rules (see `optschema-config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can feed clap env defaults.
//! - Resolver failures print `{code, field, message}` JSON on stderr and exit with 5.

mod args;
mod env;
mod error;
mod schema_file;

use anyhow::{Context, Result};
use args::{Cli, parse_input};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use optschema_config::{OptionsError, Resolver, server_schema};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = env::load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            match e.downcast_ref::<OptionsError>() {
                Some(options_error) => match serde_json::to_string(&options_error.report()) {
                    Ok(report) => eprintln!("{}", report),
                    Err(_) => eprintln!("Error: {} ({})", options_error, options_error.code()),
                },
                None => eprintln!("Error: {:#}", e),
            }
            e.exit_code()
        }
    };
    std::process::exit(code.as_i32());
}

async fn run(cli: Cli) -> Result<()> {
    let schema = match &cli.schema {
        Some(path) => schema_file::load_schema(path)?,
        None => {
            let base_dir = match cli.base_dir.clone() {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to determine current directory")?,
            };
            server_schema(base_dir)
        }
    };

    let input = cli.input.as_deref().map(parse_input);
    let mapping = (!cli.no_env).then(env::snapshot);

    let mut resolver = Resolver::new(&schema);
    if let Some(input) = &input {
        resolver = resolver.with_input(input);
    }
    if let Some(mapping) = &mapping {
        resolver = resolver.with_env(mapping);
    }
    let config = resolver.resolve().await?;
    tracing::info!(fields = config.len(), environment = %config.environment(), "resolved options");

    let output = if cli.pretty {
        serde_json::to_string_pretty(&config)
    } else {
        serde_json::to_string(&config)
    }
    .context("Failed to serialize resolved options")?;
    println!("{}", output);
    Ok(())
}
