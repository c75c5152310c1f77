//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Turn the positional input into the resolver's explicit input value.
//!
//! Non-responsibilities:
//! - Does not resolve options (see `main`).
//! - Does not read the process environment (see `env` module).

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "optschema")]
#[command(about = "Resolve server options from arguments, environment and schema defaults", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  optschema\n  optschema 8080\n  optschema '{\"public\": false}'\n  NODE_ENV=production optschema --pretty\n  optschema --schema options.yaml '{\"token\": \"abc\"}'\n"
)]
pub struct Cli {
    /// Explicit input: a JSON object of options, or a bare value for the root option
    pub input: Option<String>,

    /// Schema file (JSON, or YAML with a .yaml/.yml extension); defaults to the server schema
    #[arg(short, long, env = "OPTSCHEMA_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Base directory for the server schema's path options (defaults to the current directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Do not pass the process environment to the resolver
    #[arg(long)]
    pub no_env: bool,

    /// Pretty-print the resolved options
    #[arg(long)]
    pub pretty: bool,
}

/// Interpret the positional input.
///
/// Valid JSON is used as-is (so `8080` is a number and `{...}` an object);
/// anything else is taken as a bare string.
pub fn parse_input(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
