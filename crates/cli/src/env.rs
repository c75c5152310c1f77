//! Process environment handling for the CLI.
//!
//! Responsibilities:
//! - Load `.env` files, gated by `DOTENV_DISABLED`.
//! - Snapshot the process environment into the mapping handed to the resolver.
//!
//! Does NOT handle:
//! - Deciding which variables matter; the schema does that.
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Snapshot values are trimmed (leading/trailing whitespace removed).
//! - Variables whose name or value is not valid UTF-8 are skipped.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use optschema_config::EnvMapping;

/// Failures while loading a `.env` file.
#[derive(Error, Debug)]
pub enum DotenvError {
    /// SAFETY: only the byte index of the parse failure is kept, not the line.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    Parse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    Io { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    Unknown,
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from a `.env` file in the working directory.
///
/// Missing files are silently ignored.
pub fn load_dotenv() -> Result<(), DotenvError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(io_err)) if io_err.kind() == ErrorKind::NotFound => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(DotenvError::Parse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(DotenvError::Io {
            kind: io_err.kind(),
        }),
        Err(_) => Err(DotenvError::Unknown),
    }
}

/// Normalize a raw variable value, returning None if empty or whitespace-only.
fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Snapshot the process environment.
pub fn snapshot() -> EnvMapping {
    std::env::vars_os()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            let value = normalize(value.into_string().ok()?)?;
            Some((key, value))
        })
        .collect()
}
