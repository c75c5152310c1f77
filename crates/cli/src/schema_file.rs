//! Schema file loading.
//!
//! Responsibilities:
//! - Read a data-only schema from a JSON or YAML file.
//!
//! Invariants:
//! - `.yaml` and `.yml` files are parsed as YAML; everything else as JSON.
//! - Key order in the file is the field declaration order.

use anyhow::{Context, Result};
use std::path::Path;

use optschema_config::Schema;

pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file at {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let schema = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML schema at {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON schema at {}", path.display()))?
    };

    tracing::debug!(path = %path.display(), "loaded schema file");
    Ok(schema)
}
