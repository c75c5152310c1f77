//! Centralized constants for the optschema workspace.
//!
//! This module contains the fixed names and defaults shared by the resolver,
//! the server preset and the command-line front end.

// =============================================================================
// Error Codes
// =============================================================================

/// Namespace prefix of every built-in classification code.
///
/// The final path segment names the classification kind, e.g.
/// `/server/options/type`.
pub const CODE_PREFIX: &str = "/server/options";

// =============================================================================
// Schema Conventions
// =============================================================================

/// Key that names the root receiver in a data-only schema document.
pub const ROOT_KEY: &str = "__root";

/// Reserved environment variable carrying the runtime environment name.
pub const RESERVED_ENV_KEY: &str = "NODE_ENV";

/// Schema field name that holds the runtime environment when declared.
pub const ENVIRONMENT_FIELD: &str = "env";

// =============================================================================
// Server Preset Defaults
// =============================================================================

/// Default listening port of the server preset.
pub const DEFAULT_PORT: u16 = 3000;

/// Default public (static files) directory, relative to the base directory.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default views directory, relative to the base directory.
pub const DEFAULT_VIEWS_DIR: &str = "views";
