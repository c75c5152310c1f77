//! The web server option schema and its typed view.
//!
//! Responsibilities:
//! - Build the schema used by the server: `port` (root receiver), `public`,
//!   `views` and the runtime `env`.
//! - Provide `ServerOptions`, a typed struct deserialized from a resolution.
//!
//! Does NOT handle:
//! - Starting a server or touching the filesystem; `base_dir` is supplied by the
//!   caller and only used to build absolute paths.

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_VIEWS_DIR, ENVIRONMENT_FIELD, RESERVED_ENV_KEY,
};
use crate::environment::Environment;
use crate::kind::Kind;
use crate::schema::{FieldDescriptor, Schema};
use crate::transform::PathJoin;
use crate::validator::validate_with;

/// Schema of the web server options.
///
/// A bare number passed as the input is taken as the port. `public` may be set
/// to `false` to disable static files; `true` is rejected.
///
/// `public` and `views` are only joined onto `base_dir`. They are not suffixed
/// with the environment name, because one deployment serves the same assets in
/// every environment. Schemas that need per-environment directories can add
/// [`EnvSuffix`](crate::transform::EnvSuffix) to those fields.
pub fn server_schema(base_dir: impl AsRef<Path>) -> Schema {
    let base_dir = base_dir.as_ref();
    Schema::new()
        .field(
            "port",
            FieldDescriptor::new()
                .default_value(DEFAULT_PORT)
                .kind(Kind::Number),
        )
        .field(
            "public",
            FieldDescriptor::new()
                .default_value(DEFAULT_PUBLIC_DIR)
                .kinds([Kind::String, Kind::Boolean])
                .validator(validate_with(|value| {
                    !matches!(value, Some(Value::Bool(true)))
                }))
                .transform(PathJoin::new(base_dir)),
        )
        .field(
            "views",
            FieldDescriptor::new()
                .default_value(DEFAULT_VIEWS_DIR)
                .kind(Kind::String)
                .transform(PathJoin::new(base_dir)),
        )
        .field(
            ENVIRONMENT_FIELD,
            FieldDescriptor::new()
                .env_key(RESERVED_ENV_KEY)
                .default_value(Environment::default().as_str())
                .kind(Kind::String)
                .one_of(Environment::enum_values())
                .arg(false),
        )
        .with_root("port")
}

/// Static file directory setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPublicDir")]
pub enum PublicDir {
    Path(PathBuf),
    Disabled,
}

impl PublicDir {
    pub fn path(&self) -> Option<&Path> {
        match self {
            PublicDir::Path(path) => Some(path),
            PublicDir::Disabled => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPublicDir {
    Path(PathBuf),
    Flag(bool),
}

impl TryFrom<RawPublicDir> for PublicDir {
    type Error = &'static str;

    fn try_from(raw: RawPublicDir) -> Result<Self, Self::Error> {
        match raw {
            RawPublicDir::Path(path) => Ok(PublicDir::Path(path)),
            RawPublicDir::Flag(false) => Ok(PublicDir::Disabled),
            RawPublicDir::Flag(true) => Err("public may be a path or false, not true"),
        }
    }
}

/// Typed web server options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerOptions {
    pub port: u16,
    pub public: PublicDir,
    pub views: PathBuf,
    pub env: Environment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_schema_shape() {
        let schema = server_schema("/srv/app");
        let names: Vec<_> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["port", "public", "views", "env"]);
        assert_eq!(schema.root().map(|(name, _)| name), Some("port"));

        let env = schema.get("env").unwrap();
        assert!(!env.allows_arg());
        assert_eq!(env.env_key_for("env"), Some("NODE_ENV".to_string()));
    }

    #[test]
    fn test_public_dir_from_json() {
        let path: PublicDir = serde_json::from_str(r#""/srv/app/public""#).unwrap();
        assert_eq!(path.path(), Some(Path::new("/srv/app/public")));

        let disabled: PublicDir = serde_json::from_str("false").unwrap();
        assert_eq!(disabled, PublicDir::Disabled);
        assert!(disabled.path().is_none());

        assert!(serde_json::from_str::<PublicDir>("true").is_err());
    }
}
