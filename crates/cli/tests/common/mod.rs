//! Shared test utilities for optschema integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//!
//! Invariants / Assumptions:
//! - The child process starts from an empty environment, so host variables such
//!   as `PORT` or `NODE_ENV` never leak into resolution.

use assert_cmd::Command;

/// Returns a hermetic `optschema` command for integration testing.
///
/// It ensures:
/// - The inherited environment is cleared.
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `--base-dir /srv/app` is passed so path options are predictable.
pub fn optschema_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("optschema");
    cmd.env_clear();
    cmd.env("DOTENV_DISABLED", "1");
    cmd.args(["--base-dir", "/srv/app"]);
    cmd
}
