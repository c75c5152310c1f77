//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map resolver failures to the options exit code.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display and `ErrorReport`).
//!
//! Invariants:
//! - Exit code 5 always means the options were rejected by the resolver.

use optschema_config::OptionsError;

/// Structured exit codes for optschema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - options resolved and printed.
    Success = 0,

    /// General error - unreadable schema file, bad `.env`, output failure.
    GeneralError = 1,

    /// Options error - the resolver rejected the input.
    ///
    /// Scripts should match on the `code` printed to stderr.
    OptionsError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Extension trait to get an exit code from an error.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        if self.downcast_ref::<OptionsError>().is_some() {
            ExitCode::OptionsError
        } else {
            ExitCode::GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::OptionsError.as_i32(), 5);
    }

    #[test]
    fn test_options_error_maps_to_options_exit_code() {
        let err = anyhow::Error::new(OptionsError::Required {
            field: "token".to_string(),
        });
        assert_eq!(err.exit_code(), ExitCode::OptionsError);

        let err = anyhow::anyhow!("schema file missing");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
