//! Exit codes for the rvalue CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.
//! These are stable.

use rv_common::Error;

/// Exit codes for rvalue operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Configuration error
    ConfigError = 10,

    /// Malformed or invalid study data
    InputError = 11,

    /// Numerical failure (non-convergence under the `fail` policy)
    ComputeError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Exit code for an error surfaced to the CLI.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidParameter { .. } | Error::SchemaValidation(_) => {
                ExitCode::ConfigError
            }
            Error::InvalidInput(_)
            | Error::LengthMismatch { .. }
            | Error::TooFewPrimaryTests { .. }
            | Error::Json(_) => ExitCode::InputError,
            Error::Numerical(_) | Error::NonConvergence { .. } => ExitCode::ComputeError,
            Error::Io(_) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
