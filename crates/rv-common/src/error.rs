//! Error types for rvalue.

use thiserror::Error;

/// Result type alias for rvalue operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for rvalue.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid tuning parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    // Input errors (20-29)
    #[error("invalid study data: {0}")]
    InvalidInput(String),

    #[error("p1 and p2 differ in length: {p1_len} vs {p2_len}")]
    LengthMismatch { p1_len: usize, p2_len: usize },

    #[error("primary test count m={m} is smaller than the {n} selected features")]
    TooFewPrimaryTests { m: usize, n: usize },

    // Numerical errors (30-39)
    #[error("numerical failure: {0}")]
    Numerical(String),

    #[error("root search did not converge for feature {feature}: {reason}")]
    NonConvergence { feature: usize, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidParameter { .. } => 11,
            Error::SchemaValidation(_) => 12,
            Error::InvalidInput(_) => 20,
            Error::LengthMismatch { .. } => 21,
            Error::TooFewPrimaryTests { .. } => 22,
            Error::Numerical(_) => 30,
            Error::NonConvergence { .. } => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// True for errors caused by the caller's configuration.
    pub fn is_config(&self) -> bool {
        (10..20).contains(&self.code())
    }

    /// True for errors caused by malformed study data.
    pub fn is_input(&self) -> bool {
        (20..30).contains(&self.code())
    }
}
