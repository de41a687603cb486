//! Configuration validation errors.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: String, expected: String },

    #[error("invalid {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

impl From<ValidationError> for rv_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) | ValidationError::ParseError(msg) => {
                rv_common::Error::Config(msg)
            }
            ValidationError::SchemaVersion { .. } => {
                rv_common::Error::SchemaValidation(err.to_string())
            }
            ValidationError::InvalidValue { field, message } => {
                rv_common::Error::InvalidParameter { field, message }
            }
        }
    }
}
