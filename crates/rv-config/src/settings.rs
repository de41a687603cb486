//! Complete rvalue configuration file.
//!
//! Config files are JSON or TOML; the format is chosen by file extension
//! (`.toml` is TOML, anything else is JSON).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::params::{SolverSettings, TuningParams};
use crate::validate::{ValidationError, ValidationResult};
use crate::CONFIG_SCHEMA_VERSION;

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RValueConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub params: TuningParams,

    #[serde(default)]
    pub solver: SolverSettings,
}

impl Default for RValueConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            params: TuningParams::default(),
            solver: SolverSettings::default(),
        }
    }
}

impl RValueConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::parse_toml(&content)?,
            _ => Self::parse_json(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a JSON string (no semantic validation).
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Parse a config from a TOML string (no semantic validation).
    pub fn parse_toml(text: &str) -> ValidationResult<Self> {
        toml::from_str(text).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Schema-version and semantic validation.
    pub fn validate(&self) -> ValidationResult<()> {
        if !rv_common::schema::is_compatible(&self.schema_version) {
            return Err(ValidationError::SchemaVersion {
                found: self.schema_version.clone(),
                expected: CONFIG_SCHEMA_VERSION.to_string(),
            });
        }
        self.params.validate()?;
        self.solver.validate()
    }

    /// JSON Schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(RValueConfig)
    }
}
