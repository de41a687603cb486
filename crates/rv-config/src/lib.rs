//! rvalue configuration loading and validation.
//!
//! This crate provides:
//! - Typed structs for the tuning parameters and solver settings
//! - JSON and TOML config files with schema-version checks
//! - Config resolution (CLI → env → XDG → defaults)
//! - JSON Schema export

pub mod params;
pub mod resolve;
pub mod settings;
pub mod validate;

pub use params::{NonConvergencePolicy, SolverSettings, TuningParams};
pub use resolve::{resolve_config, ConfigPaths, ConfigSource, ResolvedConfig, CONFIG_ENV};
pub use settings::RValueConfig;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = rv_common::SCHEMA_VERSION;
