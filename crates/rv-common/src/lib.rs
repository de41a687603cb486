//! rvalue common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the rvalue crates:
//! - Unified error type with stable error codes
//! - Run identifiers and schema versioning for reports
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use id::RunId;
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
