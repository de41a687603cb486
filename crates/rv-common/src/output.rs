//! Output format specifications.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Full machine-readable report.
    #[default]
    Json,
    /// Human-readable table with a summary line.
    Summary,
    /// One r-value per line, in input order.
    Plain,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Summary => "summary",
            OutputFormat::Plain => "plain",
        };
        f.write_str(s)
    }
}
