//! Run identity.
//!
//! Every computed report carries a `RunId` so that outputs written by
//! separate invocations can be told apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Run ID: unique identifier for one r-value computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a fresh run ID.
    pub fn new() -> Self {
        RunId(format!("rv-{}", Uuid::new_v4().simple()))
    }

    /// Parse and validate a run ID string.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix("rv-")?;
        Uuid::parse_str(hex).ok()?;
        Some(RunId(s.to_string()))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
