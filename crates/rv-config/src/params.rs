//! Tuning and solver parameter types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validate::{ValidationError, ValidationResult};

/// Weights of the two-stage r-value statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuningParams {
    /// Emphasis given to the follow-up study, in (0, 1).
    pub c2: f64,
    /// Lower bound on the fraction of primary-study features that are null
    /// in both studies, in [0, 1).
    pub l00: f64,
}

impl TuningParams {
    pub fn new(c2: f64, l00: f64) -> ValidationResult<Self> {
        let params = Self { c2, l00 };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if !(self.c2 > 0.0 && self.c2 < 1.0) {
            return Err(ValidationError::invalid(
                "c2",
                format!("must lie in (0, 1), got {}", self.c2),
            ));
        }
        if !(self.l00 >= 0.0 && self.l00 < 1.0) {
            return Err(ValidationError::invalid(
                "l00",
                format!("must lie in [0, 1), got {}", self.l00),
            ));
        }
        Ok(())
    }
}

impl Default for TuningParams {
    fn default() -> Self {
        Self { c2: 0.5, l00: 0.8 }
    }
}

/// What to do when a feature's root search does not converge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NonConvergencePolicy {
    /// Use the best point the search reached and keep going.
    #[default]
    BestEffort,
    /// Abort the whole computation.
    Fail,
}

impl fmt::Display for NonConvergencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonConvergencePolicy::BestEffort => write!(f, "best_effort"),
            NonConvergencePolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for NonConvergencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best_effort" | "best-effort" => Ok(NonConvergencePolicy::BestEffort),
            "fail" => Ok(NonConvergencePolicy::Fail),
            other => Err(format!(
                "unknown non-convergence policy '{other}' (expected best_effort or fail)"
            )),
        }
    }
}

/// Settings for the per-feature fixed-point search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SolverSettings {
    /// Starting point of every root search.
    pub initial_guess: f64,
    /// Loosest tolerance ever used. The effective tolerance is the smaller of
    /// this and the smallest observed p-value.
    pub tolerance_ceiling: f64,
    /// Residual evaluations allowed per feature.
    pub max_evaluations: usize,
    pub on_nonconvergence: NonConvergencePolicy,
}

impl SolverSettings {
    pub fn validate(&self) -> ValidationResult<()> {
        if !(0.0..=1.0).contains(&self.initial_guess) {
            return Err(ValidationError::invalid(
                "solver.initial_guess",
                format!("must lie in [0, 1], got {}", self.initial_guess),
            ));
        }
        if !(self.tolerance_ceiling > 0.0 && self.tolerance_ceiling.is_finite()) {
            return Err(ValidationError::invalid(
                "solver.tolerance_ceiling",
                format!("must be positive and finite, got {}", self.tolerance_ceiling),
            ));
        }
        if self.max_evaluations < 2 {
            return Err(ValidationError::invalid(
                "solver.max_evaluations",
                format!("must be at least 2, got {}", self.max_evaluations),
            ));
        }
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: 0.5,
            tolerance_ceiling: 1e-4,
            max_evaluations: 200,
            on_nonconvergence: NonConvergencePolicy::BestEffort,
        }
    }
}
