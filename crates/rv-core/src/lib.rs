//! rvalue core: FDR r-values for two-stage replication studies.
//!
//! Implements the r-value of Heller, Bogomolov & Benjamini (2014): for
//! features selected from a primary study of `m` tests and re-tested in a
//! follow-up study, the smallest FDR level at which each feature's
//! replication is declared significant.
//!
//! ```
//! use rv_core::{fdr_rvalue, TuningParams};
//!
//! let r = fdr_rvalue(&[0.001, 0.01, 0.2], &[0.001, 0.02, 0.5], 10, TuningParams::default())?;
//! assert!(r[0] <= r[1] && r[1] <= r[2]);
//! # Ok::<(), rv_common::Error>(())
//! ```

pub mod exit_codes;
pub mod logging;
pub mod report;
pub mod solver;
pub mod statistic;
pub mod study;

pub use exit_codes::ExitCode;
pub use report::RValueReport;
pub use rv_config::{NonConvergencePolicy, SolverSettings, TuningParams};
pub use solver::{
    fdr_rvalue, root_tolerance, FeatureRValue, RValueMethod, RValueSolution, RValueSolver,
};
pub use statistic::ReplicabilityStatistic;
pub use study::{StudyData, StudyInput};
