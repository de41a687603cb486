//! Per-feature r-value solver.
//!
//! The r-value of feature `i` is the `x` in `[0, 1]` with `e(x)[i] == x`.
//! When `e(1)[i] >= 1` the fixed point lies at or beyond 1 and the r-value
//! is 1 without a search. Otherwise `g(x) = e(x)[i] - x` is solved with
//! [`rv_math::find_root`] from the configured initial guess.
//!
//! One tolerance, `min(min(p1 ∪ p2), tolerance_ceiling)`, is shared by every
//! feature, so a single tiny p-value tightens all searches. It bounds both the
//! relative step and the residual a search may stop at; `e(x)` jumps where
//! ranks change, so a root may also be a sign change of that width.

use rv_common::{Error, Result};
use rv_config::{NonConvergencePolicy, SolverSettings, TuningParams};
use rv_math::{find_root, RootError, RootOptions};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::statistic::ReplicabilityStatistic;
use crate::study::StudyData;

/// Shared root-search tolerance: the smallest p-value in either study, but
/// never looser than `ceiling`.
pub fn root_tolerance(p1: &[f64], p2: &[f64], ceiling: f64) -> f64 {
    p1.iter().chain(p2).copied().fold(ceiling, f64::min)
}

/// How a feature's r-value was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RValueMethod {
    /// `e(1) >= 1`: r-value is exactly 1.
    Boundary,
    /// Root search; `converged == false` means the best point reached was used.
    RootSearch {
        evaluations: usize,
        residual: f64,
        converged: bool,
    },
    /// The search produced no usable point; r-value is NaN.
    Failed { reason: String },
}

/// One feature's r-value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRValue {
    pub index: usize,
    pub rvalue: f64,
    pub method: RValueMethod,
}

/// All features' r-values plus the tolerance they were solved at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RValueSolution {
    pub tolerance: f64,
    pub features: Vec<FeatureRValue>,
}

impl RValueSolution {
    /// r-values in feature order.
    pub fn values(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.rvalue).collect()
    }

    pub fn boundary_count(&self) -> usize {
        self.count(|m| matches!(m, RValueMethod::Boundary))
    }

    pub fn searched_count(&self) -> usize {
        self.count(|m| matches!(m, RValueMethod::RootSearch { .. }))
    }

    pub fn unconverged_count(&self) -> usize {
        self.count(|m| matches!(m, RValueMethod::RootSearch { converged: false, .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|m| matches!(m, RValueMethod::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&RValueMethod) -> bool) -> usize {
        self.features.iter().filter(|f| pred(&f.method)).count()
    }
}

/// Solver over one study.
#[derive(Debug, Clone)]
pub struct RValueSolver<'a> {
    statistic: ReplicabilityStatistic<'a>,
    settings: SolverSettings,
}

impl<'a> RValueSolver<'a> {
    pub fn new(study: &'a StudyData, params: TuningParams, settings: SolverSettings) -> Self {
        Self {
            statistic: ReplicabilityStatistic::new(study, params),
            settings,
        }
    }

    pub fn statistic(&self) -> &ReplicabilityStatistic<'a> {
        &self.statistic
    }

    /// Tolerance shared by every feature's search.
    pub fn tolerance(&self) -> f64 {
        let study = self.statistic.study();
        root_tolerance(study.p1(), study.p2(), self.settings.tolerance_ceiling)
    }

    /// Solve a single feature at the given tolerance.
    pub fn solve_feature(&self, index: usize, tolerance: f64) -> Result<FeatureRValue> {
        let at_one = self.statistic.residual(1.0, index);
        if at_one >= 0.0 {
            debug!(feature = index, "fixed point at or beyond 1");
            return Ok(FeatureRValue {
                index,
                rvalue: 1.0,
                method: RValueMethod::Boundary,
            });
        }

        let options = RootOptions::default()
            .with_xtol(tolerance)
            .with_ftol(tolerance)
            .with_max_evaluations(self.settings.max_evaluations)
            .with_bounds(0.0, 1.0);
        let residual = |x: f64| self.statistic.residual(x, index);

        match find_root(residual, self.settings.initial_guess, &options) {
            Ok(sol) => {
                debug!(
                    feature = index,
                    rvalue = sol.root,
                    evaluations = sol.evaluations,
                    "root search converged"
                );
                Ok(FeatureRValue {
                    index,
                    rvalue: sol.root,
                    method: RValueMethod::RootSearch {
                        evaluations: sol.evaluations,
                        residual: sol.residual,
                        converged: true,
                    },
                })
            }
            Err(RootError::InvalidOptions(msg)) => Err(Error::Numerical(msg)),
            Err(err) => self.handle_failure(index, err),
        }
    }

    fn handle_failure(&self, index: usize, err: RootError) -> Result<FeatureRValue> {
        if self.settings.on_nonconvergence == NonConvergencePolicy::Fail {
            return Err(Error::NonConvergence {
                feature: index,
                reason: err.to_string(),
            });
        }
        warn!(feature = index, error = %err, "root search did not converge");
        Ok(match err.best() {
            Some(best) => FeatureRValue {
                index,
                rvalue: best.root,
                method: RValueMethod::RootSearch {
                    evaluations: best.evaluations,
                    residual: best.residual,
                    converged: false,
                },
            },
            None => FeatureRValue {
                index,
                rvalue: f64::NAN,
                method: RValueMethod::Failed {
                    reason: err.to_string(),
                },
            },
        })
    }

    /// Solve every feature in order.
    pub fn solve(&self) -> Result<RValueSolution> {
        let tolerance = self.tolerance();
        let n = self.statistic.study().len();
        let features = (0..n)
            .map(|i| self.solve_feature(i, tolerance))
            .collect::<Result<Vec<_>>>()?;
        let solution = RValueSolution {
            tolerance,
            features,
        };
        info!(
            features = n,
            tolerance,
            boundary = solution.boundary_count(),
            searched = solution.searched_count(),
            unconverged = solution.unconverged_count(),
            failed = solution.failed_count(),
            "r-values computed"
        );
        Ok(solution)
    }
}

/// FDR r-values of the features selected from a primary study of `m` tests.
///
/// Uses the default solver settings; see [`RValueSolver`] for the detailed
/// per-feature result.
pub fn fdr_rvalue(p1: &[f64], p2: &[f64], m: usize, params: TuningParams) -> Result<Vec<f64>> {
    params.validate()?;
    let study = StudyData::new(p1.to_vec(), p2.to_vec(), m)?;
    let solution = RValueSolver::new(&study, params, SolverSettings::default()).solve()?;
    Ok(solution.values())
}
