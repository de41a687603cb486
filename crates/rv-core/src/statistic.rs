//! The r-value statistic `e(x)`.
//!
//! For a candidate FDR level `x`, each feature gets the larger of its
//! primary-study score `m * p1 / c1(x)` and follow-up score `n * p2 / c2`,
//! divided by its max-tie rank among all features, step-down monotonized and
//! clipped to at most 1. The r-value of feature `i` is the fixed point
//! `e(x)[i] == x`.

use rv_config::TuningParams;
use rv_math::{clip_upper, rank_max_ties, step_down_min};

use crate::study::StudyData;

/// `e(x)` bound to one study and one set of tuning parameters.
#[derive(Debug, Clone, Copy)]
pub struct ReplicabilityStatistic<'a> {
    study: &'a StudyData,
    params: TuningParams,
}

#[inline]
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

impl<'a> ReplicabilityStatistic<'a> {
    pub fn new(study: &'a StudyData, params: TuningParams) -> Self {
        Self { study, params }
    }

    pub fn study(&self) -> &'a StudyData {
        self.study
    }

    pub fn params(&self) -> TuningParams {
        self.params
    }

    /// Weight `c1(x) = (1 - c2) / (1 - l00 * (1 - c2 * x))` of the primary
    /// study at level `x`.
    pub fn primary_weight(&self, x: f64) -> f64 {
        let TuningParams { c2, l00 } = self.params;
        (1.0 - c2) / (1.0 - l00 * (1.0 - c2 * x))
    }

    /// Per-feature `max(m * p1 / c1, n * p2 / c2)` before ranking.
    pub fn raw_scores(&self, x: f64) -> Vec<f64> {
        let c1 = self.primary_weight(x);
        let c2 = self.params.c2;
        let m = self.study.m() as f64;
        let r1 = self.study.len() as f64;
        self.study
            .p1()
            .iter()
            .zip(self.study.p2())
            .map(|(&p1, &p2)| nan_max(m * p1 / c1, r1 * p2 / c2))
            .collect()
    }

    /// Full vector `e(x)`, one entry per feature, each at most 1.
    pub fn evaluate(&self, x: f64) -> Vec<f64> {
        let raw = self.raw_scores(x);
        let ranks = rank_max_ties(&raw);
        let scaled: Vec<f64> = raw
            .iter()
            .zip(&ranks)
            .map(|(&r, &k)| r / k as f64)
            .collect();
        let mut e = step_down_min(&scaled);
        clip_upper(&mut e, 1.0);
        e
    }

    /// Fixed-point residual `g(x, i) = e(x)[i] - x`.
    ///
    /// Recomputes the whole vector for a single entry; callers solving many
    /// features at the same `x` pay for it once per feature.
    pub fn residual(&self, x: f64, i: usize) -> f64 {
        self.evaluate(x)[i] - x
    }
}
