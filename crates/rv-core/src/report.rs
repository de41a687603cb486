//! Report assembly and rendering for the CLI.

use chrono::{DateTime, Utc};
use rv_common::{RunId, SCHEMA_VERSION};
use rv_config::{SolverSettings, TuningParams};
use serde::Serialize;
use std::fmt::Write as _;

use crate::solver::{RValueMethod, RValueSolution};
use crate::study::StudyData;

/// Per-feature row of a report.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub p1: f64,
    pub p2: f64,
    pub rvalue: f64,
    pub method: RValueMethod,
}

/// Counts by solution method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub boundary: usize,
    pub searched: usize,
    pub unconverged: usize,
    pub failed: usize,
}

/// Complete r-value report.
#[derive(Debug, Clone, Serialize)]
pub struct RValueReport {
    pub schema_version: String,
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the study data.
    pub input_digest: String,
    pub n: usize,
    pub m: usize,
    pub params: TuningParams,
    pub solver: SolverSettings,
    pub tolerance: f64,
    pub summary: ReportSummary,
    pub features: Vec<FeatureRow>,
}

impl RValueReport {
    pub fn build(
        study: &StudyData,
        labels: Option<Vec<String>>,
        params: TuningParams,
        solver: SolverSettings,
        solution: RValueSolution,
    ) -> Self {
        let summary = ReportSummary {
            boundary: solution.boundary_count(),
            searched: solution.searched_count(),
            unconverged: solution.unconverged_count(),
            failed: solution.failed_count(),
        };
        let mut labels = labels.map(|l| l.into_iter());
        let features = solution
            .features
            .into_iter()
            .map(|f| FeatureRow {
                index: f.index,
                label: labels.as_mut().and_then(|l| l.next()),
                p1: study.p1()[f.index],
                p2: study.p2()[f.index],
                rvalue: f.rvalue,
                method: f.method,
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            run_id: RunId::new(),
            generated_at: Utc::now(),
            input_digest: study.digest(),
            n: study.len(),
            m: study.m(),
            params,
            solver,
            tolerance: solution.tolerance,
            summary,
            features,
        }
    }

    /// One r-value per line, input order.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for row in &self.features {
            let _ = writeln!(out, "{}", row.rvalue);
        }
        out
    }

    /// Aligned table followed by a one-line summary.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>6}  {:<16}  {:>12}  {:>12}  {:>12}  method",
            "index", "label", "p1", "p2", "rvalue"
        );
        for row in &self.features {
            let method = match &row.method {
                RValueMethod::Boundary => "boundary".to_string(),
                RValueMethod::RootSearch {
                    evaluations,
                    converged: true,
                    ..
                } => format!("search ({evaluations} evals)"),
                RValueMethod::RootSearch { evaluations, .. } => {
                    format!("search ({evaluations} evals, not converged)")
                }
                RValueMethod::Failed { reason } => format!("failed: {reason}"),
            };
            let _ = writeln!(
                out,
                "{:>6}  {:<16}  {:>12.6e}  {:>12.6e}  {:>12.6}  {}",
                row.index,
                row.label.as_deref().unwrap_or("-"),
                row.p1,
                row.p2,
                row.rvalue,
                method
            );
        }
        let _ = writeln!(
            out,
            "{} features (m = {}), tolerance {:e}: {} boundary, {} searched, {} unconverged, {} failed",
            self.n,
            self.m,
            self.tolerance,
            self.summary.boundary,
            self.summary.searched,
            self.summary.unconverged,
            self.summary.failed
        );
        out
    }
}
