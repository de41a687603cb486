//! Scalar root finding.
//!
//! `find_root` solves `f(x) = 0` from a single starting point. The first step
//! uses a forward-difference derivative; later steps update the slope from the
//! two most recent iterates (the one-dimensional Broyden update, i.e. secant).
//! Once a sign change has been seen the iterate is kept inside the bracket and
//! the method falls back to bisection whenever a secant step leaves it or
//! fails to halve the residual.
//!
//! Convergence is declared when a residual is exactly zero, when the bracket
//! width drops to `xtol` relative to its endpoints or can no longer be split,
//! or when a relative step `|dx| <= xtol * |x|` lands on a residual no larger
//! than `ftol`. A tiny step alone is not enough: across a jump in `f` the
//! secant slope blows up and the step shrinks while `|f|` stays large.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for [`find_root`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootOptions {
    /// Relative step tolerance.
    pub xtol: f64,
    /// Largest residual accepted together with a small step.
    pub ftol: f64,
    /// Maximum number of residual evaluations, derivative probes included.
    pub max_evaluations: usize,
    /// Optional closed interval every iterate is clamped into.
    pub bounds: Option<(f64, f64)>,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            xtol: 1.49012e-8,
            ftol: 1.49012e-8,
            max_evaluations: 200,
            bounds: None,
        }
    }
}

impl RootOptions {
    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.xtol = xtol;
        self
    }

    pub fn with_ftol(mut self, ftol: f64) -> Self {
        self.ftol = ftol;
        self
    }

    pub fn with_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.bounds = Some((lo, hi));
        self
    }

    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    pub fn validate(&self) -> Result<(), RootError> {
        if !(self.xtol >= 0.0 && self.xtol.is_finite()) {
            return Err(RootError::InvalidOptions(format!(
                "xtol must be finite and non-negative, got {}",
                self.xtol
            )));
        }
        if !(self.ftol >= 0.0 && self.ftol.is_finite()) {
            return Err(RootError::InvalidOptions(format!(
                "ftol must be finite and non-negative, got {}",
                self.ftol
            )));
        }
        if self.max_evaluations == 0 {
            return Err(RootError::InvalidOptions(
                "max_evaluations must be at least 1".to_string(),
            ));
        }
        if let Some((lo, hi)) = self.bounds {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(RootError::InvalidOptions(format!(
                    "bounds must satisfy lo <= hi, got ({lo}, {hi})"
                )));
            }
        }
        Ok(())
    }
}

/// A point returned by the root finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootSolution {
    pub root: f64,
    pub residual: f64,
    pub evaluations: usize,
}

/// Root finding failures. Variants that stop mid-search carry the best point
/// seen so far (smallest `|f|`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootError {
    #[error("invalid root options: {0}")]
    InvalidOptions(String),

    #[error("residual is not finite at x={x} after {evaluations} evaluations")]
    NonFiniteResidual { x: f64, evaluations: usize },

    #[error(
        "no convergence within {} evaluations (best x={}, residual={})",
        .best.evaluations, .best.root, .best.residual
    )]
    MaxEvaluations { best: RootSolution },

    #[error("search stalled with zero slope and no bracket (best x={}, residual={})", .best.root, .best.residual)]
    Stalled { best: RootSolution },
}

impl RootError {
    /// Best point reached before the search stopped, if any.
    pub fn best(&self) -> Option<RootSolution> {
        match self {
            RootError::MaxEvaluations { best } | RootError::Stalled { best } => Some(*best),
            _ => None,
        }
    }
}

struct Tracker<F> {
    f: F,
    max_evaluations: usize,
    evaluations: usize,
    best: Option<(f64, f64)>,
    positive: Option<(f64, f64)>,
    negative: Option<(f64, f64)>,
}

impl<F: FnMut(f64) -> f64> Tracker<F> {
    fn eval(&mut self, x: f64) -> Result<f64, RootError> {
        if self.evaluations >= self.max_evaluations {
            return Err(RootError::MaxEvaluations {
                best: self.best_solution(),
            });
        }
        self.evaluations += 1;
        let fx = (self.f)(x);
        if !fx.is_finite() {
            return Err(RootError::NonFiniteResidual {
                x,
                evaluations: self.evaluations,
            });
        }
        if self.best.map_or(true, |(_, fb)| fx.abs() < fb.abs()) {
            self.best = Some((x, fx));
        }
        if fx > 0.0 {
            self.positive = Some((x, fx));
        } else if fx < 0.0 {
            self.negative = Some((x, fx));
        }
        Ok(fx)
    }

    fn bracket(&self) -> Option<(f64, f64)> {
        let (xp, _) = self.positive?;
        let (xn, _) = self.negative?;
        Some((xp.min(xn), xp.max(xn)))
    }

    fn solution(&self, x: f64, fx: f64) -> RootSolution {
        RootSolution {
            root: x,
            residual: fx,
            evaluations: self.evaluations,
        }
    }

    fn best_solution(&self) -> RootSolution {
        let (x, fx) = self.best.unwrap_or((f64::NAN, f64::NAN));
        self.solution(x, fx)
    }

    /// The bracket endpoint with the smaller residual.
    fn bracket_solution(&self) -> RootSolution {
        match (self.positive, self.negative) {
            (Some((xp, fp)), Some((_, fn_))) if fp.abs() < fn_.abs() => self.solution(xp, fp),
            (_, Some((xn, fn_))) => self.solution(xn, fn_),
            _ => self.best_solution(),
        }
    }

    /// Forward-difference slope at `x`, stepping backwards when the forward
    /// point would leave the bounds.
    fn difference_slope(&mut self, x: f64, fx: f64, hi: f64) -> Result<f64, RootError> {
        let mut h = f64::EPSILON.sqrt() * x.abs();
        if h == 0.0 {
            h = f64::EPSILON.sqrt();
        }
        if x + h > hi {
            h = -h;
        }
        let fh = self.eval(x + h)?;
        Ok((fh - fx) / h)
    }
}

/// Solve `f(x) = 0` starting from `x0`.
pub fn find_root<F>(f: F, x0: f64, options: &RootOptions) -> Result<RootSolution, RootError>
where
    F: FnMut(f64) -> f64,
{
    options.validate()?;
    if !x0.is_finite() {
        return Err(RootError::InvalidOptions(format!(
            "initial guess must be finite, got {x0}"
        )));
    }
    let (lo, hi) = options
        .bounds
        .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));

    let mut t = Tracker {
        f,
        max_evaluations: options.max_evaluations,
        evaluations: 0,
        best: None,
        positive: None,
        negative: None,
    };

    let mut x = x0.clamp(lo, hi);
    let mut fx = t.eval(x)?;
    if fx == 0.0 {
        return Ok(t.solution(x, fx));
    }
    let mut slope = t.difference_slope(x, fx, hi)?;
    // Whether `slope` was probed at `x` rather than carried from a secant.
    let mut local_slope = true;
    let mut bisect = false;
    let mut probed = (false, false);

    loop {
        let newton = if slope.is_finite() && slope != 0.0 {
            x - fx / slope
        } else {
            f64::NAN
        };

        let next = match t.bracket() {
            Some((a, b)) => {
                let mid = a + (b - a) / 2.0;
                if mid <= a || mid >= b {
                    // Adjacent floats: nothing left to split.
                    return Ok(t.bracket_solution());
                }
                if bisect || !(newton > a && newton < b) {
                    mid
                } else {
                    newton
                }
            }
            // Zero slope and no sign change yet: look at the bounds.
            None if newton.is_nan() => match probed {
                (false, _) if lo.is_finite() && lo != x => {
                    probed.0 = true;
                    lo
                }
                (_, false) if hi.is_finite() && hi != x => {
                    probed.1 = true;
                    hi
                }
                _ => {
                    return Err(RootError::Stalled {
                        best: t.best_solution(),
                    })
                }
            },
            None => newton.clamp(lo, hi),
        };

        let dx = next - x;
        if dx == 0.0 {
            if t.bracket().is_some() {
                return Ok(t.bracket_solution());
            }
            if newton == x {
                // The step rounds away to nothing at this precision.
                if fx.abs() <= options.ftol {
                    return Ok(t.solution(x, fx));
                }
                if !local_slope {
                    // The secant spans a jump; re-probe the slope at `x`.
                    slope = t.difference_slope(x, fx, hi)?;
                    local_slope = true;
                    continue;
                }
            }
            return Err(RootError::Stalled {
                best: t.best_solution(),
            });
        }

        let f_next = t.eval(next)?;
        let small_step = dx.abs() <= options.xtol * next.abs();
        if f_next == 0.0 || (small_step && f_next.abs() <= options.ftol) {
            return Ok(t.solution(next, f_next));
        }
        if let Some((a, b)) = t.bracket() {
            if b - a <= options.xtol * a.abs().max(b.abs()) {
                return Ok(t.bracket_solution());
            }
        }

        bisect = f_next.abs() > 0.5 * fx.abs();
        let secant = (f_next - fx) / dx;
        x = next;
        fx = f_next;
        local_slope = !(secant.is_finite() && secant != 0.0);
        slope = if local_slope {
            t.difference_slope(x, fx, hi)?
        } else {
            secant
        };
    }
}
