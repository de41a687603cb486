//! Ranking, ordering, and running-extremum primitives.
//!
//! NaN handling follows one convention throughout: NaN sorts above every
//! number, and any reduction that touches a NaN yields NaN.

use std::cmp::Ordering;

/// Ascending comparison in which NaN compares greater than every number.
///
/// Two NaNs compare equal, so this is a total order usable with `sort_by`.
pub fn cmp_nan_last(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Indices that sort `values` ascending (stable; NaN last).
pub fn argsort_ascending(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| cmp_nan_last(values[a], values[b]));
    idx
}

/// Indices that sort `values` descending: the ascending order reversed, so
/// NaN entries come first.
pub fn argsort_descending(values: &[f64]) -> Vec<usize> {
    let mut idx = argsort_ascending(values);
    idx.reverse();
    idx
}

/// Inverse of a permutation: `inv[perm[k]] == k`.
///
/// `perm` must be a permutation of `0..perm.len()`.
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (k, &p) in perm.iter().enumerate() {
        inv[p] = k;
    }
    inv
}

/// 1-based ranks where every member of a tie group receives the largest
/// rank of the group.
///
/// `[3.0, 1.0, 3.0, 2.0]` ranks as `[4, 1, 4, 2]`. NaNs rank above all
/// numbers and tie with each other.
pub fn rank_max_ties(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    let order = argsort_ascending(values);
    let mut ranks = vec![0; n];

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && cmp_nan_last(values[order[end]], values[order[start]]) == Ordering::Equal
        {
            end += 1;
        }
        for &i in &order[start..end] {
            ranks[i] = end;
        }
        start = end;
    }
    ranks
}

/// Minimum of two values that propagates NaN from either side.
#[inline]
pub fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Running minimum: `out[k] = min(values[0..=k])`, NaN-propagating.
pub fn running_min(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut acc = f64::INFINITY;
    for &v in values {
        acc = nan_min(acc, v);
        out.push(acc);
    }
    out
}

/// Clip every entry to at most `ceiling`, leaving NaN untouched.
pub fn clip_upper(values: &mut [f64], ceiling: f64) {
    for v in values.iter_mut() {
        if *v > ceiling {
            *v = ceiling;
        }
    }
}

/// Step-down monotonization.
///
/// Orders `values` descending, takes the running minimum along that order,
/// and maps the result back to the original positions.
pub fn step_down_min(values: &[f64]) -> Vec<f64> {
    let order = argsort_descending(values);
    let sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();
    let cummin = running_min(&sorted);
    let inverse = invert_permutation(&order);
    inverse.iter().map(|&k| cummin[k]).collect()
}
