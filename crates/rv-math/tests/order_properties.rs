//! Property-based tests for ranking and ordering invariants.

use proptest::prelude::*;
use rv_math::{
    argsort_descending, invert_permutation, rank_max_ties, running_min, step_down_min,
};

fn values_strategy() -> impl Strategy<Value = Vec<f64>> {
    // Coarse grid so that ties are common.
    prop::collection::vec((0u32..20).prop_map(|k| k as f64 / 10.0), 1..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn max_rank_counts_values_at_or_below(values in values_strategy()) {
        let ranks = rank_max_ties(&values);
        for (i, &v) in values.iter().enumerate() {
            let at_or_below = values.iter().filter(|&&w| w <= v).count();
            prop_assert_eq!(ranks[i], at_or_below);
        }
    }

    #[test]
    fn ranks_are_within_one_to_n(values in values_strategy()) {
        let n = values.len();
        for r in rank_max_ties(&values) {
            prop_assert!(r >= 1 && r <= n);
        }
    }

    #[test]
    fn descending_order_is_sorted(values in values_strategy()) {
        let order = argsort_descending(&values);
        for w in order.windows(2) {
            prop_assert!(values[w[0]] >= values[w[1]]);
        }
    }

    #[test]
    fn inverse_composes_to_identity(values in values_strategy()) {
        let order = argsort_descending(&values);
        let inv = invert_permutation(&order);
        for (k, &i) in order.iter().enumerate() {
            prop_assert_eq!(inv[i], k);
        }
    }

    #[test]
    fn running_min_is_non_increasing_and_bounded(values in values_strategy()) {
        let out = running_min(&values);
        for w in out.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
        for (o, v) in out.iter().zip(values.iter()) {
            prop_assert!(o <= v);
        }
    }

    #[test]
    fn step_down_preserves_multiset(values in values_strategy()) {
        let out = step_down_min(&values);
        let mut a = values.clone();
        let mut b = out.clone();
        a.sort_by(|x, y| x.partial_cmp(y).unwrap());
        b.sort_by(|x, y| x.partial_cmp(y).unwrap());
        prop_assert_eq!(a, b);
    }
}
