//! Property-based invariant tests for the Fenwick tree.
//!
//! These tests verify structural invariants that must hold for any valid
//! inputs:
//!
//! 1. Point value equals the difference of adjacent prefix sums.
//! 2. Range sum equals the prefix-sum difference.
//! 3. An update shifts exactly the prefix sums at or after its index.
//! 4. The O(n) constructor matches sequential updates.
//! 5. Every cell equals the naive sum over its covered range.
//! 6. Prefix sums past capacity clamp to the total.
//! 7. Batch updates match sequential updates.

use bitsum::{FenwickTree, lowbit};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000i64..=1_000_000, 1..=128)
}

fn tree_and_index() -> impl Strategy<Value = (Vec<i64>, usize)> {
    values_strategy().prop_flat_map(|values| {
        let n = values.len();
        (Just(values), 1..=n)
    })
}

fn tree_and_range() -> impl Strategy<Value = (Vec<i64>, usize, usize)> {
    values_strategy().prop_flat_map(|values| {
        let n = values.len();
        (Just(values), 1..=n, 1..=n).prop_map(|(v, a, b)| (v, a.min(b), a.max(b)))
    })
}

fn naive_prefix(values: &[i64], index: usize) -> i64 {
    values[..index.min(values.len())].iter().sum()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Point value is the prefix difference
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn point_value_is_prefix_difference((values, i) in tree_and_index()) {
        let ft = FenwickTree::from_values(&values).unwrap();
        let diff = ft.prefix_sum(i) - ft.prefix_sum(i - 1);
        prop_assert_eq!(ft.point_value(i), Ok(diff));
        prop_assert_eq!(diff, values[i - 1]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Range sum is the prefix difference
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn range_sum_is_prefix_difference((values, i, j) in tree_and_range()) {
        let ft = FenwickTree::from_values(&values).unwrap();
        let expected = ft.prefix_sum(j) - ft.prefix_sum(i - 1);
        prop_assert_eq!(ft.range_sum(i, j), Ok(expected));
        prop_assert_eq!(expected, values[i - 1..j].iter().sum::<i64>());
    }

    #[test]
    fn reversed_range_is_empty((values, i, j) in tree_and_range()) {
        prop_assume!(i < j);
        let ft = FenwickTree::from_values(&values).unwrap();
        prop_assert_eq!(ft.range_sum(j, i), Ok(0));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Updates shift the suffix of prefix sums only
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn update_shifts_suffix_only(
        (values, i) in tree_and_index(),
        delta in -1_000_000i64..=1_000_000,
    ) {
        let mut ft = FenwickTree::from_values(&values).unwrap();
        let before: Vec<i64> = (0..=values.len()).map(|k| ft.prefix_sum(k)).collect();
        ft.update(i, delta).unwrap();
        for (k, &old) in before.iter().enumerate() {
            let expected = if k >= i { old + delta } else { old };
            prop_assert_eq!(ft.prefix_sum(k), expected, "prefix {} after update({}, {})", k, i, delta);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Linear construction equals sequential build
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn from_values_matches_build(values in values_strategy()) {
        let fast = FenwickTree::from_values(&values).unwrap();
        let mut slow = FenwickTree::new(values.len() as i64).unwrap();
        let mut padded = Vec::with_capacity(values.len() + 1);
        padded.push(0);
        padded.extend_from_slice(&values);
        slow.build(&padded).unwrap();
        prop_assert_eq!(fast, slow);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Every cell sums its covered range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cells_sum_covered_range(values in values_strategy()) {
        let ft = FenwickTree::from_values(&values).unwrap();
        for (k, &cell) in ft.aggregates().iter().enumerate() {
            let i = k + 1;
            let span = ft.covered_range(i).unwrap();
            prop_assert_eq!(span.end() - span.start() + 1, lowbit(i));
            let naive: i64 = values[span.start() - 1..*span.end()].iter().sum();
            prop_assert_eq!(cell, naive, "cell {}", i);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Prefix sums clamp past capacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prefix_sum_clamps_to_total(values in values_strategy(), extra in 1usize..1000) {
        let ft = FenwickTree::from_values(&values).unwrap();
        let n = values.len();
        prop_assert_eq!(ft.prefix_sum(n + extra), ft.total());
        prop_assert_eq!(ft.total(), naive_prefix(&values, n));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Batch equals sequential
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn batch_matches_sequential(
        values in values_strategy(),
        raw in prop::collection::vec((any::<usize>(), -1000i64..=1000), 0..64),
    ) {
        let n = values.len();
        let deltas: Vec<(usize, i64)> = raw.into_iter().map(|(i, d)| (i % n + 1, d)).collect();

        let mut seq = FenwickTree::from_values(&values).unwrap();
        for &(i, d) in &deltas {
            seq.update(i, d).unwrap();
        }
        let mut batch = FenwickTree::from_values(&values).unwrap();
        batch.batch_update(&deltas).unwrap();

        prop_assert_eq!(seq, batch);
    }
}
