#![forbid(unsafe_code)]

//! Fenwick tree (Binary Indexed Tree) over signed 64-bit values.
//!
//! Provides O(log n) point update, prefix sum, range sum and point recovery
//! over a single contiguous `Vec<i64>`. The logical elements are never stored;
//! every answer is assembled from partial aggregates.
//!
//! # Layout
//!
//! The tree is stored 1-indexed in a `Vec<i64>` of length `n + 1` (index 0
//! unused). Cell `i` holds the sum of the logical elements in
//! `(i - lowbit(i), i]`, so the cell's span is exactly its lowest set bit.
//!
//! # Operations
//!
//! | Operation | Time | Allocations |
//! |-----------|------|-------------|
//! | `new(n)` | O(n) | 1 Vec |
//! | `from_values(values)` | O(n) | 1 Vec |
//! | `build(values)` | O(n log n) | 0 |
//! | `update(i, delta)` | O(log n) | 0 |
//! | `prefix_sum(i)` | O(log n) | 0 |
//! | `range_sum(l, r)` | O(log n) | 0 |
//! | `point_value(i)` | O(log n) | 0 |
//! | `batch_update(deltas)` | O(m log n) | 0 |
//!
//! # Invariants
//!
//! 1. `tree[i]` stores the sum of elements in `(i - lowbit(i), i]`.
//! 2. `prefix_sum(n) == total()`, and `prefix_sum(i) == total()` for all `i > n`.
//! 3. `range_sum(l, r) == prefix_sum(r) - prefix_sum(l - 1)` for `1 <= l <= r <= n`.
//! 4. `point_value(i) == prefix_sum(i) - prefix_sum(i - 1)`.
//! 5. `from_values` produces the same cells as sequential `update` calls.
//!
//! Arithmetic wraps in two's complement, so sums are exact modulo 2^64 and
//! no input can make an operation panic.

use std::ops::RangeInclusive;

use crate::error::{FenwickError, Result};

/// Fenwick tree over indices `1..=capacity`.
///
/// Capacity is fixed at creation. Queries borrow the tree immutably and may
/// run from any number of readers at once; mutation requires `&mut self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenwickTree {
    /// 1-indexed tree storage. `tree[0]` is unused.
    tree: Vec<i64>,
    /// Number of elements (not including index 0).
    n: usize,
}

impl FenwickTree {
    /// Create a zeroed tree holding `capacity` elements.
    ///
    /// # Errors
    /// [`FenwickError::Capacity`] if `capacity <= 0`, or if the cells for
    /// `capacity` elements cannot be allocated.
    pub fn new(capacity: i64) -> Result<Self> {
        let rejected = || {
            #[cfg(feature = "tracing")]
            tracing::debug!(requested = capacity, "rejected tree capacity");
            FenwickError::Capacity {
                requested: capacity,
            }
        };

        let n = match usize::try_from(capacity) {
            Ok(n) if n > 0 => n,
            _ => return Err(rejected()),
        };
        let cells = n.checked_add(1).ok_or_else(rejected)?;
        let mut tree = Vec::new();
        tree.try_reserve_exact(cells).map_err(|_| rejected())?;
        tree.resize(cells, 0i64);
        Ok(Self { tree, n })
    }

    /// Create a tree from 0-indexed `values` in O(n).
    ///
    /// Element `values[k]` lands at logical index `k + 1`. Capacity equals
    /// `values.len()`.
    ///
    /// # Errors
    /// [`FenwickError::Capacity`] if `values` is empty.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        if values.is_empty() {
            return Err(FenwickError::Capacity { requested: 0 });
        }
        let n = values.len();
        let mut tree = vec![0i64; n + 1];
        tree[1..].copy_from_slice(values);

        // Each cell pushes its finished aggregate to its parent exactly once.
        for i in 1..=n {
            let up = parent(i);
            if up <= n {
                tree[up] = tree[up].wrapping_add(tree[i]);
            }
        }

        Ok(Self { tree, n })
    }

    /// Number of logical elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.n
    }

    /// Whether `index` is a valid logical index (`1..=capacity`).
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        (1..=self.n).contains(&index)
    }

    /// Add `values[i]` at index `i` for every `i` in `1..values.len()`.
    ///
    /// `values[0]` is a placeholder and is ignored, matching the 1-based
    /// index space. Values accumulate on top of whatever the tree holds.
    ///
    /// # Errors
    /// [`FenwickError::IndexOutOfRange`] if `values` carries more than
    /// `capacity` elements after the placeholder. Nothing is applied then.
    pub fn build(&mut self, values: &[i64]) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("fenwick_build", n = self.n, len = values.len()).entered();

        let count = values.len().saturating_sub(1);
        if count > self.n {
            return Err(self.out_of_range(self.n + 1));
        }
        for (index, &value) in values.iter().enumerate().skip(1) {
            self.add(index, value);
        }
        Ok(())
    }

    /// Add `delta` to the element at `index`. O(log n), zero alloc.
    ///
    /// Only the cells on the ancestor chain `index, parent(index), ...`
    /// change.
    ///
    /// # Errors
    /// [`FenwickError::IndexOutOfRange`] unless `1 <= index <= capacity`.
    pub fn update(&mut self, index: usize, delta: i64) -> Result<()> {
        self.check(index)?;
        self.add(index, delta);
        Ok(())
    }

    /// Set the element at `index` to `value`. O(log n).
    pub fn set(&mut self, index: usize, value: i64) -> Result<()> {
        let current = self.point_value(index)?;
        self.add(index, value.wrapping_sub(current));
        Ok(())
    }

    /// Reset the element at `index` to zero.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        self.set(index, 0)
    }

    /// Apply several `(index, delta)` pairs in order.
    ///
    /// Produces the same tree as calling [`update`](Self::update) for each
    /// pair. All indices are checked before any cell changes.
    pub fn batch_update(&mut self, deltas: &[(usize, i64)]) -> Result<()> {
        if let Some(&(bad, _)) = deltas.iter().find(|(i, _)| !self.contains(*i)) {
            return Err(self.out_of_range(bad));
        }
        for &(index, delta) in deltas {
            self.add(index, delta);
        }
        Ok(())
    }

    /// Sum of elements `[1, index]`. O(log n), zero alloc.
    ///
    /// `prefix_sum(0)` is the empty sum. Indices past capacity clamp to the
    /// total so the function stays monotone over its whole domain.
    pub fn prefix_sum(&self, index: usize) -> i64 {
        let mut idx = index.min(self.n);
        let mut sum = 0i64;
        while idx > 0 {
            sum = sum.wrapping_add(self.tree[idx]);
            idx = predecessor(idx);
        }
        sum
    }

    /// Sum of elements `[start, end]`. O(log n).
    ///
    /// Walks down from `end` until the chain drops below `start`, then
    /// subtracts the chain of `start - 1` until both meet at their shared
    /// ancestor. Cells below that ancestor are never read.
    ///
    /// # Errors
    /// `start > end` is an empty range and yields `Ok(0)`. Otherwise
    /// [`FenwickError::IndexOutOfRange`] unless `1 <= start` and
    /// `end <= capacity`.
    pub fn range_sum(&self, start: usize, end: usize) -> Result<i64> {
        if start > end {
            return Ok(0);
        }
        self.check(start)?;
        self.check(end)?;

        let mut sum = 0i64;
        let mut ancestor = end;
        loop {
            sum = sum.wrapping_add(self.tree[ancestor]);
            ancestor = predecessor(ancestor);
            if ancestor < start {
                break;
            }
        }

        let mut below = start - 1;
        while below > ancestor {
            sum = sum.wrapping_sub(self.tree[below]);
            below = predecessor(below);
        }
        Ok(sum)
    }

    /// Recover the element at `index`. O(log n).
    ///
    /// Starts from `tree[index]` and subtracts the cells of `index - 1`'s
    /// chain that lie above `predecessor(index)`; those are exactly the
    /// sub-spans of `tree[index]` other than the element itself.
    ///
    /// # Errors
    /// [`FenwickError::IndexOutOfRange`] unless `1 <= index <= capacity`.
    pub fn point_value(&self, index: usize) -> Result<i64> {
        self.check(index)?;
        Ok(self.recover(index))
    }

    /// Sum of all elements. O(log n).
    pub fn total(&self) -> i64 {
        self.prefix_sum(self.n)
    }

    /// Logical indices whose sum is stored in the cell at `index`.
    pub fn covered_range(&self, index: usize) -> Result<RangeInclusive<usize>> {
        self.check(index)?;
        Ok(predecessor(index) + 1..=index)
    }

    /// Raw aggregate cells for indices `1..=capacity` (sentinel excluded).
    ///
    /// `aggregates()[k]` is the cell of logical index `k + 1`.
    pub fn aggregates(&self) -> &[i64] {
        &self.tree[1..]
    }

    /// Reconstruct the logical sequence, index 1 first.
    pub fn values(&self) -> Vec<i64> {
        (1..=self.n).map(|i| self.recover(i)).collect()
    }

    /// Internal: unchecked point recovery. `index` must be in `1..=n`.
    fn recover(&self, index: usize) -> i64 {
        let mut value = self.tree[index];
        let stop = predecessor(index);
        let mut below = index - 1;
        while below > stop {
            value = value.wrapping_sub(self.tree[below]);
            below = predecessor(below);
        }
        value
    }

    /// Internal: unchecked ancestor walk. `index` must be in `1..=n`.
    fn add(&mut self, index: usize, delta: i64) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("fenwick_update", index, delta).entered();

        let mut idx = index;
        while idx <= self.n {
            self.tree[idx] = self.tree[idx].wrapping_add(delta);
            idx = parent(idx);
        }
    }

    #[inline]
    fn check(&self, index: usize) -> Result<()> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> FenwickError {
        #[cfg(feature = "tracing")]
        tracing::debug!(index, capacity = self.n, "rejected out-of-range index");
        FenwickError::IndexOutOfRange {
            index,
            capacity: self.n,
        }
    }
}

/// Lowest set bit of `x`. E.g., `lowbit(12) = 4`, `lowbit(8) = 8`.
///
/// `lowbit(0)` is 0, which is why index 0 is never a tree cell.
#[inline]
pub const fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}

/// Next cell on the update walk: the smallest cell whose span strictly
/// contains the span of `i`.
#[inline]
pub const fn parent(i: usize) -> usize {
    i + lowbit(i)
}

/// Next cell on the query walk: the cell covering the elements just below
/// the span of `i`. Reaches 0 after `popcount(i)` steps.
#[inline]
pub const fn predecessor(i: usize) -> usize {
    i - lowbit(i)
}
