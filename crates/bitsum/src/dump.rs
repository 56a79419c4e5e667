#![forbid(unsafe_code)]

//! Text diagnostics for a [`FenwickTree`].
//!
//! [`Dump`] renders the reconstructed element array next to the raw
//! aggregate cells, annotating each cell with the logical indices it sums.
//! [`RangeTable`] renders every inclusive range sum. Both only read the tree.

use std::fmt;

use crate::fenwick::{FenwickTree, predecessor};

const RULE: &str = "**********************************";

/// Element array plus aggregate cells, one line per index.
///
/// ```text
/// ********** ORIGINAL TREE *********
///     ARR[ 1]:    1
/// ********** FENWICK TREE **********
///     BIT[ 1]:    1    // + 1
/// **********************************
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dump<'a> {
    tree: &'a FenwickTree,
}

impl<'a> Dump<'a> {
    pub fn new(tree: &'a FenwickTree) -> Self {
        Self { tree }
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "********** ORIGINAL TREE *********")?;
        for (k, value) in self.tree.values().into_iter().enumerate() {
            writeln!(f, "    ARR[{:>2}]: {value:>4}", k + 1)?;
        }

        writeln!(f, "********** FENWICK TREE **********")?;
        for (k, &cell) in self.tree.aggregates().iter().enumerate() {
            let index = k + 1;
            write!(f, "    BIT[{index:>2}]: {cell:>4}    //")?;
            for covered in predecessor(index) + 1..=index {
                write!(f, " + {covered}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{RULE}")
    }
}

/// Every `SUM[i:j]` for `1 <= i <= j <= capacity`.
///
/// Quadratic in capacity; meant for small trees.
#[derive(Debug, Clone, Copy)]
pub struct RangeTable<'a> {
    tree: &'a FenwickTree,
}

impl<'a> RangeTable<'a> {
    pub fn new(tree: &'a FenwickTree) -> Self {
        Self { tree }
    }
}

impl fmt::Display for RangeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.tree.capacity();
        writeln!(f, "********** RANGE SUMS ************")?;
        for start in 1..=n {
            for end in start..=n {
                let sum = self.tree.range_sum(start, end).map_err(|_| fmt::Error)?;
                writeln!(f, "    SUM[{start:>2}:{end:>2}] = {sum:>4}")?;
            }
        }
        writeln!(f, "{RULE}")
    }
}
