#![forbid(unsafe_code)]

//! Fenwick tree (Binary Indexed Tree) prefix sums for bitsum.
//!
//! [`FenwickTree`] keeps N signed elements behind N partial aggregates and
//! answers point updates, prefix sums, range sums and point lookups in
//! O(log N). [`dump`] renders a tree for inspection.
//!
//! Enable the `tracing` feature to emit spans on the mutation paths.

pub mod dump;
pub mod error;
pub mod fenwick;

pub use dump::{Dump, RangeTable};
pub use error::{FenwickError, Result};
pub use fenwick::{FenwickTree, lowbit, parent, predecessor};
