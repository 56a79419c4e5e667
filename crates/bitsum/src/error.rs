#![forbid(unsafe_code)]

//! Error types for Fenwick tree construction and indexing.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FenwickError>;

/// Failure reasons for tree operations.
///
/// Bounds and capacity violations are reported to the caller immediately;
/// the only values the tree clamps instead of rejecting are prefix-sum
/// indices (0 and anything past capacity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenwickError {
    /// The requested capacity was zero or negative.
    Capacity { requested: i64 },
    /// A logical index fell outside `1..=capacity`.
    IndexOutOfRange { index: usize, capacity: usize },
    /// An operation was attempted before any tree was created.
    Uninitialized,
}

impl fmt::Display for FenwickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity { requested } => {
                write!(f, "capacity must be a positive integer (got {requested})")
            }
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "index {index} out of range 1..={capacity}")
            }
            Self::Uninitialized => write!(f, "tree has not been created yet"),
        }
    }
}

impl std::error::Error for FenwickError {}
