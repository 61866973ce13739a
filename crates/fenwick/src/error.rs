#![forbid(unsafe_code)]

//! Error type for rejected Fenwick tree operations.
//!
//! Every variant is a caller-contract violation detected at the call site.
//! The tree is never modified by a call that returns an error.

use std::fmt;

/// Reason a [`FenwickTree`](crate::FenwickTree) operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenwickError {
    /// Index argument outside the documented bound of the operation.
    ///
    /// `bound` is the logical length of the tree at the time of the call.
    OutOfRange { index: usize, bound: usize },
    /// `update` was called on a tree that tracks no logical values.
    UninitializedOriginal,
    /// `range_sum` was called with `start > end`.
    InvalidRange { start: usize, end: usize },
    /// `construct` was given a sequence of the wrong length.
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FenwickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, bound } => {
                write!(f, "index {index} out of range (len={bound})")
            }
            Self::UninitializedOriginal => {
                write!(f, "update requires a tree constructed from values")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range: start {start} > end {end}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected} values, got {actual}")
            }
        }
    }
}

impl std::error::Error for FenwickError {}

/// Convenience alias for results of Fenwick tree operations.
pub type Result<T> = std::result::Result<T, FenwickError>;
