#![forbid(unsafe_code)]

//! Fenwick tree (binary indexed tree): point updates and prefix sums in O(log n).
//!
//! - **Tree**: [`FenwickTree`], the 1-indexed partial-sum array and its traversals
//! - **Errors**: [`FenwickError`] and [`Result`] for rejected calls
//! - **Weights**: [`Weight`], element types whose integer sums wrap on overflow
//!
//! Enable the `tracing` feature for structured logs of inserts, updates and
//! rejected calls.

pub mod error;
pub mod tree;
pub mod weight;

pub use error::{FenwickError, Result};
pub use tree::FenwickTree;
pub use weight::Weight;
