#![forbid(unsafe_code)]

//! Fenwick tree (Binary Indexed Tree) over a fixed-size sequence.
//!
//! Point updates and prefix/range sums in O(log n), with every index checked
//! and every contract violation reported as a [`FenwickError`].
//!
//! # Layout
//!
//! The tree is stored 1-indexed in a contiguous `Vec<T>` of length `n + 1`.
//! Slot 0 is a sentinel that always holds `T::default()`. Slot `i` holds the
//! sum of the `lowbit(i)` logical elements ending at 1-based position `i`.
//! The allocation is made once and never resized.
//!
//! Alongside the partial sums the tree can track the logical values
//! themselves. `update` needs them to turn "set position `i` to `v`" into a
//! delta, so it is only available on trees built from values.
//!
//! # Operations
//!
//! | Operation | Time | Allocations |
//! |-----------|------|-------------|
//! | `new(n)` | O(n) | 1 Vec |
//! | `from_values(values)` | O(n log n) | 2 Vec |
//! | `construct(values)` | O(n log n) | 1 Vec |
//! | `insert(i, value)` | O(log n) | 0 |
//! | `update(i, value)` | O(log n) | 0 |
//! | `prefix_sum(i)` | O(log n) | 0 |
//! | `range_sum(l, r)` | O(log n) | 0 |
//!
//! # Invariants
//!
//! 1. `tree[i]` stores the sum of elements in `(i - lowbit(i), i]` (1-based).
//! 2. When values are tracked, `values()[i] == range_sum(i, i)` for every `i`.
//! 3. `tree[0]` is never written.
//! 4. Integer arithmetic wraps, so no operation panics on overflow.

use std::fmt;

use crate::error::{FenwickError, Result};
use crate::weight::Weight;

/// Fenwick tree (Binary Indexed Tree) for prefix sum queries.
///
/// `T` is any [`Weight`]: the primitive integers, whose sums wrap on
/// overflow, or `f32`/`f64`.
///
/// ```
/// use fenwick::FenwickTree;
///
/// let mut ft = FenwickTree::from_values(&[3, 2, -1, 6, 5]);
/// assert_eq!(ft.prefix_sum(2), Ok(4));
/// ft.update(1, 10).unwrap();
/// assert_eq!(ft.range_sum(1, 3), Ok(15));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FenwickTree<T = i64> {
    /// 1-indexed partial sums. `tree[0]` is the unused sentinel.
    tree: Vec<T>,
    /// Number of logical elements.
    n: usize,
    /// Logical values, present once the tree was built from a sequence.
    original: Option<Vec<T>>,
}

impl<T> FenwickTree<T>
where
    T: Weight,
{
    /// Create a tree of `n` zeros that tracks no logical values.
    ///
    /// Populate it with [`insert`](Self::insert) or [`construct`](Self::construct).
    /// [`update`](Self::update) is rejected until `construct` has run.
    pub fn new(n: usize) -> Self {
        Self {
            tree: vec![T::default(); n + 1],
            n,
            original: None,
        }
    }

    /// Build a tree from `values`, inserting each element left to right.
    ///
    /// The values are kept so that [`update`](Self::update) can compute deltas.
    pub fn from_values(values: &[T]) -> Self {
        Self::from(values.to_vec())
    }

    /// Populate a tree created with [`new`](Self::new) from `values`.
    ///
    /// Any previous contents are discarded. Afterwards the tree tracks
    /// `values` exactly as if it had been built with
    /// [`from_values`](Self::from_values).
    ///
    /// # Errors
    /// [`FenwickError::LengthMismatch`] if `values.len() != self.len()`.
    pub fn construct(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.n {
            return Err(reject(FenwickError::LengthMismatch {
                expected: self.n,
                actual: values.len(),
            }));
        }
        self.tree.fill(T::default());
        self.build(values);
        self.original = Some(values.to_vec());
        Ok(())
    }

    /// Number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the tree holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Add `value` to the element at 1-based position `index`.
    ///
    /// Not idempotent: inserting twice adds twice. If the tree tracks its
    /// logical values, the tracked value at `index - 1` grows by `value` too.
    ///
    /// # Errors
    /// [`FenwickError::OutOfRange`] unless `1 <= index <= len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index == 0 || index > self.n {
            return Err(reject(FenwickError::OutOfRange {
                index,
                bound: self.n,
            }));
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(index, value = ?value, "fenwick insert");

        self.climb(index, value);
        if let Some(original) = self.original.as_mut() {
            original[index - 1] = original[index - 1].add_wrapping(value);
        }
        Ok(())
    }

    /// Set the element at 0-based position `index` to `value`.
    ///
    /// # Errors
    /// - [`FenwickError::OutOfRange`] if `index >= len()`.
    /// - [`FenwickError::UninitializedOriginal`] if the tree was created with
    ///   [`new`](Self::new) and never populated with `construct`.
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        let Some(original) = self.original.as_mut() else {
            return Err(reject(FenwickError::UninitializedOriginal));
        };

        let delta = value.sub_wrapping(original[index]);
        original[index] = value;
        #[cfg(feature = "tracing")]
        tracing::trace!(index, delta = ?delta, "fenwick update");

        self.climb(index + 1, delta);
        Ok(())
    }

    /// Sum of elements `[0..=index]` (0-based, inclusive).
    ///
    /// # Errors
    /// [`FenwickError::OutOfRange`] if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.descend(index + 1))
    }

    /// Sum of the first `end` elements, i.e. `[0..end)`.
    ///
    /// `end == 0` is the empty prefix and yields zero, which makes this the
    /// building block for ranges that start at position 0.
    ///
    /// # Errors
    /// [`FenwickError::OutOfRange`] if `end > len()`.
    pub fn prefix_sum_exclusive(&self, end: usize) -> Result<T> {
        if end > self.n {
            return Err(reject(FenwickError::OutOfRange {
                index: end,
                bound: self.n,
            }));
        }
        Ok(self.descend(end))
    }

    /// Sum of elements `[start..=end]` (0-based, inclusive).
    ///
    /// # Errors
    /// - [`FenwickError::InvalidRange`] if `start > end`.
    /// - [`FenwickError::OutOfRange`] if `end >= len()`.
    pub fn range_sum(&self, start: usize, end: usize) -> Result<T> {
        if start > end {
            return Err(reject(FenwickError::InvalidRange { start, end }));
        }
        self.check_index(end)?;
        Ok(self.descend(end + 1).sub_wrapping(self.descend(start)))
    }

    /// Logical value at 0-based position `index`.
    ///
    /// Computed from the partial sums, so it also works on trees that were
    /// populated with `insert` only.
    ///
    /// # Errors
    /// [`FenwickError::OutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.range_sum(index, index)
    }

    /// Sum of all elements. Zero for an empty tree.
    pub fn total(&self) -> T {
        self.descend(self.n)
    }

    /// The tracked logical values, if any.
    pub fn values(&self) -> Option<&[T]> {
        self.original.as_deref()
    }

    /// Partial sum slots `1..=n`, without the sentinel.
    pub fn partial_sums(&self) -> &[T] {
        &self.tree[1..]
    }

    /// Insert every value at its 1-based slot. Leaves `original` alone.
    fn build(&mut self, values: &[T]) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("fenwick_construct", n = values.len()).entered();

        for (i, &v) in values.iter().enumerate() {
            self.climb(i + 1, v);
        }
    }

    /// Add `delta` to every slot covering 1-based position `idx`.
    fn climb(&mut self, mut idx: usize, delta: T) {
        debug_assert!(idx >= 1 && idx <= self.n);
        while idx <= self.n {
            self.tree[idx] = self.tree[idx].add_wrapping(delta);
            idx += lowbit(idx);
        }
    }

    /// Sum of the first `end` elements. `end` must be `<= n`.
    fn descend(&self, mut idx: usize) -> T {
        let mut sum = T::default();
        while idx > 0 {
            sum = sum.add_wrapping(self.tree[idx]);
            idx -= lowbit(idx);
        }
        sum
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.n {
            return Err(reject(FenwickError::OutOfRange {
                index,
                bound: self.n,
            }));
        }
        Ok(())
    }
}

impl<T> From<Vec<T>> for FenwickTree<T>
where
    T: Weight,
{
    fn from(values: Vec<T>) -> Self {
        let mut this = Self::new(values.len());
        this.build(&values);
        this.original = Some(values);
        this
    }
}

impl<T> FromIterator<T> for FenwickTree<T>
where
    T: Weight,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

/// Renders the raw backing array, sentinel included: `[0,3,5,-1]`.
impl<T: fmt::Display> fmt::Display for FenwickTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.tree.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{slot}")?;
        }
        f.write_str("]")
    }
}

/// Log a rejected call and hand the error back.
fn reject(err: FenwickError) -> FenwickError {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "fenwick operation rejected");
    err
}

/// Lowest set bit of `x`. E.g., `lowbit(6) = 2`, `lowbit(4) = 4`.
#[inline]
fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}
