#![forbid(unsafe_code)]

//! Element types a [`FenwickTree`](crate::FenwickTree) can sum.
//!
//! Integer sums wrap on overflow (two's complement), so building and updating
//! never panic. Because wrapping arithmetic is a group, range sums computed as
//! `prefix(r) - prefix(l)` are still exact whenever the true range sum fits
//! in the type. Floats use ordinary IEEE addition.

use std::fmt;

/// Additive element of a Fenwick tree. `Default` is the zero.
pub trait Weight: Copy + Default + PartialEq + fmt::Debug {
    /// `self + rhs`, wrapping for integers.
    fn add_wrapping(self, rhs: Self) -> Self;

    /// `self - rhs`, wrapping for integers.
    fn sub_wrapping(self, rhs: Self) -> Self;
}

macro_rules! impl_weight_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                #[inline]
                fn add_wrapping(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn sub_wrapping(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_weight_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                #[inline]
                fn add_wrapping(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn sub_wrapping(self, rhs: Self) -> Self {
                    self - rhs
                }
            }
        )*
    };
}

impl_weight_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_weight_float!(f32, f64);
