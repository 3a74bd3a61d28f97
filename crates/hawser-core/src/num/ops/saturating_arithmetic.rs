// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! By-value saturating arithmetic.
//!
//! Capacity reservations in the search crates are derived from problem
//! sizes (`num_vessels * num_berths`, `num_vessels + 1`). These products
//! must never wrap, so the derivations go through saturating arithmetic.
//! The traits here mirror the inherent `saturating_*` methods on the
//! primitive integers as a by-value API usable in generic code.

use core::ops::{Add, Mul};

/// Saturating addition by value.
///
/// Clamps the result to the numeric bounds of the type instead of
/// overflowing.
///
/// # Examples
///
/// ```rust
/// # use hawser_core::num::ops::saturating_arithmetic::SaturatingAddVal;
///
/// let a: u8 = 250;
/// assert_eq!(a.saturating_add_val(10), 255);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    /// Performs saturating addition by value.
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating multiplication by value.
///
/// Clamps the result to the numeric bounds of the type instead of
/// overflowing.
///
/// # Examples
///
/// ```rust
/// # use hawser_core::num::ops::saturating_arithmetic::SaturatingMulVal;
///
/// let a: u8 = 100;
/// assert_eq!(a.saturating_mul_val(100), 255);
/// ```
pub trait SaturatingMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs saturating multiplication by value.
    fn saturating_mul_val(self, v: Self) -> Self;
}

macro_rules! saturating_impl_binary_val {
    ($trait_name:ident, $method:ident, $t:ty, $src_method:ident) => {
        impl $trait_name for $t {
            #[inline(always)]
            fn $method(self, v: Self) -> Self {
                <$t>::$src_method(self, v)
            }
        }
    };
}

macro_rules! saturating_impl_for {
    ($t:ty) => {
        saturating_impl_binary_val!(SaturatingAddVal, saturating_add_val, $t, saturating_add);
        saturating_impl_binary_val!(SaturatingMulVal, saturating_mul_val, $t, saturating_mul);
    };
}

saturating_impl_for!(i8);
saturating_impl_for!(u8);
saturating_impl_for!(i16);
saturating_impl_for!(u16);
saturating_impl_for!(i32);
saturating_impl_for!(u32);
saturating_impl_for!(i64);
saturating_impl_for!(u64);
saturating_impl_for!(i128);
saturating_impl_for!(u128);
saturating_impl_for!(isize);
saturating_impl_for!(usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_add_clamps_at_max() {
        assert_eq!(250u8.saturating_add_val(10), 255);
        assert_eq!(120i8.saturating_add_val(10), 127);
        assert_eq!((-120i8).saturating_add_val(-20), -128);
        assert_eq!(usize::MAX.saturating_add_val(1), usize::MAX);
    }

    #[test]
    fn test_saturating_add_in_range() {
        assert_eq!(1u32.saturating_add_val(2), 3);
        assert_eq!((-5i64).saturating_add_val(5), 0);
    }

    #[test]
    fn test_saturating_mul_clamps_at_max() {
        assert_eq!(100u8.saturating_mul_val(100), 255);
        assert_eq!(i32::MAX.saturating_mul_val(2), i32::MAX);
        assert_eq!(usize::MAX.saturating_mul_val(2), usize::MAX);
    }

    #[test]
    fn test_saturating_mul_in_range() {
        assert_eq!(12usize.saturating_mul_val(12), 144);
        assert_eq!((-3i32).saturating_mul_val(4), -12);
    }
}
