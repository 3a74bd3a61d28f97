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

//! # Integer Sentinel Constants
//!
//! Sentinel-heavy code (unassigned markers, dirty-slot resets) needs `-1`
//! as a typed constant rather than a literal sprinkled across call sites.
//! `MinusOne` exposes it as an associated constant on the signed integer
//! primitives so generic code can name the sentinel without a cast.
//!
//! ## Usage
//!
//! ```rust
//! use hawser_core::num::constants::MinusOne;
//!
//! fn is_sentinel<T: MinusOne + PartialEq>(x: T) -> bool {
//!     x == T::MINUS_ONE
//! }
//!
//! assert!(is_sentinel(-1i32));
//! assert!(!is_sentinel(0i64));
//! ```

/// A trait for integer types that have a constant representing -1.
pub trait MinusOne {
    /// The constant representing -1 for the implementing type.
    const MINUS_ONE: Self;
}

macro_rules! impl_minus_one_for {
    ($t:ty) => {
        impl MinusOne for $t {
            const MINUS_ONE: Self = -1;
        }
    };
}

impl_minus_one_for!(i8);
impl_minus_one_for!(i16);
impl_minus_one_for!(i32);
impl_minus_one_for!(i64);
impl_minus_one_for!(i128);
impl_minus_one_for!(isize);
