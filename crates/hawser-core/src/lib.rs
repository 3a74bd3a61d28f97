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

//! # Hawser Core
//!
//! Foundational primitives for the Hawser scheduling kernel. This crate
//! collects the small, reusable building blocks that the search crates
//! depend on, with a focus on zero-overhead abstractions.
//!
//! ## Modules
//!
//! - `math`: the half-open time window `[start, end)` used to describe
//!   berth availability, with validated and unchecked constructors,
//!   measurement, and point/overlap queries.
//! - `num`: integer sentinel constants (`MinusOne`) and by-value
//!   saturating arithmetic traits used to derive safe capacity
//!   reservations from problem sizes.

pub mod math;
pub mod num;
