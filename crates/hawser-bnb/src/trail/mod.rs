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

//! Undo logs for backtracking search.
//!
//! Two flavors with different granularity share this module:
//!
//! - [`frame::FrameTrail`] records one opaque restoration bundle per
//!   applied move, grouped into frames. Fewer, fatter entries; best
//!   locality when a move atomically mutates several fields.
//! - [`delta::DeltaTrail`] records per-slot value deltas and dirty
//!   indices under checkpoints, and can commit a tentative scope into its
//!   parent. Best when the rollback surface is sparse across large
//!   arrays, or when a slot only needs resetting to a known default.
//!
//! A solver may use either or both; they do not observe each other.

pub mod delta;
pub mod frame;

pub use delta::DeltaTrail;
pub use frame::FrameTrail;
