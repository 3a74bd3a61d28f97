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

//! Hawser‑BnB: the mutable-state substrate for branch‑and‑bound berth allocation
//!
//! This crate carries the hot inner loop of a BnB solver for the berth
//! allocation problem. It deliberately contains no driver: branching
//! heuristics, bounding, and instance loading live above it. What it
//! provides is the machinery that lets a driver enter a decision, explore
//! the subtree below it, and undo the decision at near-zero cost.
//!
//! Core flow per tree node
//! - A move generator scans `timeline::BerthTimeline`s and streams one
//!   candidate decision per feasible branch into a fresh frame on the
//!   `stack::SearchStack`.
//! - For each candidate the driver mutates `state::SearchState` via
//!   `apply_move`, recording undo information on a trail.
//! - On backtrack the trail restores the state and `pop_frame` discards
//!   the node's siblings in O(1).
//!
//! Two trail flavors are provided and may be combined:
//! - `trail::FrameTrail` stores one opaque restoration bundle per applied
//!   move; best when a move atomically touches a handful of fields.
//! - `trail::DeltaTrail` stores per-slot value deltas and dirty indices
//!   under checkpoints; best when the rollback surface is sparse across
//!   large arrays, and supports committing a tentative scope into its
//!   parent.
//!
//! Design notes
//! - Everything is a value type over two or three growable vectors; no
//!   internal locking, no shared ownership, no allocation on the hot path
//!   once capacities are reserved.
//! - Preconditions are debug-checked. The `*_unchecked` methods document
//!   their release-build safety contracts; the safe methods keep Rust's
//!   usual bounds discipline.

pub mod solution;
pub mod stack;
pub mod state;
pub mod timeline;
pub mod trail;
