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

//! Search state management for the branch-and-bound kernel.
//!
//! This module provides `SearchState`, the compact mutable container
//! holding one partial solution: when each berth becomes free next, which
//! berth (if any) each vessel is assigned to, the scheduled start times,
//! and the running objective. The driver mutates it through
//! `apply_move` and restores it through `backtrack_move`; restoration is
//! strictly delta-based, there is no snapshotting.
//!
//! Assignment is encoded with a sentinel: `vessel_assignments[v]` is
//! either a valid berth index or `UNASSIGNED` (-1). Keeping assignment
//! and berth in one word avoids a separate membership structure and keeps
//! the per-vessel state to two machine words.
//!
//! Safety and invariants:
//! - The `*_unchecked` methods require in-bounds indices and the stated
//!   logical preconditions; violations are undefined behavior in release
//!   builds. Debug assertions catch them during development.
//! - `vessel_start_times[v]` is meaningful only while `is_assigned(v)`;
//!   `backtrack_move` deliberately leaves it stale.

use core::ops::AddAssign;
use hawser_core::num::constants::MinusOne;
use num_traits::{AsPrimitive, PrimInt, Signed, Zero};

/// The mutable state of a partial berth-allocation solution.
///
/// Generic over the time type `T`, the index type `I` (signed, so the
/// `UNASSIGNED` sentinel fits), and the cost type `C`.
///
/// # Invariants (debug-checked)
///
/// - `vessel_assignments.len() == vessel_start_times.len()`
/// - For every vessel `v`: `vessel_assignments[v]` is `UNASSIGNED` or a
///   valid berth index in `0..num_berths`.
#[derive(Clone, Debug)]
pub struct SearchState<T, I, C> {
    /// When each berth becomes available next.
    berth_free_times: Vec<T>,
    /// The assigned berth per vessel, or `UNASSIGNED`.
    vessel_assignments: Vec<I>,
    /// The scheduled start time per vessel; valid only while assigned.
    vessel_start_times: Vec<T>,
    /// The most recently assigned vessel, or `UNASSIGNED`.
    last_assigned_vessel: I,
    /// The objective value of the partial solution.
    current_objective: C,
}

impl<T, I, C> SearchState<T, I, C>
where
    T: PrimInt + Signed,
    I: PrimInt + Signed + AsPrimitive<usize> + MinusOne,
    C: Copy + Zero + AddAssign,
{
    /// The sentinel marking a vessel without a berth.
    pub const UNASSIGNED: I = I::MINUS_ONE;

    /// Creates a new `SearchState` with the specified numbers of berths
    /// and vessels. All berths start free at time zero, all vessels are
    /// unassigned, and the objective is zero.
    #[inline]
    pub fn new(num_berths: usize, num_vessels: usize) -> Self {
        Self {
            berth_free_times: vec![T::zero(); num_berths],
            vessel_assignments: vec![Self::UNASSIGNED; num_vessels],
            vessel_start_times: vec![T::zero(); num_vessels],
            last_assigned_vessel: Self::UNASSIGNED,
            current_objective: C::zero(),
        }
    }

    /// Creates a state from existing collections (e.g. a warm start).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `vessel_assignments` and
    /// `vessel_start_times` differ in length.
    #[inline]
    pub fn from_parts(
        berth_free_times: Vec<T>,
        vessel_assignments: Vec<I>,
        vessel_start_times: Vec<T>,
    ) -> Self {
        debug_assert_eq!(
            vessel_assignments.len(),
            vessel_start_times.len(),
            "called `SearchState::from_parts` with inconsistent vessel vector lengths"
        );

        Self {
            berth_free_times,
            vessel_assignments,
            vessel_start_times,
            last_assigned_vessel: Self::UNASSIGNED,
            current_objective: C::zero(),
        }
    }

    /// Returns the number of berths.
    #[inline]
    pub fn num_berths(&self) -> usize {
        self.berth_free_times.len()
    }

    /// Returns the number of vessels.
    #[inline]
    pub fn num_vessels(&self) -> usize {
        self.vessel_assignments.len()
    }

    /// Returns the current objective value.
    #[inline]
    pub fn current_objective(&self) -> C {
        self.current_objective
    }

    /// Returns the most recently assigned vessel, or `UNASSIGNED`.
    #[inline]
    pub fn last_assigned_vessel(&self) -> I {
        self.last_assigned_vessel
    }

    /// Checks whether the vessel is currently assigned to a berth.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `vessel` is out of bounds.
    #[inline]
    pub fn is_assigned(&self, vessel: I) -> bool {
        debug_assert!(
            vessel >= I::zero() && vessel.as_() < self.num_vessels(),
            "called `SearchState::is_assigned` with vessel index out of bounds: the len is {} but the index is {}",
            self.num_vessels(),
            vessel.as_()
        );

        self.vessel_assignments[vessel.as_()] != Self::UNASSIGNED
    }

    /// Checks whether the vessel is currently assigned, without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `vessel` must be within `0..num_vessels`.
    #[inline]
    pub unsafe fn is_assigned_unchecked(&self, vessel: I) -> bool {
        debug_assert!(
            vessel >= I::zero() && vessel.as_() < self.num_vessels(),
            "called `SearchState::is_assigned_unchecked` with vessel index out of bounds: the len is {} but the index is {}",
            self.num_vessels(),
            vessel.as_()
        );

        unsafe { *self.vessel_assignments.get_unchecked(vessel.as_()) != Self::UNASSIGNED }
    }

    /// Returns the scheduled start time of an assigned vessel.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `vessel` is out of bounds or unassigned.
    #[inline]
    pub fn get_start_time(&self, vessel: I) -> T {
        debug_assert!(
            self.is_assigned(vessel),
            "called `SearchState::get_start_time` with unassigned vessel {}",
            vessel.as_()
        );

        self.vessel_start_times[vessel.as_()]
    }

    /// Returns the scheduled start time of an assigned vessel, without
    /// bounds checking.
    ///
    /// # Safety
    ///
    /// `vessel` must be within `0..num_vessels` and assigned.
    #[inline]
    pub unsafe fn get_start_time_unchecked(&self, vessel: I) -> T {
        debug_assert!(
            self.is_assigned(vessel),
            "called `SearchState::get_start_time_unchecked` with unassigned vessel {}",
            vessel.as_()
        );

        unsafe { *self.vessel_start_times.get_unchecked(vessel.as_()) }
    }

    /// Returns the berth an assigned vessel occupies.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `vessel` is out of bounds or unassigned.
    #[inline]
    pub fn get_assigned_berth(&self, vessel: I) -> I {
        debug_assert!(
            self.is_assigned(vessel),
            "called `SearchState::get_assigned_berth` with unassigned vessel {}",
            vessel.as_()
        );

        self.vessel_assignments[vessel.as_()]
    }

    /// Returns the berth an assigned vessel occupies, without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `vessel` must be within `0..num_vessels` and assigned.
    #[inline]
    pub unsafe fn get_assigned_berth_unchecked(&self, vessel: I) -> I {
        debug_assert!(
            self.is_assigned(vessel),
            "called `SearchState::get_assigned_berth_unchecked` with unassigned vessel {}",
            vessel.as_()
        );

        unsafe { *self.vessel_assignments.get_unchecked(vessel.as_()) }
    }

    /// Returns the free time of the specified berth.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `berth` is out of bounds.
    #[inline]
    pub fn berth_free_time(&self, berth: I) -> T {
        debug_assert!(
            berth >= I::zero() && berth.as_() < self.num_berths(),
            "called `SearchState::berth_free_time` with berth index out of bounds: the len is {} but the index is {}",
            self.num_berths(),
            berth.as_()
        );

        self.berth_free_times[berth.as_()]
    }

    /// Returns the free time of the specified berth, without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `berth` must be within `0..num_berths`.
    #[inline]
    pub unsafe fn berth_free_time_unchecked(&self, berth: I) -> T {
        debug_assert!(
            berth >= I::zero() && berth.as_() < self.num_berths(),
            "called `SearchState::berth_free_time_unchecked` with berth index out of bounds: the len is {} but the index is {}",
            self.num_berths(),
            berth.as_()
        );

        unsafe { *self.berth_free_times.get_unchecked(berth.as_()) }
    }

    /// Returns a slice of all berth free times.
    #[inline]
    pub fn berth_free_times(&self) -> &[T] {
        &self.berth_free_times
    }

    /// Returns a slice of all vessel assignments (`UNASSIGNED` or a berth
    /// index per vessel).
    #[inline]
    pub fn vessel_assignments(&self) -> &[I] {
        &self.vessel_assignments
    }

    /// Returns the scheduled start times; entries are valid only for
    /// assigned vessels.
    #[inline]
    pub(crate) fn start_times_raw(&self) -> &[T] {
        &self.vessel_start_times
    }

    /// Returns the number of currently assigned vessels.
    ///
    /// Counts on every call; intended for cold paths (logging, solution
    /// extraction), not the search loop.
    #[inline]
    pub fn num_assigned_vessels(&self) -> usize {
        self.vessel_assignments
            .iter()
            .filter(|&&assignment| assignment != Self::UNASSIGNED)
            .count()
    }

    /// Applies a move: assigns `vessel` to `berth`, starting at
    /// `start_time` and occupying the berth until `finish_time`, adding
    /// `cost_delta` to the objective.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if an index is out of bounds or the vessel
    /// is already assigned.
    #[inline]
    pub fn apply_move(&mut self, vessel: I, berth: I, start_time: T, finish_time: T, cost_delta: C) {
        debug_assert!(
            berth >= I::zero() && berth.as_() < self.num_berths(),
            "called `SearchState::apply_move` with berth index out of bounds: the len is {} but the index is {}",
            self.num_berths(),
            berth.as_()
        );
        debug_assert!(
            !self.is_assigned(vessel),
            "called `SearchState::apply_move` with vessel {} already assigned",
            vessel.as_()
        );

        self.berth_free_times[berth.as_()] = finish_time;
        self.vessel_assignments[vessel.as_()] = berth;
        self.vessel_start_times[vessel.as_()] = start_time;
        self.current_objective += cost_delta;
        self.last_assigned_vessel = vessel;
    }

    /// Applies a move without bounds checking.
    ///
    /// # Safety
    ///
    /// `vessel` must be within `0..num_vessels` and unassigned; `berth`
    /// must be within `0..num_berths`.
    #[inline]
    pub unsafe fn apply_move_unchecked(
        &mut self,
        vessel: I,
        berth: I,
        start_time: T,
        finish_time: T,
        cost_delta: C,
    ) {
        debug_assert!(
            berth >= I::zero() && berth.as_() < self.num_berths(),
            "called `SearchState::apply_move_unchecked` with berth index out of bounds: the len is {} but the index is {}",
            self.num_berths(),
            berth.as_()
        );
        debug_assert!(
            !self.is_assigned(vessel),
            "called `SearchState::apply_move_unchecked` with vessel {} already assigned",
            vessel.as_()
        );

        unsafe {
            *self.berth_free_times.get_unchecked_mut(berth.as_()) = finish_time;
            *self.vessel_assignments.get_unchecked_mut(vessel.as_()) = berth;
            *self.vessel_start_times.get_unchecked_mut(vessel.as_()) = start_time;
        }
        self.current_objective += cost_delta;
        self.last_assigned_vessel = vessel;
    }

    /// Backtracks a move, restoring the values captured immediately
    /// before the matching `apply_move`.
    ///
    /// `vessel_start_times[vessel]` is left untouched; it is dead under
    /// the `is_assigned` guard.
    #[inline]
    pub fn backtrack_move(
        &mut self,
        vessel: I,
        berth: I,
        old_berth_free_time: T,
        old_objective: C,
        old_last_vessel: I,
    ) {
        debug_assert!(
            berth >= I::zero() && berth.as_() < self.num_berths(),
            "called `SearchState::backtrack_move` with berth index out of bounds: the len is {} but the index is {}",
            self.num_berths(),
            berth.as_()
        );
        debug_assert!(
            self.is_assigned(vessel),
            "called `SearchState::backtrack_move` with vessel {} already unassigned",
            vessel.as_()
        );

        self.berth_free_times[berth.as_()] = old_berth_free_time;
        self.vessel_assignments[vessel.as_()] = Self::UNASSIGNED;
        self.current_objective = old_objective;
        self.last_assigned_vessel = old_last_vessel;
    }

    /// Backtracks a move without bounds checking.
    ///
    /// # Safety
    ///
    /// `vessel` must be within `0..num_vessels` and assigned; `berth`
    /// must be within `0..num_berths`.
    #[inline]
    pub unsafe fn backtrack_move_unchecked(
        &mut self,
        vessel: I,
        berth: I,
        old_berth_free_time: T,
        old_objective: C,
        old_last_vessel: I,
    ) {
        debug_assert!(
            berth >= I::zero() && berth.as_() < self.num_berths(),
            "called `SearchState::backtrack_move_unchecked` with berth index out of bounds: the len is {} but the index is {}",
            self.num_berths(),
            berth.as_()
        );
        debug_assert!(
            self.is_assigned(vessel),
            "called `SearchState::backtrack_move_unchecked` with vessel {} already unassigned",
            vessel.as_()
        );

        unsafe {
            *self.berth_free_times.get_unchecked_mut(berth.as_()) = old_berth_free_time;
            *self.vessel_assignments.get_unchecked_mut(vessel.as_()) = Self::UNASSIGNED;
        }
        self.current_objective = old_objective;
        self.last_assigned_vessel = old_last_vessel;
    }

    /// Resets the state to its initial configuration: all berths free at
    /// time zero, all vessels unassigned, objective zero.
    #[inline]
    pub fn reset(&mut self) {
        self.berth_free_times.fill(T::zero());
        self.vessel_assignments.fill(Self::UNASSIGNED);
        self.vessel_start_times.fill(T::zero());
        self.last_assigned_vessel = Self::UNASSIGNED;
        self.current_objective = C::zero();
    }
}

impl<T, I, C> Default for SearchState<T, I, C>
where
    T: PrimInt + Signed,
    I: PrimInt + Signed + AsPrimitive<usize> + MinusOne,
    C: Copy + Zero + AddAssign,
{
    #[inline]
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T, I, C> std::fmt::Display for SearchState<T, I, C>
where
    T: PrimInt + Signed,
    I: PrimInt + Signed + AsPrimitive<usize> + MinusOne,
    C: Copy + Zero + AddAssign + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(objective: {}, assigned_vessels: {}/{})",
            self.current_objective,
            self.num_assigned_vessels(),
            self.num_vessels()
        )
    }
}
