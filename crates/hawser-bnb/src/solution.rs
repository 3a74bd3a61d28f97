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

use crate::state::SearchState;
use core::ops::AddAssign;
use hawser_core::num::constants::MinusOne;
use num_traits::{AsPrimitive, PrimInt, Signed, Zero};

/// A complete schedule extracted from a fully-assigned search state.
///
/// Structure-of-arrays layout, indexed by vessel: `berths()[v]` is the
/// berth assigned to vessel `v` and `start_times()[v]` its start time.
/// Unlike `SearchState`, every entry is valid; there is no sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T, I, C> {
    /// The total objective cost of this solution.
    objective_value: C,
    /// The assigned berth for each vessel.
    berths: Vec<I>,
    /// The assigned start time for each vessel.
    start_times: Vec<T>,
}

impl<T, I, C> Solution<T, I, C>
where
    T: Copy,
    I: Copy,
    C: Copy,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `berths` and `start_times` have different lengths.
    pub fn new(objective_value: C, berths: Vec<I>, start_times: Vec<T>) -> Self {
        assert_eq!(
            berths.len(),
            start_times.len(),
            "called `Solution::new` with inconsistent vector lengths: berths.len() = {}, start_times.len() = {}",
            berths.len(),
            start_times.len()
        );

        Self {
            objective_value,
            berths,
            start_times,
        }
    }

    /// Returns the number of vessels in this solution.
    #[inline]
    pub fn num_vessels(&self) -> usize {
        self.berths.len()
    }

    /// Returns the total objective value.
    #[inline]
    pub fn objective_value(&self) -> C {
        self.objective_value
    }

    /// Returns the assigned berth for each vessel.
    #[inline]
    pub fn berths(&self) -> &[I] {
        &self.berths
    }

    /// Returns the assigned start time for each vessel.
    #[inline]
    pub fn start_times(&self) -> &[T] {
        &self.start_times
    }
}

/// Error returned when converting a `SearchState` with unassigned vessels
/// into a `Solution`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IncompleteSolutionError {
    assigned_vessels: usize,
    total_vessels: usize,
}

impl IncompleteSolutionError {
    /// Returns the number of vessels that were assigned.
    #[inline]
    pub fn assigned_vessels(&self) -> usize {
        self.assigned_vessels
    }

    /// Returns the total number of vessels in the state.
    #[inline]
    pub fn total_vessels(&self) -> usize {
        self.total_vessels
    }
}

impl std::fmt::Display for IncompleteSolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "incomplete solution: assigned {}/{} vessels",
            self.assigned_vessels, self.total_vessels
        )
    }
}

impl std::error::Error for IncompleteSolutionError {}

impl<T, I, C> TryFrom<&SearchState<T, I, C>> for Solution<T, I, C>
where
    T: PrimInt + Signed,
    I: PrimInt + Signed + AsPrimitive<usize> + MinusOne,
    C: Copy + Zero + AddAssign,
{
    type Error = IncompleteSolutionError;

    fn try_from(state: &SearchState<T, I, C>) -> Result<Self, Self::Error> {
        let assigned = state.num_assigned_vessels();
        if assigned != state.num_vessels() {
            return Err(IncompleteSolutionError {
                assigned_vessels: assigned,
                total_vessels: state.num_vessels(),
            });
        }

        Ok(Self {
            objective_value: state.current_objective(),
            berths: state.vessel_assignments().to_vec(),
            start_times: state.start_times_raw().to_vec(),
        })
    }
}

impl<T, I, C> std::fmt::Display for Solution<T, I, C>
where
    T: Copy + std::fmt::Display,
    I: Copy + std::fmt::Display,
    C: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution(objective: {})", self.objective_value)?;
        for v in 0..self.berths.len() {
            writeln!(
                f,
                "  vessel {} -> berth {} at {}",
                v, self.berths[v], self.start_times[v]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = SearchState<i64, i32, f64>;

    #[test]
    fn test_new_and_accessors() {
        let solution = Solution::new(123.0, vec![0, 2, 1], vec![10i64, 25, 17]);

        assert_eq!(solution.objective_value(), 123.0);
        assert_eq!(solution.num_vessels(), 3);
        assert_eq!(solution.berths(), &[0, 2, 1]);
        assert_eq!(solution.start_times(), &[10, 25, 17]);
    }

    #[test]
    #[should_panic(expected = "inconsistent vector lengths")]
    fn test_new_panics_on_length_mismatch() {
        let _ = Solution::new(0.0, vec![0, 1], vec![10i64]);
    }

    #[test]
    fn test_empty_solution_is_valid() {
        let solution: Solution<i64, i32, f64> = Solution::new(0.0, Vec::new(), Vec::new());
        assert_eq!(solution.num_vessels(), 0);
        assert_eq!(solution.berths(), &[] as &[i32]);
    }

    #[test]
    fn test_try_from_complete_state() {
        let mut state = State::new(2, 2);
        state.apply_move(0, 0, 10, 20, 5.0);
        state.apply_move(1, 1, 15, 40, 7.5);

        let solution = Solution::try_from(&state).expect("state is complete");

        assert_eq!(solution.objective_value(), 12.5);
        assert_eq!(solution.berths(), &[0, 1]);
        assert_eq!(solution.start_times(), &[10, 15]);
    }

    #[test]
    fn test_try_from_partial_state_fails() {
        let mut state = State::new(2, 3);
        state.apply_move(0, 0, 10, 20, 5.0);
        state.apply_move(2, 1, 0, 30, 2.0);

        let err = Solution::try_from(&state).expect_err("one vessel is unassigned");
        assert_eq!(err.assigned_vessels(), 2);
        assert_eq!(err.total_vessels(), 3);

        let text = format!("{}", err);
        assert!(text.contains("2/3"));
    }

    #[test]
    fn test_display_lists_assignments() {
        let solution = Solution::new(100.0, vec![0, 1], vec![10i64, 20]);
        let displayed = format!("{}", solution);
        assert!(displayed.contains("Solution(objective: 100)"));
        assert!(displayed.contains("vessel 0 -> berth 0 at 10"));
        assert!(displayed.contains("vessel 1 -> berth 1 at 20"));
    }
}
