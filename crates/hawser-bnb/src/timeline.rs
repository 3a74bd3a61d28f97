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

use hawser_core::math::window::TimeWindow;
use num_traits::PrimInt;
use std::cmp::max;

/// Checks whether the given windows are disjoint and sorted by start time.
#[inline(always)]
fn are_disjoint_and_sorted<T>(windows: &[TimeWindow<T>]) -> bool
where
    T: PrimInt,
{
    windows.windows(2).all(|pair| pair[0].end() <= pair[1].start())
}

/// Checks whether the given windows are sorted by start time.
/// Overlaps are permitted; fixed assignments may overlap each other.
#[inline(always)]
fn are_sorted_by_start<T>(windows: &[TimeWindow<T>]) -> bool
where
    T: PrimInt,
{
    windows.windows(2).all(|pair| pair[0].start() <= pair[1].start())
}

/// One berth's availability as a sorted sequence of disjoint half-open windows.
///
/// The timeline answers the move generator's central question: given a
/// vessel's ready time and service duration, what is the earliest feasible
/// start on this berth? It is built once per berth from the raw opening
/// range (or window list), optionally carving out pre-existing fixed
/// assignments, and is then queried read-only during search.
///
/// # Invariants
///
/// Windows are strictly increasing by start, pairwise disjoint, and
/// non-empty. The `assign_*` methods uphold this for their documented
/// inputs; `assign_windows` trusts the caller and verifies in debug builds.
///
/// # Failure semantics
///
/// There are no errors. A reversed range produces an empty timeline, and a
/// query that fits nowhere returns `None`, which is the "no slot available"
/// signal the move generator acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BerthTimeline<T>
where
    T: PrimInt,
{
    windows: Vec<TimeWindow<T>>,
}

impl<T> Default for BerthTimeline<T>
where
    T: PrimInt,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BerthTimeline<T>
where
    T: PrimInt,
{
    /// Creates a new, empty `BerthTimeline`.
    #[inline]
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
        }
    }

    /// Creates a timeline spanning the single range `[open, close)`.
    ///
    /// A reversed or empty range yields an empty timeline.
    #[inline]
    pub fn from_range(open: T, close: T) -> Self {
        let mut timeline = Self::new();
        timeline.assign_range(open, close);
        timeline
    }

    /// Creates a timeline from a list of availability windows.
    ///
    /// The caller guarantees the windows are sorted, disjoint, and
    /// non-empty.
    #[inline]
    pub fn from_windows<I>(windows: I) -> Self
    where
        I: IntoIterator<Item = TimeWindow<T>>,
    {
        let mut timeline = Self::new();
        timeline.assign_windows(windows);
        timeline
    }

    /// Creates a timeline by carving fixed assignments out of availability
    /// windows. See [`BerthTimeline::assign_carved`].
    #[inline]
    pub fn carved(availability: &[TimeWindow<T>], fixed: &[TimeWindow<T>]) -> Self {
        let mut timeline = Self::new();
        timeline.assign_carved(availability, fixed);
        timeline
    }

    /// Replaces the contents with the single range `[open, close)`,
    /// reusing the underlying allocation.
    ///
    /// If `open >= close` the timeline becomes empty.
    #[inline]
    pub fn assign_range(&mut self, open: T, close: T) {
        self.windows.clear();
        if open < close {
            self.windows.push(TimeWindow::new_unchecked(open, close));
        }
    }

    /// Replaces the contents with the given windows, reusing the
    /// underlying allocation.
    ///
    /// The caller guarantees the windows are sorted, disjoint, and
    /// non-empty; this is verified in debug builds only.
    #[inline]
    pub fn assign_windows<I>(&mut self, windows: I)
    where
        I: IntoIterator<Item = TimeWindow<T>>,
    {
        self.windows.clear();
        self.windows.extend(windows);

        debug_assert!(
            are_disjoint_and_sorted(&self.windows),
            "called `BerthTimeline::assign_windows` with windows that are not disjoint and sorted"
        );
        debug_assert!(
            self.windows.iter().all(|w| !w.is_empty()),
            "called `BerthTimeline::assign_windows` with an empty window"
        );
    }

    /// Replaces the contents with `availability` minus `fixed`, reusing the
    /// underlying allocation.
    ///
    /// Both inputs must be sorted by start. Availability windows must be
    /// disjoint; fixed assignments may overlap each other (they simply
    /// carve more). The fixed cursor is shared across all availability
    /// windows, so a full carve is amortised linear in
    /// `availability.len() + fixed.len()`.
    ///
    /// Remainders of touching availability windows are emitted as two
    /// adjacent output windows; they are never merged.
    pub fn assign_carved(&mut self, availability: &[TimeWindow<T>], fixed: &[TimeWindow<T>]) {
        debug_assert!(
            are_disjoint_and_sorted(availability),
            "called `BerthTimeline::assign_carved` with availability windows that are not disjoint and sorted"
        );
        debug_assert!(
            are_sorted_by_start(fixed),
            "called `BerthTimeline::assign_carved` with fixed assignments that are not sorted by start"
        );

        self.windows.clear();
        let mut fixed_index = 0;

        for avail in availability {
            let mut cursor = avail.start();

            while fixed_index < fixed.len() && fixed[fixed_index].start() < avail.end() {
                let block = fixed[fixed_index];

                if block.end() <= cursor {
                    fixed_index += 1;
                    continue;
                }

                if block.start() > cursor {
                    self.windows
                        .push(TimeWindow::new_unchecked(cursor, block.start()));
                }

                cursor = max(cursor, block.end());

                if cursor >= avail.end() {
                    break;
                }

                if block.end() < avail.end() {
                    fixed_index += 1;
                } else {
                    // The block reaches past this availability window and
                    // may still cover later ones; keep the cursor on it.
                    break;
                }
            }

            if cursor < avail.end() {
                self.windows
                    .push(TimeWindow::new_unchecked(cursor, avail.end()));
            }
        }
    }

    /// Finds the earliest feasible start time for a service of `duration`
    /// that begins no earlier than `ready_time`.
    ///
    /// Windows ending at or before `ready_time` are skipped (a window
    /// ending exactly at `ready_time` cannot host the vessel). Within the
    /// first candidate window `[s, e)` the earliest slot is
    /// `max(ready_time, s)`; it fits iff `duration <= e - start`. Returns
    /// `None` if no window fits.
    #[inline]
    pub fn find_earliest_start(&self, ready_time: T, duration: T) -> Option<T> {
        debug_assert!(
            are_disjoint_and_sorted(&self.windows),
            "called `BerthTimeline::find_earliest_start` on a timeline that is not disjoint and sorted"
        );

        let first = self.windows.partition_point(|w| w.end() <= ready_time);

        for window in &self.windows[first..] {
            let actual_start = if window.start() > ready_time {
                window.start()
            } else {
                ready_time
            };
            if duration <= window.end() - actual_start {
                return Some(actual_start);
            }
        }

        None
    }

    /// Returns the number of windows.
    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` if the timeline has no windows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Clears all windows while retaining capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.windows.clear();
    }

    /// Returns all windows as a slice, sorted by start.
    #[inline]
    pub fn windows(&self) -> &[TimeWindow<T>] {
        &self.windows
    }

    /// Returns an iterator over the windows in ascending start order.
    /// Reverse with `.rev()`.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, TimeWindow<T>> {
        self.windows.iter()
    }
}

impl<'a, T> IntoIterator for &'a BerthTimeline<T>
where
    T: PrimInt,
{
    type Item = &'a TimeWindow<T>;
    type IntoIter = std::slice::Iter<'a, TimeWindow<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

impl<T> std::fmt::Display for BerthTimeline<T>
where
    T: PrimInt,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BerthTimeline(windows: {})", self.windows.len())
    }
}
