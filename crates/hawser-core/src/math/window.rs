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

use num_traits::PrimInt;

/// A half-open time window `[start, end)`.
///
/// This is the basic unit of berth availability: a contiguous stretch of
/// time during which a berth can host a vessel. Windows are compared and
/// stored by their bounds only; a window carries no identity.
///
/// # Invariants
///
/// `start_inclusive <= end_exclusive`. A window with equal bounds is empty.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimeWindow<T>
where
    T: PrimInt,
{
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> TimeWindow<T>
where
    T: PrimInt,
{
    /// Creates a new `TimeWindow`.
    ///
    /// # Panics
    ///
    /// Panics if `start_inclusive > end_exclusive`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hawser_core::math::window::TimeWindow;
    ///
    /// let w = TimeWindow::new(0, 10);
    /// assert_eq!(w.duration(), 10);
    /// ```
    #[inline]
    pub fn new(start_inclusive: T, end_exclusive: T) -> Self {
        assert!(
            start_inclusive <= end_exclusive,
            "invalid window: start_inclusive must be less than or equal to end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Creates a new `TimeWindow` if the bounds are ordered, `None` otherwise.
    #[inline]
    pub fn try_new(start_inclusive: T, end_exclusive: T) -> Option<Self> {
        if start_inclusive <= end_exclusive {
            Some(Self {
                start_inclusive,
                end_exclusive,
            })
        } else {
            None
        }
    }

    /// Creates a new `TimeWindow` without validating the bounds in release builds.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `start_inclusive > end_exclusive`.
    #[inline]
    pub fn new_unchecked(start_inclusive: T, end_exclusive: T) -> Self {
        debug_assert!(
            start_inclusive <= end_exclusive,
            "invalid window: start_inclusive must be less than or equal to end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Returns the inclusive start bound.
    #[inline]
    pub const fn start(&self) -> T {
        self.start_inclusive
    }

    /// Returns the exclusive end bound.
    #[inline]
    pub const fn end(&self) -> T {
        self.end_exclusive
    }

    /// Returns the length of the window (`end - start`).
    #[inline]
    pub fn duration(&self) -> T {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns `true` if the window is empty (`start == end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if `value` lies in `[start, end)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hawser_core::math::window::TimeWindow;
    ///
    /// let w = TimeWindow::new(0, 10);
    /// assert!(w.contains_point(0));
    /// assert!(!w.contains_point(10));
    /// ```
    #[inline]
    pub fn contains_point(&self, value: T) -> bool {
        self.start_inclusive <= value && value < self.end_exclusive
    }

    /// Returns `true` if this window overlaps `other`.
    ///
    /// Touching windows (`a.end == b.start`) do not overlap.
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }
}

impl<T> Default for TimeWindow<T>
where
    T: PrimInt,
{
    #[inline]
    fn default() -> Self {
        Self {
            start_inclusive: T::zero(),
            end_exclusive: T::zero(),
        }
    }
}

impl<T> std::fmt::Display for TimeWindow<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T> From<std::ops::Range<T>> for TimeWindow<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(range: std::ops::Range<T>) -> Self {
        Self::new(range.start, range.end)
    }
}
