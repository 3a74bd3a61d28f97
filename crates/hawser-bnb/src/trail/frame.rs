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

/// A frame-based undo log of opaque restoration bundles.
///
/// `FrameTrail` stores one bundle of type `T` per applied move, linearly,
/// with a second index stack marking frame boundaries. When a single move
/// atomically mutates several state fields, capturing the rollback as one
/// bundle keeps the log dense and the restore loop cache-friendly.
///
/// Typical usage per tree node:
/// 1. `push_frame()` before expanding a decision level,
/// 2. `push(bundle)` for every applied move,
/// 3. `backtrack(undo_fn)` on prune or exhaustion; the callback receives
///    each bundle of the frame in reverse insertion order (LIFO).
#[derive(Clone, Debug)]
pub struct FrameTrail<T> {
    /// The linear history of restoration bundles.
    entries: Vec<T>,
    /// A stack of indices pointing into `entries`.
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl<T> Default for FrameTrail<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameTrail<T> {
    /// Creates a new, empty `FrameTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a preallocated `FrameTrail`.
    ///
    /// `entry_capacity` is the total number of applied moves expected at
    /// any one time (roughly the maximum depth for one-bundle-per-move
    /// drivers); `frame_capacity` is the maximum search depth.
    #[inline]
    pub fn preallocated(entry_capacity: usize, frame_capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(entry_capacity),
            frames: Vec::with_capacity(frame_capacity),
        }
    }

    /// Marks the start of a new history frame (decision level).
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Pushes a restoration bundle onto the current frame.
    #[inline]
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Backtracks the current frame, applying `undo_fn` to each of its
    /// bundles in reverse insertion order (LIFO), then removes the frame.
    ///
    /// Returns without effect if no frame is open (debug builds assert).
    #[inline]
    pub fn backtrack<F>(&mut self, mut undo_fn: F)
    where
        F: FnMut(T),
    {
        debug_assert!(
            !self.frames.is_empty(),
            "called `FrameTrail::backtrack` with no open frame"
        );

        let start = match self.frames.pop() {
            Some(start) => start,
            None => return,
        };

        while self.entries.len() > start {
            // The loop condition guarantees a last entry.
            let entry = unsafe { self.entries.pop().unwrap_unchecked() };
            undo_fn(entry);
        }
    }

    /// Returns the number of active frames (depth).
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if there are no active frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the number of recorded bundles across all frames.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Clears all history without releasing capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// Reserves capacity for at least `entry_capacity` bundles and
    /// `frame_capacity` frames in total.
    #[inline]
    pub fn reserve(&mut self, entry_capacity: usize, frame_capacity: usize) {
        if self.entries.capacity() < entry_capacity {
            self.entries
                .reserve(entry_capacity - self.entries.capacity());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.capacity());
        }
    }

    /// Shrinks the backing storage to fit the current contents.
    ///
    /// Do not call during search: the next growth reallocates.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
        self.frames.shrink_to_fit();
    }

    /// Returns the total bytes allocated (capacity) by the logs.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        let entries_size = self.entries.capacity() * std::mem::size_of::<T>();
        let frames_size = self.frames.capacity() * std::mem::size_of::<usize>();
        entries_size + frames_size
    }

    /// Returns the total bytes currently holding valid history data.
    #[inline]
    pub fn used_memory_bytes(&self) -> usize {
        let entries_size = self.entries.len() * std::mem::size_of::<T>();
        let frames_size = self.frames.len() * std::mem::size_of::<usize>();
        entries_size + frames_size
    }
}

impl<T> std::fmt::Display for FrameTrail<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FrameTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A bundle capturing everything one applied move must revert.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct MoveUndo {
        berth: usize,
        old_free_time: i64,
        old_objective: i64,
    }

    #[test]
    fn test_initial_state() {
        let trail: FrameTrail<MoveUndo> = FrameTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.depth(), 0);
        assert_eq!(trail.num_entries(), 0);
        assert_eq!(trail.used_memory_bytes(), 0);
        assert_eq!(trail.allocated_memory_bytes(), 0);
    }

    #[test]
    fn test_preallocation_avoids_reallocation() {
        let mut trail: FrameTrail<i64> = FrameTrail::preallocated(100, 10);
        let reserved = trail.allocated_memory_bytes();
        assert!(reserved > 0);

        trail.push_frame();
        for i in 0..100 {
            trail.push(i);
        }
        assert_eq!(trail.allocated_memory_bytes(), reserved);
        assert!(trail.used_memory_bytes() > 0);
    }

    #[test]
    fn test_backtrack_restores_in_lifo_order() {
        let mut trail = FrameTrail::new();
        trail.push_frame();
        trail.push(1);
        trail.push(2);
        trail.push(3);

        let mut seen = Vec::new();
        trail.backtrack(|entry| seen.push(entry));

        assert_eq!(seen, vec![3, 2, 1]);
        assert!(trail.is_empty());
        assert_eq!(trail.num_entries(), 0);
    }

    #[test]
    fn test_backtrack_only_drains_the_top_frame() {
        let mut trail = FrameTrail::new();
        trail.push_frame();
        trail.push(10);
        trail.push_frame();
        trail.push(20);
        trail.push(30);

        let mut seen = Vec::new();
        trail.backtrack(|entry| seen.push(entry));

        assert_eq!(seen, vec![30, 20]);
        assert_eq!(trail.depth(), 1);
        assert_eq!(trail.num_entries(), 1);

        trail.backtrack(|entry| seen.push(entry));
        assert_eq!(seen, vec![30, 20, 10]);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_backtrack_empty_frame_is_a_noop_on_entries() {
        let mut trail: FrameTrail<i32> = FrameTrail::new();
        trail.push_frame();
        trail.push(1);
        trail.push_frame();

        let mut calls = 0;
        trail.backtrack(|_| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(trail.depth(), 1);
        assert_eq!(trail.num_entries(), 1);
    }

    #[test]
    fn test_bundle_restoration_against_external_state() {
        let mut berth_free_times = vec![0i64, 0];
        let mut objective = 0i64;
        let mut trail = FrameTrail::new();

        trail.push_frame();

        // Move 1: berth 0 busy until 20.
        trail.push(MoveUndo {
            berth: 0,
            old_free_time: berth_free_times[0],
            old_objective: objective,
        });
        berth_free_times[0] = 20;
        objective += 10;

        // Move 2: berth 0 busy until 35 (stacked).
        trail.push(MoveUndo {
            berth: 0,
            old_free_time: berth_free_times[0],
            old_objective: objective,
        });
        berth_free_times[0] = 35;
        objective += 15;

        assert_eq!(berth_free_times[0], 35);
        assert_eq!(objective, 25);

        trail.backtrack(|undo| {
            berth_free_times[undo.berth] = undo.old_free_time;
            objective = undo.old_objective;
        });

        assert_eq!(berth_free_times, vec![0, 0]);
        assert_eq!(objective, 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_clear_retains_capacity() {
        let mut trail: FrameTrail<i64> = FrameTrail::preallocated(64, 8);
        trail.push_frame();
        trail.push(1);
        trail.push(2);

        let cap = trail.allocated_memory_bytes();
        trail.clear();

        assert!(trail.is_empty());
        assert_eq!(trail.num_entries(), 0);
        assert_eq!(trail.allocated_memory_bytes(), cap);
    }

    #[test]
    fn test_reserve_is_idempotent_when_large_enough() {
        let mut trail: FrameTrail<i64> = FrameTrail::new();
        trail.reserve(32, 4);
        let cap = trail.allocated_memory_bytes();
        trail.reserve(16, 2);
        assert_eq!(trail.allocated_memory_bytes(), cap);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "no open frame")]
    fn test_backtrack_without_frame_panics_in_debug() {
        let mut trail: FrameTrail<i32> = FrameTrail::new();
        trail.backtrack(|_| {});
    }

    #[test]
    fn test_non_copy_bundles_are_moved_out() {
        let mut trail: FrameTrail<String> = FrameTrail::new();
        trail.push_frame();
        trail.push("first".to_string());
        trail.push("second".to_string());

        let mut joined = String::new();
        trail.backtrack(|entry| joined.push_str(&entry));
        assert_eq!(joined, "secondfirst");
    }

    #[test]
    fn test_display_includes_counts() {
        let mut trail: FrameTrail<i32> = FrameTrail::new();
        trail.push_frame();
        trail.push(5);
        assert_eq!(format!("{}", trail), "FrameTrail(entries: 1, frames: 1)");
    }
}
