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

use std::ops::IndexMut;

/// One recorded value delta: the value that lived at `index` before the
/// mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ValueEntry<V> {
    index: usize,
    old_value: V,
}

/// A snapshot of both log lengths, taken when a scope opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Checkpoint {
    value_mark: usize,
    dirty_mark: usize,
}

/// A checkpointed undo log with field granularity.
///
/// `DeltaTrail` serves global arrays whose slots are individually mutated
/// during descent. It keeps two logs: *value deltas* (restore slot `i` to
/// a recorded prior value) and *dirty indices* (reset slot `i` to a known
/// default, saving the cost of storing the value). Checkpoints bracket
/// scopes; `backtrack` unwinds the topmost scope and `commit_checkpoint`
/// merges it into its parent without touching the external state.
///
/// Within one scope, dirty indices are processed first and value deltas
/// second, each group in strict reverse insertion order. The reverse walk
/// matters when one slot is saved several times in the same scope: the
/// last restore to run is the oldest record, which is the value that was
/// current when the scope began.
///
/// The caller owns the discipline of `save_value(i, v)`: `v` must be the
/// value currently stored at `i` in the external container, recorded
/// before the mutation.
#[derive(Clone, Debug)]
pub struct DeltaTrail<V> {
    value_trail: Vec<ValueEntry<V>>,
    dirty_indices: Vec<usize>,
    checkpoints: Vec<Checkpoint>,
}

impl<V> Default for DeltaTrail<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DeltaTrail<V> {
    /// Creates a new, empty `DeltaTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            value_trail: Vec::new(),
            dirty_indices: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Creates a preallocated `DeltaTrail`.
    ///
    /// `capacity` bounds the number of value deltas and dirty indices
    /// alive at once (roughly mutations-per-node times maximum depth);
    /// checkpoints get the same reservation since there is at most one
    /// per scope.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            value_trail: Vec::with_capacity(capacity),
            dirty_indices: Vec::with_capacity(capacity),
            checkpoints: Vec::with_capacity(capacity),
        }
    }

    /// Records the value currently stored at `index` of the external
    /// container, so `backtrack` can restore it.
    #[inline]
    pub fn save_value(&mut self, index: usize, old_value: V) {
        self.value_trail.push(ValueEntry { index, old_value });
    }

    /// Marks `index` as dirty: on `backtrack` the cleanup operation runs
    /// for it (typically resetting the slot to a known default).
    #[inline]
    pub fn mark_touched(&mut self, index: usize) {
        self.dirty_indices.push(index);
    }

    /// Opens a new scope by snapshotting both log lengths.
    #[inline]
    pub fn push_checkpoint(&mut self) {
        self.checkpoints.push(Checkpoint {
            value_mark: self.value_trail.len(),
            dirty_mark: self.dirty_indices.len(),
        });
    }

    /// Merges the topmost scope into its parent without restoring
    /// anything. Entries recorded in the committed scope become part of
    /// the enclosing scope. No-op when no checkpoint exists.
    #[inline]
    pub fn commit_checkpoint(&mut self) {
        self.checkpoints.pop();
    }

    /// Unwinds the topmost scope.
    ///
    /// Pops the top checkpoint, runs `cleanup_op(index)` for every dirty
    /// index recorded in the scope (newest first), then restores every
    /// value delta of the scope into `values` (newest first). Returns
    /// without effect if no checkpoint exists.
    pub fn backtrack<Values, Cleanup>(&mut self, values: &mut Values, mut cleanup_op: Cleanup)
    where
        Values: IndexMut<usize, Output = V> + ?Sized,
        Cleanup: FnMut(usize),
    {
        let checkpoint = match self.checkpoints.pop() {
            Some(checkpoint) => checkpoint,
            None => return,
        };

        debug_assert!(
            checkpoint.value_mark <= self.value_trail.len()
                && checkpoint.dirty_mark <= self.dirty_indices.len(),
            "called `DeltaTrail::backtrack` with a checkpoint beyond the current log lengths"
        );

        while self.dirty_indices.len() > checkpoint.dirty_mark {
            // The loop condition guarantees a last element.
            let index = unsafe { self.dirty_indices.pop().unwrap_unchecked() };
            cleanup_op(index);
        }

        while self.value_trail.len() > checkpoint.value_mark {
            let entry = unsafe { self.value_trail.pop().unwrap_unchecked() };
            values[entry.index] = entry.old_value;
        }
    }

    /// Unwinds the topmost scope, resetting every dirty slot of
    /// `dirty_target` to `reset_value`.
    ///
    /// Convenience over [`DeltaTrail::backtrack`] for the common case
    /// where the cleanup is a plain write of a known default.
    #[inline]
    pub fn backtrack_with_reset<Values, Dirty, R>(
        &mut self,
        values: &mut Values,
        dirty_target: &mut Dirty,
        reset_value: R,
    ) where
        Values: IndexMut<usize, Output = V> + ?Sized,
        Dirty: IndexMut<usize, Output = R> + ?Sized,
        R: Copy,
    {
        self.backtrack(values, |index| dirty_target[index] = reset_value);
    }

    /// Returns the number of open scopes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Returns `true` if all three logs are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value_trail.is_empty() && self.dirty_indices.is_empty() && self.checkpoints.is_empty()
    }

    /// Empties all three logs while retaining capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.value_trail.clear();
        self.dirty_indices.clear();
        self.checkpoints.clear();
    }

    /// Reserves capacity for at least `capacity` value deltas, dirty
    /// indices, and checkpoints in total.
    #[inline]
    pub fn reserve(&mut self, capacity: usize) {
        if self.value_trail.capacity() < capacity {
            self.value_trail
                .reserve(capacity - self.value_trail.capacity());
        }
        if self.dirty_indices.capacity() < capacity {
            self.dirty_indices
                .reserve(capacity - self.dirty_indices.capacity());
        }
        if self.checkpoints.capacity() < capacity {
            self.checkpoints
                .reserve(capacity - self.checkpoints.capacity());
        }
    }

    /// Shrinks the backing storage to fit the current contents.
    ///
    /// Do not call during search: the next growth reallocates.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.value_trail.shrink_to_fit();
        self.dirty_indices.shrink_to_fit();
        self.checkpoints.shrink_to_fit();
    }

    /// Returns the total bytes reserved (capacity) by the logs.
    #[inline]
    pub fn reserved_memory_bytes(&self) -> usize {
        self.value_trail.capacity() * std::mem::size_of::<ValueEntry<V>>()
            + self.dirty_indices.capacity() * std::mem::size_of::<usize>()
            + self.checkpoints.capacity() * std::mem::size_of::<Checkpoint>()
    }

    /// Returns the total bytes currently holding valid log data.
    #[inline]
    pub fn used_memory_bytes(&self) -> usize {
        self.value_trail.len() * std::mem::size_of::<ValueEntry<V>>()
            + self.dirty_indices.len() * std::mem::size_of::<usize>()
            + self.checkpoints.len() * std::mem::size_of::<Checkpoint>()
    }
}

impl<V> std::fmt::Display for DeltaTrail<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeltaTrail(values: {}, dirty: {}, checkpoints: {})",
            self.value_trail.len(),
            self.dirty_indices.len(),
            self.checkpoints.len()
        )
    }
}
