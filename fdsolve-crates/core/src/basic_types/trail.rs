use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::fdsolve_assert_simple;

/// An undo log which is split into checkpoints.
///
/// Entries are pushed while the search is at some checkpoint; synchronising to an earlier
/// checkpoint hands back every entry recorded since then, newest first, so that the caller can
/// revert them in the right order.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// At index i is the position where the i-th checkpoint ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// Implemented by hand to avoid requiring `T: Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: 0,
            trail_delimiter: Vec::new(),
            trail: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Removes all entries pushed after `new_checkpoint` was created and returns them in reverse
    /// order of insertion.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        fdsolve_assert_simple!(
            new_checkpoint < self.current_checkpoint,
            "cannot synchronise to checkpoint {new_checkpoint} from checkpoint {}",
            self.current_checkpoint
        );

        let new_trail_len = self.trail_delimiter[new_checkpoint];

        self.current_checkpoint = new_checkpoint;
        self.trail_delimiter.truncate(new_checkpoint);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}
