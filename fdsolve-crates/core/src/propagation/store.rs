use std::ops::Index;
use std::ops::IndexMut;

use super::Propagator;
use super::PropagatorId;
use crate::containers::KeyedVec;

/// Owns the propagators of a problem.
///
/// Propagators are never removed, since their ids are referenced from the watch lists. A
/// propagator which should no longer run is retired instead.
#[derive(Debug, Default)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    retired: KeyedVec<PropagatorId, bool>,
    enqueued_on_backtrack: Vec<PropagatorId>,
}

impl PropagatorStore {
    pub(crate) fn alloc(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        let _ = self.retired.push(false);
        self.propagators.push(propagator)
    }

    pub(crate) fn is_active(&self, propagator: PropagatorId) -> bool {
        !self.retired[propagator]
    }

    pub(crate) fn retire(&mut self, propagator: PropagatorId) {
        self.retired[propagator] = true;
        self.enqueued_on_backtrack.retain(|&id| id != propagator);
    }

    /// Marks a propagator which has to run again after every backtrack, because it was added
    /// below the root and its pruning is undone by backtracking.
    pub(crate) fn enqueue_on_backtrack(&mut self, propagator: PropagatorId) {
        self.enqueued_on_backtrack.push(propagator);
    }

    pub(crate) fn backtrack_propagators(&self) -> &[PropagatorId] {
        &self.enqueued_on_backtrack
    }

    pub(crate) fn active_propagators(&self) -> impl Iterator<Item = PropagatorId> + '_ {
        self.propagators
            .keys()
            .filter(|&propagator| self.is_active(propagator))
    }
}

impl Index<PropagatorId> for PropagatorStore {
    type Output = dyn Propagator;

    fn index(&self, index: PropagatorId) -> &Self::Output {
        self.propagators[index].as_ref()
    }
}

impl IndexMut<PropagatorId> for PropagatorStore {
    fn index_mut(&mut self, index: PropagatorId) -> &mut Self::Output {
        self.propagators[index].as_mut()
    }
}
