use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::fdsolve_assert_moderate;
use crate::propagation::Priority;
use crate::propagation::PropagatorId;

/// The set of propagators which still have to run, bucketed by [`Priority`].
///
/// Enqueueing is idempotent: a propagator is in the queue at most once.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    present_priorities: BinaryHeap<Reverse<u32>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        Self::new(Priority::NUM_LEVELS)
    }
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u32) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            is_enqueued: KeyedVec::default(),
            present_priorities: BinaryHeap::new(),
        }
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: Priority) {
        fdsolve_assert_moderate!((priority as usize) < self.queues.len());

        if !self.is_propagator_enqueued(propagator_id) {
            self.is_enqueued.accomodate(propagator_id, false);
            self.is_enqueued[propagator_id] = true;

            if self.queues[priority as usize].is_empty() {
                self.present_priorities.push(Reverse(priority as u32));
            }
            self.queues[priority as usize].push_back(propagator_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        fdsolve_assert_moderate!(!self.queues[top_priority].is_empty());

        let next_propagator_id = self.queues[top_priority].pop_front()?;
        self.is_enqueued[next_propagator_id] = false;

        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }

        Some(next_propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        for queue in self.queues.iter_mut() {
            queue.clear();
        }

        for is_propagator_enqueued in self.is_enqueued.iter_mut() {
            *is_propagator_enqueued = false;
        }

        self.present_priorities.clear();
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.is_enqueued
            .get(propagator_id)
            .copied()
            .unwrap_or_default()
    }
}
