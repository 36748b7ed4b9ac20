use log::trace;

use super::DomainStore;
use super::PropagatorQueue;
use super::WatchLists;
use crate::basic_types::PropagationStatus;
use crate::engine::RegistrationContext;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorStore;

/// Runs propagators until no domain changes anymore or some propagator fails.
///
/// Domain changes are picked up from the events in the [`DomainStore`]; every propagator watching
/// a changed domain is enqueued, including the propagator which made the change.
#[derive(Debug, Default)]
pub(crate) struct PropagationEngine {
    propagators: PropagatorStore,
    watch_lists: WatchLists,
    queue: PropagatorQueue,
    num_propagator_calls: u64,
}

impl PropagationEngine {
    /// Adds the propagator, subscribes it to its domains and enqueues it.
    pub(crate) fn add_propagator(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        let id = self.propagators.alloc(propagator);
        let mut context = RegistrationContext::new(&mut self.watch_lists, id);
        self.propagators[id].register(&mut context);

        self.queue
            .enqueue_propagator(id, self.propagators[id].priority());

        id
    }

    /// Permanently disables the propagator.
    pub(crate) fn retire(&mut self, propagator: PropagatorId) {
        self.propagators.retire(propagator);
        self.watch_lists.unwatch(propagator);
    }

    pub(crate) fn enqueue_on_backtrack(&mut self, propagator: PropagatorId) {
        self.propagators.enqueue_on_backtrack(propagator);
    }

    pub(crate) fn enqueue_all(&mut self) {
        let active = self.propagators.active_propagators().collect::<Vec<_>>();
        for propagator in active {
            self.queue
                .enqueue_propagator(propagator, self.propagators[propagator].priority());
        }
    }

    /// Should be called after the domains were synchronised to an earlier checkpoint.
    pub(crate) fn notify_backtrack(&mut self) {
        self.queue.clear();
        for &propagator in self.propagators.backtrack_propagators() {
            self.queue
                .enqueue_propagator(propagator, self.propagators[propagator].priority());
        }
    }

    pub(crate) fn propagate(&mut self, domains: &mut DomainStore) -> PropagationStatus {
        loop {
            self.notify_propagators(domains);

            let Some(propagator_id) = self.queue.pop() else {
                return Ok(());
            };
            if !self.propagators.is_active(propagator_id) {
                continue;
            }

            self.num_propagator_calls += 1;
            let propagator = &mut self.propagators[propagator_id];
            let result = propagator.propagate(PropagationContextMut::new(domains));

            if let Err(inconsistency) = result {
                trace!(
                    "{} ({propagator_id}) failed with {inconsistency:?}",
                    propagator.name()
                );
                self.queue.clear();
                domains.clear_events();
                return Err(inconsistency);
            }
        }
    }

    fn notify_propagators(&mut self, domains: &mut DomainStore) {
        for (event, domain) in domains.drain_events() {
            for propagator in self.watch_lists.get_affected_propagators(event, domain) {
                if self.propagators.is_active(propagator) {
                    self.queue
                        .enqueue_propagator(propagator, self.propagators[propagator].priority());
                }
            }
        }
    }

    /// Returns the first active propagator whose constraint is not entailed by the domains.
    pub(crate) fn find_non_entailed(&self, domains: &DomainStore) -> Option<PropagatorId> {
        self.propagators.active_propagators().find(|&propagator| {
            self.propagators[propagator].entailment(PropagationContext::new(domains))
                != Entailment::Entailed
        })
    }

    #[cfg(test)]
    pub(crate) fn entailment(&self, propagator: PropagatorId, domains: &DomainStore) -> Entailment {
        self.propagators[propagator].entailment(PropagationContext::new(domains))
    }

    pub(crate) fn propagator_name(&self, propagator: PropagatorId) -> &str {
        self.propagators[propagator].name()
    }

    pub(crate) fn watch_lists(&self) -> &WatchLists {
        &self.watch_lists
    }

    pub(crate) fn num_propagator_calls(&self) -> u64 {
        self.num_propagator_calls
    }
}
