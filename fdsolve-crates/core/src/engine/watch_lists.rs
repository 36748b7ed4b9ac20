use super::DomainEvent;
use super::DomainEvents;
use super::DomainId;
use crate::containers::KeyedVec;
use crate::propagation::PropagatorId;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Watcher {
    pub(crate) propagator: PropagatorId,
    pub(crate) events: DomainEvents,
}

/// For every domain, the propagators which want to be woken up when it changes.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchLists {
    watchers: KeyedVec<DomainId, Vec<Watcher>>,
}

impl WatchLists {
    /// Subscribes `propagator` to `events` on `domain`; subscribing twice merges the event sets.
    pub(crate) fn watch(
        &mut self,
        domain: DomainId,
        propagator: PropagatorId,
        events: DomainEvents,
    ) {
        self.watchers.accomodate(domain, Vec::new());
        let watchers = &mut self.watchers[domain];

        if let Some(watcher) = watchers
            .iter_mut()
            .find(|watcher| watcher.propagator == propagator)
        {
            watcher.events = watcher.events.union(events);
        } else {
            watchers.push(Watcher { propagator, events });
        }
    }

    /// Removes every subscription of `propagator`.
    pub(crate) fn unwatch(&mut self, propagator: PropagatorId) {
        for watchers in self.watchers.iter_mut() {
            watchers.retain(|watcher| watcher.propagator != propagator);
        }
    }

    /// The propagators which are interested in `event` happening to `domain`.
    pub(crate) fn get_affected_propagators(
        &self,
        event: DomainEvent,
        domain: DomainId,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.watchers
            .get(domain)
            .into_iter()
            .flatten()
            .filter(move |watcher| watcher.events.contains(event))
            .map(|watcher| watcher.propagator)
    }

    /// The number of propagators watching `domain`.
    pub(crate) fn degree(&self, domain: DomainId) -> usize {
        self.watchers.get(domain).map_or(0, Vec::len)
    }
}

/// Handed to a propagator when it is added so it can subscribe to the domains it reads.
#[derive(Debug)]
pub(crate) struct RegistrationContext<'a> {
    watch_lists: &'a mut WatchLists,
    propagator: PropagatorId,
}

impl<'a> RegistrationContext<'a> {
    pub(crate) fn new(watch_lists: &'a mut WatchLists, propagator: PropagatorId) -> Self {
        RegistrationContext {
            watch_lists,
            propagator,
        }
    }

    pub(crate) fn register(&mut self, domain: DomainId, events: DomainEvents) {
        self.watch_lists.watch(domain, self.propagator, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn only_matching_events_wake_a_watcher() {
        let mut watch_lists = WatchLists::default();
        let x = DomainId::create_from_index(0);

        watch_lists.watch(x, PropagatorId(0), DomainEvents::ASSIGN);
        watch_lists.watch(x, PropagatorId(1), DomainEvents::BOUNDS);

        let woken = watch_lists
            .get_affected_propagators(DomainEvent::Assign, x)
            .collect::<Vec<_>>();
        assert_eq!(vec![PropagatorId(0)], woken);

        let woken = watch_lists
            .get_affected_propagators(DomainEvent::LowerBound, x)
            .collect::<Vec<_>>();
        assert_eq!(vec![PropagatorId(1)], woken);
    }

    #[test]
    fn watching_twice_merges_the_events() {
        let mut watch_lists = WatchLists::default();
        let x = DomainId::create_from_index(3);

        watch_lists.watch(x, PropagatorId(0), DomainEvents::ASSIGN);
        watch_lists.watch(x, PropagatorId(0), DomainEvents::BOUNDS);

        assert_eq!(1, watch_lists.degree(x));
        assert_eq!(0, watch_lists.degree(DomainId::create_from_index(1)));
        assert_eq!(
            1,
            watch_lists
                .get_affected_propagators(DomainEvent::UpperBound, x)
                .count()
        );
    }
}
