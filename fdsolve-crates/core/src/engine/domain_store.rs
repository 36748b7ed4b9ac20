use std::vec::Drain;

use super::DomainChange;
use super::DomainEvent;
use super::DomainId;
use super::IntegerDomain;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::fdsolve_assert_simple;

#[derive(Clone, Copy, Debug)]
struct DomainTrailEntry {
    domain: DomainId,
    change: DomainChange,
}

/// The arena of all domains of a problem together with the trail which records every change.
///
/// Every mutation either leaves the domain untouched, or shrinks it and pushes an undo record
/// before returning. A mutation which would empty a domain does nothing and returns
/// [`EmptyDomain`]. Values are given as `i64` so that callers can pass the result of interval
/// arithmetic without converting first.
#[derive(Clone, Debug, Default)]
pub(crate) struct DomainStore {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<DomainTrailEntry>,
    events: Vec<(DomainEvent, DomainId)>,
}

impl DomainStore {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.domains
            .push(IntegerDomain::new(lower_bound, upper_bound))
    }

    pub(crate) fn grow_sparse(&mut self, domain: IntegerDomain) -> DomainId {
        self.domains.push(domain)
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn get_domains(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    #[cfg(test)]
    pub(crate) fn domain(&self, domain: DomainId) -> &IntegerDomain {
        &self.domains[domain]
    }

    pub(crate) fn lower_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain].lower_bound()
    }

    pub(crate) fn upper_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain].upper_bound()
    }

    pub(crate) fn contains(&self, domain: DomainId, value: i64) -> bool {
        i32::try_from(value).is_ok_and(|value| self.domains[domain].contains(value))
    }

    pub(crate) fn is_fixed(&self, domain: DomainId) -> bool {
        self.domains[domain].is_fixed()
    }

    pub(crate) fn fixed_value(&self, domain: DomainId) -> Option<i32> {
        let domain = &self.domains[domain];
        domain.is_fixed().then(|| domain.lower_bound())
    }

    pub(crate) fn size(&self, domain: DomainId) -> usize {
        self.domains[domain].size()
    }

    pub(crate) fn iterate_domain(&self, domain: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.domains[domain].iter()
    }

    pub(crate) fn set_lower_bound(
        &mut self,
        domain: DomainId,
        new_lower_bound: i64,
    ) -> Result<(), EmptyDomain> {
        let current = &self.domains[domain];
        if new_lower_bound <= current.lower_bound() as i64 {
            return Ok(());
        }
        if new_lower_bound > current.upper_bound() as i64 {
            return Err(EmptyDomain);
        }

        let new_lower_bound = current
            .next_value_at_least(new_lower_bound as i32)
            .ok_or(EmptyDomain)?;
        let change = self.domains[domain].set_lower_bound(new_lower_bound);
        self.record(domain, change, DomainEvent::LowerBound);

        Ok(())
    }

    pub(crate) fn set_upper_bound(
        &mut self,
        domain: DomainId,
        new_upper_bound: i64,
    ) -> Result<(), EmptyDomain> {
        let current = &self.domains[domain];
        if new_upper_bound >= current.upper_bound() as i64 {
            return Ok(());
        }
        if new_upper_bound < current.lower_bound() as i64 {
            return Err(EmptyDomain);
        }

        let new_upper_bound = current
            .next_value_at_most(new_upper_bound as i32)
            .ok_or(EmptyDomain)?;
        let change = self.domains[domain].set_upper_bound(new_upper_bound);
        self.record(domain, change, DomainEvent::UpperBound);

        Ok(())
    }

    pub(crate) fn remove(&mut self, domain: DomainId, value: i64) -> Result<(), EmptyDomain> {
        if !self.contains(domain, value) {
            return Ok(());
        }

        let current = &self.domains[domain];
        if current.is_fixed() {
            return Err(EmptyDomain);
        }

        if value == current.lower_bound() as i64 {
            self.set_lower_bound(domain, value + 1)
        } else if value == current.upper_bound() as i64 {
            self.set_upper_bound(domain, value - 1)
        } else {
            let change = self.domains[domain].remove_inner_value(value as i32);
            self.record(domain, change, DomainEvent::Removal);
            Ok(())
        }
    }

    pub(crate) fn assign(&mut self, domain: DomainId, value: i64) -> Result<(), EmptyDomain> {
        if !self.contains(domain, value) {
            return Err(EmptyDomain);
        }
        self.set_lower_bound(domain, value)?;
        self.set_upper_bound(domain, value)
    }

    fn record(&mut self, domain: DomainId, change: DomainChange, event: DomainEvent) {
        self.trail.push(DomainTrailEntry { domain, change });
        self.events.push((event, domain));
        if self.domains[domain].is_fixed() && event != DomainEvent::Removal {
            self.events.push((DomainEvent::Assign, domain));
        }
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// Reverts every change made at a checkpoint beyond `checkpoint`.
    ///
    /// Pending events are discarded since they describe changes which no longer exist.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        fdsolve_assert_simple!(checkpoint <= self.trail.get_checkpoint());
        self.events.clear();
        if checkpoint == self.trail.get_checkpoint() {
            return;
        }

        for entry in self.trail.synchronise(checkpoint) {
            self.domains[entry.domain].undo(entry.change);
        }
    }

    pub(crate) fn drain_events(&mut self) -> Drain<'_, (DomainEvent, DomainId)> {
        self.events.drain(..)
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// The value of every domain, which must all be fixed.
    pub(crate) fn fixed_values(&self) -> KeyedVec<DomainId, i32> {
        let mut values = KeyedVec::default();
        for domain in self.domains.keys() {
            fdsolve_assert_simple!(self.is_fixed(domain), "{domain} is not fixed");
            let _ = values.push(self.lower_bound(domain));
        }
        values
    }

    #[cfg(test)]
    pub(crate) fn create_for_testing(bounds: &[(i32, i32)]) -> (DomainStore, Vec<DomainId>) {
        let mut store = DomainStore::default();
        let domains = bounds
            .iter()
            .map(|&(lower_bound, upper_bound)| store.grow(lower_bound, upper_bound))
            .collect();
        (store, domains)
    }
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn removing_a_bound_moves_past_holes() {
        let (mut store, domains) = DomainStore::create_for_testing(&[(0, 5)]);
        let x = domains[0];

        store.remove(x, 1).expect("non-empty");
        store.remove(x, 2).expect("non-empty");
        store.remove(x, 0).expect("non-empty");

        assert_eq!(3, store.lower_bound(x));
        assert_eq!(3, store.size(x));
    }

    #[test]
    fn emptying_a_domain_fails_without_changes() {
        let (mut store, domains) = DomainStore::create_for_testing(&[(2, 4)]);
        let x = domains[0];

        assert_eq!(Err(EmptyDomain), store.set_lower_bound(x, 5));
        assert_eq!(Err(EmptyDomain), store.assign(x, 7));
        assert_eq!((2, 4), (store.lower_bound(x), store.upper_bound(x)));
        assert_eq!(0, store.drain_events().count());
    }

    #[test]
    fn removing_the_last_value_fails() {
        let (mut store, domains) = DomainStore::create_for_testing(&[(3, 3)]);

        assert_eq!(Err(EmptyDomain), store.remove(domains[0], 3));
        assert_eq!(Ok(()), store.remove(domains[0], 4));
    }

    #[test]
    fn assignment_emits_bound_and_assign_events() {
        let (mut store, domains) = DomainStore::create_for_testing(&[(0, 5)]);
        let x = domains[0];

        store.assign(x, 3).expect("value is in the domain");
        let events = store.drain_events().map(|(event, _)| event).collect::<Vec<_>>();

        assert_eq!(
            vec![DomainEvent::LowerBound, DomainEvent::UpperBound, DomainEvent::Assign],
            events
        );
    }

    #[test]
    fn synchronising_restores_the_domains_of_the_checkpoint() {
        let (mut store, domains) = DomainStore::create_for_testing(&[(0, 9), (-3, 3)]);
        store.new_checkpoint();
        let snapshot = store.clone();

        store.new_checkpoint();
        store.remove(domains[0], 4).expect("non-empty");
        store.set_upper_bound(domains[1], 0).expect("non-empty");
        store.new_checkpoint();
        store.assign(domains[0], 9).expect("value is in the domain");

        store.synchronise(1);

        assert_eq!(1, store.get_checkpoint());
        for domain in domains {
            assert_eq!(snapshot.domain(domain), store.domain(domain));
        }
        assert_eq!(0, store.drain_events().count());
    }

    #[test]
    fn synchronising_to_the_current_checkpoint_keeps_the_domains() {
        let (mut store, domains) = DomainStore::create_for_testing(&[(0, 9)]);
        store.set_lower_bound(domains[0], 3).expect("non-empty");

        store.synchronise(0);

        assert_eq!(3, store.lower_bound(domains[0]));
    }

    #[derive(Clone, Copy, Debug)]
    enum Change {
        LowerBound(usize, i64),
        UpperBound(usize, i64),
        Remove(usize, i64),
        Checkpoint,
    }

    fn change() -> impl Strategy<Value = Change> {
        prop_oneof![
            (0..3_usize, -5..15_i64).prop_map(|(domain, bound)| Change::LowerBound(domain, bound)),
            (0..3_usize, -5..15_i64).prop_map(|(domain, bound)| Change::UpperBound(domain, bound)),
            (0..3_usize, -5..15_i64).prop_map(|(domain, value)| Change::Remove(domain, value)),
            Just(Change::Checkpoint),
        ]
    }

    fn apply(store: &mut DomainStore, domains: &[DomainId], changes: &[Change]) {
        for &change in changes {
            let _ = match change {
                Change::LowerBound(domain, bound) => store.set_lower_bound(domains[domain], bound),
                Change::UpperBound(domain, bound) => store.set_upper_bound(domains[domain], bound),
                Change::Remove(domain, value) => store.remove(domains[domain], value),
                Change::Checkpoint => {
                    store.new_checkpoint();
                    Ok(())
                }
            };
        }
    }

    proptest! {
        #[test]
        fn synchronising_undoes_any_sequence_of_changes(
            before in vec(change(), 0..20),
            after in vec(change(), 0..40),
        ) {
            let (mut store, domains) = DomainStore::create_for_testing(&[(0, 9), (-3, 3), (5, 12)]);
            apply(&mut store, &domains, &before);
            let checkpoint = store.get_checkpoint();
            let snapshot = store.clone();

            store.new_checkpoint();
            apply(&mut store, &domains, &after);
            store.synchronise(checkpoint);

            for &domain in &domains {
                prop_assert_eq!(snapshot.domain(domain), store.domain(domain));
                prop_assert_eq!(
                    snapshot.iterate_domain(domain).collect::<Vec<_>>(),
                    store.iterate_domain(domain).collect::<Vec<_>>()
                );
            }
        }
    }
}
