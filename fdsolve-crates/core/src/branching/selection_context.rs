use rand::rngs::SmallRng;

use crate::engine::DomainStore;
use crate::engine::WatchLists;
use crate::propagation::HasDomains;
#[cfg(doc)]
use crate::branching::Brancher;

/// The context provided to a [`Brancher`].
///
/// It gives read access to the domains (through [`crate::propagation::ReadDomains`]) and the
/// number of propagators attached to every variable; it is only mutable for the sake of the
/// random generator.
#[derive(Debug)]
pub(crate) struct SelectionContext<'a> {
    domains: &'a DomainStore,
    watch_lists: &'a WatchLists,
    random: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(
        domains: &'a DomainStore,
        watch_lists: &'a WatchLists,
        random: &'a mut SmallRng,
    ) -> Self {
        SelectionContext {
            domains,
            watch_lists,
            random,
        }
    }

    pub(crate) fn random(&mut self) -> &mut SmallRng {
        self.random
    }

    /// The number of propagators which watch `domain`.
    pub(crate) fn degree(&self, domain: crate::engine::DomainId) -> usize {
        self.watch_lists.degree(domain)
    }
}

impl HasDomains for SelectionContext<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}

/// Owns everything a [`SelectionContext`] borrows, so selectors can be tested in isolation.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct TestSelection {
    pub(crate) domains: DomainStore,
    pub(crate) watch_lists: WatchLists,
    pub(crate) random: SmallRng,
}

#[cfg(test)]
impl TestSelection {
    pub(crate) fn new(bounds: &[(i32, i32)]) -> (Self, Vec<crate::engine::DomainId>) {
        use rand::SeedableRng;

        let (domains, variables) = DomainStore::create_for_testing(bounds);
        let selection = TestSelection {
            domains,
            watch_lists: WatchLists::default(),
            random: SmallRng::seed_from_u64(42),
        };
        (selection, variables)
    }

    pub(crate) fn context(&mut self) -> SelectionContext<'_> {
        SelectionContext::new(&self.domains, &self.watch_lists, &mut self.random)
    }
}
