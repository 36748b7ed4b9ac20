use crate::basic_types::EmptyDomain;
use crate::engine::DomainId;
use crate::engine::DomainStore;

/// Read-only access to the domains, passed to propagators when their entailment is checked.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    domains: &'a DomainStore,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(domains: &'a DomainStore) -> Self {
        PropagationContext { domains }
    }
}

/// Passed to propagators during propagation; it is the only way a propagator can change domains.
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    domains: &'a mut DomainStore,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(domains: &'a mut DomainStore) -> Self {
        PropagationContextMut { domains }
    }

    /// A context with a shorter lifetime, for handing to a wrapped propagator.
    pub(crate) fn reborrow(&mut self) -> PropagationContextMut<'_> {
        PropagationContextMut {
            domains: &mut *self.domains,
        }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            domains: self.domains,
        }
    }

    pub(crate) fn set_lower_bound(
        &mut self,
        domain: DomainId,
        bound: i64,
    ) -> Result<(), EmptyDomain> {
        self.domains.set_lower_bound(domain, bound)
    }

    pub(crate) fn set_upper_bound(
        &mut self,
        domain: DomainId,
        bound: i64,
    ) -> Result<(), EmptyDomain> {
        self.domains.set_upper_bound(domain, bound)
    }

    pub(crate) fn remove(&mut self, domain: DomainId, value: i64) -> Result<(), EmptyDomain> {
        self.domains.remove(domain, value)
    }

    pub(crate) fn assign(&mut self, domain: DomainId, value: i64) -> Result<(), EmptyDomain> {
        self.domains.assign(domain, value)
    }
}

/// A trait which defines common methods for retrieving the [`DomainStore`] from the structure
/// which implements this trait.
pub(crate) trait HasDomains {
    fn domains(&self) -> &DomainStore;
}

impl HasDomains for PropagationContext<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}

impl HasDomains for PropagationContextMut<'_> {
    fn domains(&self) -> &DomainStore {
        self.domains
    }
}

impl HasDomains for DomainStore {
    fn domains(&self) -> &DomainStore {
        self
    }
}

pub(crate) trait ReadDomains: HasDomains {
    fn lower_bound(&self, domain: DomainId) -> i32 {
        self.domains().lower_bound(domain)
    }

    fn upper_bound(&self, domain: DomainId) -> i32 {
        self.domains().upper_bound(domain)
    }

    /// Returns `true` if the domain is a singleton.
    fn is_fixed(&self, domain: DomainId) -> bool {
        self.domains().is_fixed(domain)
    }

    fn fixed_value(&self, domain: DomainId) -> Option<i32> {
        self.domains().fixed_value(domain)
    }

    fn contains(&self, domain: DomainId, value: i64) -> bool {
        self.domains().contains(domain, value)
    }

    fn size(&self, domain: DomainId) -> usize {
        self.domains().size(domain)
    }

    fn iterate_domain(&self, domain: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.domains().iterate_domain(domain)
    }
}

impl<T: HasDomains> ReadDomains for T {}
