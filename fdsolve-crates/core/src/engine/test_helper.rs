//! A small harness for testing propagators in isolation.
use super::DomainId;
use super::DomainStore;
use super::IntegerDomain;
use super::PropagationEngine;
use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::propagation::Entailment;
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;

#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) domains: DomainStore,
    engine: PropagationEngine,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.domains.grow(lower_bound, upper_bound)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: &[i32]) -> DomainId {
        let domain = IntegerDomain::from_values(values).expect("non-empty domain");
        self.domains.grow_sparse(domain)
    }

    /// Adds the propagator and propagates to a fixpoint.
    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<PropagatorId, crate::basic_types::Inconsistency> {
        let id = self.engine.add_propagator(Box::new(propagator));
        self.engine.propagate(&mut self.domains)?;
        Ok(id)
    }

    pub(crate) fn propagate(&mut self) -> PropagationStatus {
        self.engine.propagate(&mut self.domains)
    }

    pub(crate) fn entailment(&self, propagator: PropagatorId) -> Entailment {
        self.engine.entailment(propagator, &self.domains)
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.domains.set_lower_bound(var, bound as i64)
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.domains.set_upper_bound(var, bound as i64)
    }

    pub(crate) fn assign(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.domains.assign(var, value as i64)
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.domains.remove(var, value as i64)
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.domains.lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.domains.upper_bound(var)
    }

    pub(crate) fn values(&self, var: DomainId) -> Vec<i32> {
        self.domains.iterate_domain(var).collect()
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lower_bound: i32, upper_bound: i32) {
        let actual = (self.lower_bound(var), self.upper_bound(var));
        assert_eq!(
            (lower_bound, upper_bound),
            actual,
            "the expected bounds [{lower_bound}, {upper_bound}] of {var} did not match the actual bounds [{}, {}]",
            actual.0,
            actual.1
        );
    }
}
