//! The machinery which maintains the domains and drives propagation and search.
//!
//! The [`DomainStore`] owns the domains of all variables together with the trail which allows
//! restoring them; the [`PropagationEngine`] runs propagators until a fixpoint is reached; the
//! [`DepthFirstSearch`] branches, backtracks and reports the solutions it encounters.
mod domain_events;
mod domain_id;
mod domain_store;
mod integer_domain;
mod predicate;
mod propagation_engine;
mod propagator_queue;
mod search;
mod solver_statistics;
pub mod termination;
#[cfg(test)]
pub(crate) mod test_helper;
mod watch_lists;

pub(crate) use domain_events::DomainEvent;
pub(crate) use domain_events::DomainEvents;
pub(crate) use domain_id::DomainId;
pub(crate) use domain_store::DomainStore;
pub(crate) use integer_domain::DomainChange;
pub(crate) use integer_domain::IntegerDomain;
pub(crate) use predicate::Predicate;
pub(crate) use propagation_engine::PropagationEngine;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use search::DepthFirstSearch;
pub(crate) use search::SearchResult;
pub use solver_statistics::SolverStatistics;
pub(crate) use watch_lists::RegistrationContext;
pub(crate) use watch_lists::WatchLists;
