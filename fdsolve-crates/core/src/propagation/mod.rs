//! The interface between the engine and the propagators.
//!
//! A propagator is the executable form of a constraint. It is woken up whenever a domain it
//! subscribed to changes, removes the values which cannot be part of any solution, and reports
//! whether its constraint is entailed so that reification and the final solution check can rely on
//! it.
mod contexts;
mod propagator_id;
mod store;

use std::fmt::Debug;

pub(crate) use contexts::*;
pub(crate) use propagator_id::PropagatorId;
pub(crate) use store::PropagatorStore;

use crate::basic_types::PropagationStatus;
pub(crate) use crate::engine::RegistrationContext;

/// The order in which enqueued propagators run; cheaper propagators should use a higher
/// priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Priority {
    High = 0,
    Medium = 1,
}

impl Priority {
    pub(crate) const NUM_LEVELS: u32 = 2;
}

/// Whether the constraint of a propagator holds for every assignment of the current domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entailment {
    /// Every remaining assignment satisfies the constraint.
    Entailed,
    /// No remaining assignment satisfies the constraint.
    Disentailed,
    /// Neither of the above can be established (yet).
    Undecided,
}

impl Entailment {
    pub(crate) fn negate(self) -> Entailment {
        match self {
            Entailment::Entailed => Entailment::Disentailed,
            Entailment::Disentailed => Entailment::Entailed,
            Entailment::Undecided => Entailment::Undecided,
        }
    }
}

/// A propagator prunes the domains of the variables of one constraint.
///
/// Propagation has to be sound: it may only remove values which cannot be part of a solution of
/// the constraint. It does not have to reach a fixpoint by itself, since any change it makes wakes
/// up the propagators watching the changed domain, itself included.
///
/// The [`Propagator::entailment`] has to be exact once all variables of the constraint are fixed;
/// this is what makes every returned solution satisfy every posted constraint.
pub(crate) trait Propagator: Debug {
    /// The name of the propagator, used for logging.
    fn name(&self) -> &str;

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    /// Subscribes the propagator to the domain events it should be woken up for.
    fn register(&self, context: &mut RegistrationContext<'_>);

    /// Removes unsupported values; returns an error when the current domains admit no solution of
    /// the constraint.
    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatus;

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment;
}
