use super::sum_bounds;
use super::Term;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainEvents;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Priority;
use crate::propagation::Propagator;
use crate::propagation::RegistrationContext;

/// Propagator for the constraint `\sum terms = rhs`, tightening every term from the bounds of
/// the other terms in both directions.
#[derive(Clone, Debug)]
pub(crate) struct LinearEqualPropagator {
    terms: Box<[Term]>,
    rhs: i64,
}

impl LinearEqualPropagator {
    pub(crate) fn new(terms: Box<[Term]>, rhs: i64) -> Self {
        LinearEqualPropagator { terms, rhs }
    }
}

impl Propagator for LinearEqualPropagator {
    fn name(&self) -> &str {
        "LinearEq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        for term in self.terms.iter() {
            context.register(term.domain, DomainEvents::BOUNDS);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let rhs = i128::from(self.rhs);
        let (lower_bound_lhs, upper_bound_lhs) = sum_bounds(&self.terms, &context);
        if lower_bound_lhs > rhs || upper_bound_lhs < rhs {
            return Err(Inconsistency::Conflict);
        }

        for term in self.terms.iter() {
            let others_min = lower_bound_lhs - term.min(&context);
            let others_max = upper_bound_lhs - term.max(&context);

            term.set_max(&mut context, rhs - others_min)?;
            term.set_min(&mut context, rhs - others_max)?;
        }

        Ok(())
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        let rhs = i128::from(self.rhs);
        let (lower_bound_lhs, upper_bound_lhs) = sum_bounds(&self.terms, &context);
        if lower_bound_lhs > rhs || upper_bound_lhs < rhs {
            Entailment::Disentailed
        } else if lower_bound_lhs == upper_bound_lhs {
            Entailment::Entailed
        } else {
            Entailment::Undecided
        }
    }
}
