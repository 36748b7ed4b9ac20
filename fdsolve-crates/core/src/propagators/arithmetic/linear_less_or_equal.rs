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

/// Propagator for the constraint `\sum terms <= rhs`.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator {
    terms: Box<[Term]>,
    rhs: i64,
}

impl LinearLessOrEqualPropagator {
    pub(crate) fn new(terms: Box<[Term]>, rhs: i64) -> Self {
        LinearLessOrEqualPropagator { terms, rhs }
    }
}

impl Propagator for LinearLessOrEqualPropagator {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        for term in self.terms.iter() {
            let events = if term.coefficient > 0 {
                DomainEvents::LOWER_BOUND
            } else {
                DomainEvents::UPPER_BOUND
            };
            context.register(term.domain, events);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let rhs = i128::from(self.rhs);
        let (lower_bound_lhs, _) = sum_bounds(&self.terms, &context);
        if lower_bound_lhs > rhs {
            return Err(Inconsistency::Conflict);
        }

        for term in self.terms.iter() {
            let bound = rhs - (lower_bound_lhs - term.min(&context));
            term.set_max(&mut context, bound)?;
        }

        Ok(())
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        let rhs = i128::from(self.rhs);
        let (lower_bound_lhs, upper_bound_lhs) = sum_bounds(&self.terms, &context);
        if upper_bound_lhs <= rhs {
            Entailment::Entailed
        } else if lower_bound_lhs > rhs {
            Entailment::Disentailed
        } else {
            Entailment::Undecided
        }
    }
}
