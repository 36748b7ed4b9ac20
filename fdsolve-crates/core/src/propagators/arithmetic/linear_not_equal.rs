use super::Term;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainEvents;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Priority;
use crate::propagation::Propagator;
use crate::propagation::ReadDomains;
use crate::propagation::RegistrationContext;

/// Propagator for the constraint `\sum terms != rhs`.
///
/// It only prunes once all but one term are fixed, in which case the single value which would
/// make the sum equal to `rhs` is removed.
#[derive(Clone, Debug)]
pub(crate) struct LinearNotEqualPropagator {
    terms: Box<[Term]>,
    rhs: i64,
}

impl LinearNotEqualPropagator {
    pub(crate) fn new(terms: Box<[Term]>, rhs: i64) -> Self {
        LinearNotEqualPropagator { terms, rhs }
    }

    /// The sum of the fixed terms and the single unfixed term, if there is at most one.
    fn fixed_sum_and_free_term(&self, context: &impl ReadDomains) -> Option<(i128, Option<Term>)> {
        let mut fixed_sum = 0_i128;
        let mut free_term = None;

        for term in self.terms.iter() {
            match context.fixed_value(term.domain) {
                Some(value) => fixed_sum += i128::from(term.coefficient) * i128::from(value),
                None if free_term.is_none() => free_term = Some(*term),
                None => return None,
            }
        }

        Some((fixed_sum, free_term))
    }

    /// The value of `term` which makes the sum equal to `rhs`, if it is an integer in range.
    fn forbidden_value(&self, fixed_sum: i128, term: Term) -> Option<i64> {
        let remainder = i128::from(self.rhs) - fixed_sum;
        let coefficient = i128::from(term.coefficient);
        if remainder % coefficient != 0 {
            return None;
        }
        i64::try_from(remainder / coefficient).ok()
    }
}

impl Propagator for LinearNotEqualPropagator {
    fn name(&self) -> &str {
        "LinearNe"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        for term in self.terms.iter() {
            context.register(term.domain, DomainEvents::ASSIGN);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        match self.fixed_sum_and_free_term(&context) {
            Some((fixed_sum, None)) if fixed_sum == i128::from(self.rhs) => {
                Err(Inconsistency::Conflict)
            }
            Some((fixed_sum, Some(term))) => {
                if let Some(value) = self.forbidden_value(fixed_sum, term) {
                    context.remove(term.domain, value)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        match self.fixed_sum_and_free_term(&context) {
            Some((fixed_sum, None)) => {
                if fixed_sum == i128::from(self.rhs) {
                    Entailment::Disentailed
                } else {
                    Entailment::Entailed
                }
            }
            Some((fixed_sum, Some(term))) => match self.forbidden_value(fixed_sum, term) {
                Some(value) if context.contains(term.domain, value) => Entailment::Undecided,
                _ => Entailment::Entailed,
            },
            None => {
                let rhs = i128::from(self.rhs);
                let (lower_bound_lhs, upper_bound_lhs) = super::sum_bounds(&self.terms, &context);
                if lower_bound_lhs > rhs || upper_bound_lhs < rhs {
                    Entailment::Entailed
                } else {
                    Entailment::Undecided
                }
            }
        }
    }
}
