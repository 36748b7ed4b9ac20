use crate::basic_types::PropagationStatus;
use crate::engine::DomainEvents;
use crate::engine::DomainId;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::Priority;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::ReadDomains;
use crate::propagation::RegistrationContext;

/// Propagator for `literal <-> constraint`, where `literal` is a 0/1 variable.
///
/// Both the constraint and its negation are given as propagators. Once the literal is fixed the
/// corresponding one is propagated; before that, the literal is fixed as soon as the constraint is
/// found to be entailed or disentailed.
#[derive(Debug)]
pub(crate) struct ReifiedPropagator {
    propagator: Box<dyn Propagator>,
    negation: Box<dyn Propagator>,
    literal: DomainId,
    name: String,
}

impl ReifiedPropagator {
    pub(crate) fn new(
        propagator: Box<dyn Propagator>,
        negation: Box<dyn Propagator>,
        literal: DomainId,
    ) -> Self {
        let name = format!("Reified({})", propagator.name());
        ReifiedPropagator {
            propagator,
            negation,
            literal,
            name,
        }
    }
}

impl Propagator for ReifiedPropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> Priority {
        self.propagator.priority()
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        self.propagator.register(context);
        self.negation.register(context);
        context.register(self.literal, DomainEvents::ASSIGN);
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        context.set_lower_bound(self.literal, 0)?;
        context.set_upper_bound(self.literal, 1)?;

        match context.fixed_value(self.literal) {
            Some(1) => self.propagator.propagate(context.reborrow()),
            Some(_) => self.negation.propagate(context.reborrow()),
            None => {
                match self.propagator.entailment(context.as_readonly()) {
                    Entailment::Entailed => context.assign(self.literal, 1)?,
                    Entailment::Disentailed => context.assign(self.literal, 0)?,
                    Entailment::Undecided => {}
                }
                Ok(())
            }
        }
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        match context.fixed_value(self.literal) {
            Some(1) => self.propagator.entailment(context),
            Some(_) => self.negation.entailment(context),
            None => Entailment::Undecided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSolver;
    use crate::propagators::LinearLessOrEqualPropagator;
    use crate::propagators::Term;

    /// `literal <-> x <= rhs`
    fn reified_at_most(x: DomainId, rhs: i64, literal: DomainId) -> ReifiedPropagator {
        ReifiedPropagator::new(
            Box::new(LinearLessOrEqualPropagator::new(
                [Term::new(1, x)].into(),
                rhs,
            )),
            Box::new(LinearLessOrEqualPropagator::new(
                [Term::new(-1, x)].into(),
                -rhs - 1,
            )),
            literal,
        )
    }

    #[test]
    fn literal_follows_entailment() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let literal = solver.new_variable(0, 1);

        let propagator = solver
            .new_propagator(reified_at_most(x, 3, literal))
            .expect("no empty domains");
        assert_eq!(Entailment::Undecided, solver.entailment(propagator));

        solver.set_upper_bound(x, 2).expect("non-empty");
        solver.propagate().expect("no conflict");
        assert_eq!(vec![1], solver.values(literal));
    }

    #[test]
    fn false_literal_enforces_the_negation() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let literal = solver.new_variable(0, 1);

        let propagator = solver
            .new_propagator(reified_at_most(x, 3, literal))
            .expect("no empty domains");
        solver.assign(literal, 0).expect("non-empty");
        solver.propagate().expect("no conflict");

        solver.assert_bounds(x, 4, 10);
        assert_eq!(Entailment::Entailed, solver.entailment(propagator));
    }

    #[test]
    fn true_literal_enforces_the_constraint() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let literal = solver.new_variable(1, 1);

        let _ = solver
            .new_propagator(reified_at_most(x, 3, literal))
            .expect("no empty domains");

        solver.assert_bounds(x, 0, 3);
    }

    #[test]
    fn literal_is_restricted_to_booleans() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let literal = solver.new_variable(-3, 8);

        let _ = solver
            .new_propagator(reified_at_most(x, 3, literal))
            .expect("no empty domains");

        solver.assert_bounds(literal, 0, 1);
    }
}
