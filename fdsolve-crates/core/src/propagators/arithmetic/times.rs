use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainEvents;
use crate::engine::DomainId;
use crate::math::div_ceil;
use crate::math::div_floor;
use crate::math::saturating_i64;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::ReadDomains;
use crate::propagation::RegistrationContext;

/// A bounds-consistent propagator for `a * b = c`.
#[derive(Clone, Debug)]
pub(crate) struct TimesPropagator {
    a: DomainId,
    b: DomainId,
    c: DomainId,
}

impl TimesPropagator {
    pub(crate) fn new(a: DomainId, b: DomainId, c: DomainId) -> Self {
        TimesPropagator { a, b, c }
    }
}

fn bounds(context: &impl ReadDomains, domain: DomainId) -> (i64, i64) {
    (
        context.lower_bound(domain) as i64,
        context.upper_bound(domain) as i64,
    )
}

fn product_bounds((a_lb, a_ub): (i64, i64), (b_lb, b_ub): (i64, i64)) -> (i64, i64) {
    let corners = [a_lb * b_lb, a_lb * b_ub, a_ub * b_lb, a_ub * b_ub];
    (
        corners.iter().copied().min().unwrap_or_default(),
        corners.iter().copied().max().unwrap_or_default(),
    )
}

/// Restricts `quotient` to `numerator / denominator`; the denominator may not contain zero.
fn propagate_division(
    context: &mut PropagationContextMut<'_>,
    numerator: DomainId,
    denominator: DomainId,
    quotient: DomainId,
) -> Result<(), EmptyDomain> {
    let (n_lb, n_ub) = bounds(&*context, numerator);
    let (d_lb, d_ub) = bounds(&*context, denominator);
    if d_lb <= 0 && d_ub >= 0 {
        return Ok(());
    }

    let corners = [(n_lb, d_lb), (n_lb, d_ub), (n_ub, d_lb), (n_ub, d_ub)];
    let lower_bound = corners
        .iter()
        .map(|&(n, d)| saturating_i64(div_ceil(n.into(), d.into())))
        .min()
        .unwrap_or_default();
    let upper_bound = corners
        .iter()
        .map(|&(n, d)| saturating_i64(div_floor(n.into(), d.into())))
        .max()
        .unwrap_or_default();

    context.set_lower_bound(quotient, lower_bound)?;
    context.set_upper_bound(quotient, upper_bound)
}

impl Propagator for TimesPropagator {
    fn name(&self) -> &str {
        "Times"
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        context.register(self.a, DomainEvents::ANY);
        context.register(self.b, DomainEvents::ANY);
        context.register(self.c, DomainEvents::ANY);
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let (c_lb, c_ub) = product_bounds(bounds(&context, self.a), bounds(&context, self.b));
        context.set_lower_bound(self.c, c_lb)?;
        context.set_upper_bound(self.c, c_ub)?;

        if !context.contains(self.c, 0) {
            context.remove(self.a, 0)?;
            context.remove(self.b, 0)?;
        }

        propagate_division(&mut context, self.c, self.b, self.a)?;
        propagate_division(&mut context, self.c, self.a, self.b)?;

        if let (Some(a), Some(b), Some(c)) = (
            context.fixed_value(self.a),
            context.fixed_value(self.b),
            context.fixed_value(self.c),
        ) {
            if a as i64 * b as i64 != c as i64 {
                return Err(Inconsistency::Conflict);
            }
        }

        Ok(())
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        if let (Some(a), Some(b), Some(c)) = (
            context.fixed_value(self.a),
            context.fixed_value(self.b),
            context.fixed_value(self.c),
        ) {
            return if a as i64 * b as i64 == c as i64 {
                Entailment::Entailed
            } else {
                Entailment::Disentailed
            };
        }

        let (lower_bound, upper_bound) =
            product_bounds(bounds(&context, self.a), bounds(&context, self.b));
        let (c_lb, c_ub) = bounds(&context, self.c);
        if upper_bound < c_lb || lower_bound > c_ub {
            Entailment::Disentailed
        } else {
            Entailment::Undecided
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSolver;

    #[test]
    fn product_bounds_are_propagated() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(-2, 3);
        let b = solver.new_variable(1, 4);
        let c = solver.new_variable(-100, 100);

        let _ = solver
            .new_propagator(TimesPropagator::new(a, b, c))
            .expect("no empty domains");

        solver.assert_bounds(c, -8, 12);
    }

    #[test]
    fn factors_are_divided_out() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 10);
        let b = solver.new_variable(2, 3);
        let c = solver.new_variable(7, 9);

        let _ = solver
            .new_propagator(TimesPropagator::new(a, b, c))
            .expect("no empty domains");

        solver.assert_bounds(a, 3, 4);
        solver.assert_bounds(c, 7, 9);
    }

    #[test]
    fn non_zero_product_removes_zero_factors() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(-3, 3);
        let b = solver.new_variable(-3, 3);
        let c = solver.new_variable(1, 1);

        let _ = solver
            .new_propagator(TimesPropagator::new(a, b, c))
            .expect("no empty domains");

        assert!(!solver.values(a).contains(&0));
        assert!(!solver.values(b).contains(&0));
    }

    #[test]
    fn fixed_factors_fix_the_product() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(3, 3);
        let c = solver.new_variable(5, 7);

        let result = solver.new_propagator(TimesPropagator::new(a, b, c));
        assert!(result.is_ok());
        solver.assert_bounds(c, 6, 6);
    }
}
