//! Turns [`Constraint`]s into propagators.
//!
//! Primitive constraints map onto a single propagator. Logical combinations are decomposed: every
//! operand is reified into a 0/1 literal and the combination becomes a linear constraint over the
//! literals, e.g. a disjunction becomes `sum literals >= 1`.
use super::Constraint;
use super::ConstraintKind;
use super::LinearExpression;
use crate::basic_types::RelationalOp;
use crate::constraints;
use crate::engine::DomainId;
use crate::fdsolve_assert_eq_simple;
use crate::fdsolve_assert_simple;
use crate::propagation::Propagator;
use crate::propagators::AllDifferentPropagator;
use crate::propagators::ElementPropagator;
use crate::propagators::GlobalCardinalityPropagator;
use crate::propagators::LinearEqualPropagator;
use crate::propagators::LinearLessOrEqualPropagator;
use crate::propagators::LinearNotEqualPropagator;
use crate::propagators::NegatedPropagator;
use crate::propagators::ReifiedPropagator;
use crate::propagators::Term;
use crate::propagators::TimesPropagator;
use crate::Problem;
use crate::Var;

/// Adds the propagators which enforce `constraint` to `problem`.
///
/// The constraint has to be validated with [`Constraint::validate`] beforehand.
pub(crate) fn enforce(problem: &mut Problem, constraint: &Constraint) {
    if let Some(propagator) = primitive_propagator(&constraint.kind) {
        let _ = problem.add_propagator(propagator);
        return;
    }

    match &constraint.kind {
        ConstraintKind::And(constraints) => constraints
            .iter()
            .for_each(|constraint| enforce(problem, constraint)),
        ConstraintKind::Or(constraints) if constraints.len() == 1 => {
            enforce(problem, &constraints[0])
        }
        ConstraintKind::Or(constraints) => {
            let literals = reify_all(problem, constraints);
            enforce(problem, &at_least(&literals, 1))
        }
        ConstraintKind::Not(inner) if inner.is_global() => {
            let propagator = global_propagator(&inner.kind);
            let _ = problem.add_propagator(Box::new(NegatedPropagator::new(propagator)));
        }
        ConstraintKind::Not(inner) => enforce(problem, &inner.negation()),
        ConstraintKind::Implies(antecedent, consequent) => {
            let antecedent = reify(problem, antecedent);
            let consequent = reify(problem, consequent);
            enforce(problem, &constraints::less_than_or_equals(antecedent, consequent))
        }
        ConstraintKind::Reified {
            constraint,
            literal,
        } => reify_into(problem, constraint, *literal),
        ConstraintKind::Linear { .. }
        | ConstraintKind::Times { .. }
        | ConstraintKind::AllDifferent(_)
        | ConstraintKind::GlobalCardinality { .. }
        | ConstraintKind::Element { .. } => unreachable!("primitives are handled above"),
    }
}

/// Creates a new 0/1 variable which is 1 exactly when `constraint` holds.
fn reify(problem: &mut Problem, constraint: &Constraint) -> Var {
    let literal = problem.new_aux_variable(0, 1);
    reify_into(problem, constraint, literal);
    literal
}

/// Adds the propagators which enforce `literal == 1 <-> constraint` to `problem`.
pub(crate) fn reify_into(problem: &mut Problem, constraint: &Constraint, literal: Var) {
    if let Some(propagator) = primitive_propagator(&constraint.kind) {
        let negation = primitive_propagator(&constraint.negation().kind).unwrap_or_else(|| {
            Box::new(NegatedPropagator::new(global_propagator(&constraint.kind)))
        });
        let _ = problem.add_propagator(Box::new(ReifiedPropagator::new(
            propagator,
            negation,
            literal.domain,
        )));
        return;
    }

    match &constraint.kind {
        ConstraintKind::And(constraints) => {
            let literals = reify_all(problem, constraints);
            let num_literals = literals.len() as i32;
            reify_into(problem, &at_least(&literals, num_literals), literal)
        }
        ConstraintKind::Or(constraints) => {
            let literals = reify_all(problem, constraints);
            reify_into(problem, &at_least(&literals, 1), literal)
        }
        ConstraintKind::Not(inner) if inner.is_global() => {
            let _ = problem.add_propagator(Box::new(ReifiedPropagator::new(
                Box::new(NegatedPropagator::new(global_propagator(&inner.kind))),
                global_propagator(&inner.kind),
                literal.domain,
            )));
        }
        ConstraintKind::Not(inner) => reify_into(problem, &inner.negation(), literal),
        ConstraintKind::Implies(antecedent, consequent) => {
            let disjunction = antecedent.negation().or(consequent.as_ref().clone());
            reify_into(problem, &disjunction, literal)
        }
        ConstraintKind::Reified {
            constraint: inner,
            literal: inner_literal,
        } => {
            enforce(
                problem,
                &constraints::greater_than_or_equals(*inner_literal, 0)
                    .and(constraints::less_than_or_equals(*inner_literal, 1)),
            );
            let holds = reify(problem, inner);
            reify_into(problem, &constraints::equals(*inner_literal, holds), literal)
        }
        ConstraintKind::Linear { .. }
        | ConstraintKind::Times { .. }
        | ConstraintKind::AllDifferent(_)
        | ConstraintKind::GlobalCardinality { .. }
        | ConstraintKind::Element { .. } => unreachable!("primitives are handled above"),
    }
}

/// Whether the constraint maps onto a propagator which has no counterpart for its negation.
pub(super) fn has_no_dedicated_negation(kind: &ConstraintKind) -> bool {
    matches!(
        kind,
        ConstraintKind::Times { .. }
            | ConstraintKind::AllDifferent(_)
            | ConstraintKind::GlobalCardinality { .. }
            | ConstraintKind::Element { .. }
    )
}

fn reify_all(problem: &mut Problem, constraints: &[Constraint]) -> Vec<Var> {
    constraints
        .iter()
        .map(|constraint| reify(problem, constraint))
        .collect()
}

/// `sum literals >= bound`
fn at_least(literals: &[Var], bound: i32) -> Constraint {
    let sum = literals
        .iter()
        .fold(LinearExpression::new(), |sum, &literal| sum + literal);
    constraints::linear(sum, RelationalOp::Ge, bound)
}

fn global_propagator(kind: &ConstraintKind) -> Box<dyn Propagator> {
    fdsolve_assert_simple!(has_no_dedicated_negation(kind));
    primitive_propagator(kind).expect("global constraints map onto a single propagator")
}

/// The propagator of a primitive constraint, or `None` for a logical combination.
fn primitive_propagator(kind: &ConstraintKind) -> Option<Box<dyn Propagator>> {
    let propagator: Box<dyn Propagator> = match kind {
        ConstraintKind::Linear { expression, op } => linear_propagator(expression, *op),
        ConstraintKind::Times { a, b, product } => {
            Box::new(TimesPropagator::new(a.domain, b.domain, product.domain))
        }
        ConstraintKind::AllDifferent(vars) => {
            Box::new(AllDifferentPropagator::new(domains(vars)))
        }
        ConstraintKind::GlobalCardinality {
            vars,
            values,
            counts,
        } => {
            fdsolve_assert_eq_simple!(values.len(), counts.len());
            Box::new(GlobalCardinalityPropagator::new(
                domains(vars),
                values.clone().into_boxed_slice(),
                domains(counts),
            ))
        }
        ConstraintKind::Element {
            array,
            index,
            value,
        } => Box::new(ElementPropagator::new(
            domains(array),
            index.domain,
            value.domain,
        )),
        ConstraintKind::And(_)
        | ConstraintKind::Or(_)
        | ConstraintKind::Not(_)
        | ConstraintKind::Implies(_, _)
        | ConstraintKind::Reified { .. } => return None,
    };

    Some(propagator)
}

/// The propagator for `expression op 0`.
///
/// With `expression = terms + k`, every operator is rewritten into a form over the terms with the
/// constant moved to the right-hand side; strict inequalities tighten the bound by one.
fn linear_propagator(expression: &LinearExpression, op: RelationalOp) -> Box<dyn Propagator> {
    let terms = |sign: i64| {
        expression
            .terms()
            .iter()
            .map(|&(coefficient, var)| Term::new(sign * coefficient, var.domain))
            .collect::<Box<[Term]>>()
    };
    let constant = expression.constant();

    match op {
        RelationalOp::Le => Box::new(LinearLessOrEqualPropagator::new(terms(1), -constant)),
        RelationalOp::Lt => Box::new(LinearLessOrEqualPropagator::new(terms(1), -constant - 1)),
        RelationalOp::Ge => Box::new(LinearLessOrEqualPropagator::new(terms(-1), constant)),
        RelationalOp::Gt => Box::new(LinearLessOrEqualPropagator::new(terms(-1), constant - 1)),
        RelationalOp::Eq => Box::new(LinearEqualPropagator::new(terms(1), -constant)),
        RelationalOp::Ne => Box::new(LinearNotEqualPropagator::new(terms(1), -constant)),
    }
}

fn domains(vars: &[Var]) -> Box<[DomainId]> {
    vars.iter().map(|var| var.domain).collect()
}
