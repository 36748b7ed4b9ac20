use super::Constraint;
use super::ConstraintKind;
use crate::Var;

/// Creates the [`Constraint`] which holds when every one of `constraints` holds.
///
/// The conjunction of no constraints is always satisfied.
pub fn and(constraints: impl IntoIterator<Item = Constraint>) -> Constraint {
    Constraint::new(ConstraintKind::And(constraints.into_iter().collect()))
}

/// Creates the [`Constraint`] which holds when at least one of `constraints` holds.
///
/// The disjunction of no constraints is never satisfied.
pub fn or(constraints: impl IntoIterator<Item = Constraint>) -> Constraint {
    Constraint::new(ConstraintKind::Or(constraints.into_iter().collect()))
}

/// Creates the [`Constraint`] `literal == 1 <-> constraint`.
///
/// Posting it restricts `literal` to the values 0 and 1.
pub fn reified(constraint: Constraint, literal: Var) -> Constraint {
    Constraint::new(ConstraintKind::Reified {
        constraint: Box::new(constraint),
        literal,
    })
}
