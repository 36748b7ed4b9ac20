use super::Constraint;
use super::ConstraintKind;
use crate::Var;

/// Creates the [`Constraint`] that enforces that all the given `vars` take distinct values.
pub fn all_different(vars: &[Var]) -> Constraint {
    Constraint::new(ConstraintKind::AllDifferent(vars.to_vec()))
}
