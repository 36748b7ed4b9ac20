use super::Constraint;
use super::ConstraintKind;
use crate::Var;

/// Creates the [`Constraint`] `array[index] == value`, where `index` is 0-based.
///
/// Any value of `index` outside `0..array.len()` is infeasible.
pub fn element(array: &[Var], index: Var, value: Var) -> Constraint {
    Constraint::new(ConstraintKind::Element {
        array: array.to_vec(),
        index,
        value,
    })
}
