use super::Constraint;
use super::ConstraintKind;
use crate::Var;

/// Creates the [`Constraint`] that `counts[k]` equals the number of `vars` which take the value
/// `values[k]`.
///
/// The lengths of `values` and `counts` are checked when the constraint is posted. Values which do
/// not occur in `values` are unrestricted.
pub fn global_cardinality(vars: &[Var], values: &[i32], counts: &[Var]) -> Constraint {
    Constraint::new(ConstraintKind::GlobalCardinality {
        vars: vars.to_vec(),
        values: values.to_vec(),
        counts: counts.to_vec(),
    })
}
