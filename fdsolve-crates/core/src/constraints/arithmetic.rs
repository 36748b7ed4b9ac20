use super::Constraint;
use super::ConstraintKind;
use super::LinearExpression;
use crate::basic_types::RelationalOp;
use crate::Var;

/// Creates the [`Constraint`] `lhs op rhs` over two linear expressions.
pub fn linear(
    lhs: impl Into<LinearExpression>,
    op: RelationalOp,
    rhs: impl Into<LinearExpression>,
) -> Constraint {
    Constraint::new(ConstraintKind::Linear {
        expression: lhs.into() - rhs,
        op,
    })
}

/// Creates the [`Constraint`] `lhs == rhs`.
pub fn equals(lhs: impl Into<LinearExpression>, rhs: impl Into<LinearExpression>) -> Constraint {
    linear(lhs, RelationalOp::Eq, rhs)
}

/// Creates the [`Constraint`] `lhs != rhs`.
pub fn not_equals(
    lhs: impl Into<LinearExpression>,
    rhs: impl Into<LinearExpression>,
) -> Constraint {
    linear(lhs, RelationalOp::Ne, rhs)
}

/// Creates the [`Constraint`] `lhs < rhs`.
pub fn less_than(lhs: impl Into<LinearExpression>, rhs: impl Into<LinearExpression>) -> Constraint {
    linear(lhs, RelationalOp::Lt, rhs)
}

/// Creates the [`Constraint`] `lhs <= rhs`.
pub fn less_than_or_equals(
    lhs: impl Into<LinearExpression>,
    rhs: impl Into<LinearExpression>,
) -> Constraint {
    linear(lhs, RelationalOp::Le, rhs)
}

/// Creates the [`Constraint`] `lhs > rhs`.
pub fn greater_than(
    lhs: impl Into<LinearExpression>,
    rhs: impl Into<LinearExpression>,
) -> Constraint {
    linear(lhs, RelationalOp::Gt, rhs)
}

/// Creates the [`Constraint`] `lhs >= rhs`.
pub fn greater_than_or_equals(
    lhs: impl Into<LinearExpression>,
    rhs: impl Into<LinearExpression>,
) -> Constraint {
    linear(lhs, RelationalOp::Ge, rhs)
}

/// Creates the [`Constraint`] `a * b == product`.
pub fn times(a: Var, b: Var, product: Var) -> Constraint {
    Constraint::new(ConstraintKind::Times { a, b, product })
}
