use std::fmt::Display;
use std::str::FromStr;

use crate::basic_types::ModelError;

/// The relation between the two sides of an arithmetic constraint.
///
/// Operators are resolved once when the model is built, either directly or from their usual
/// symbol through [`FromStr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationalOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelationalOp {
    /// The operator which holds exactly when `self` does not.
    pub fn negate(self) -> RelationalOp {
        match self {
            RelationalOp::Eq => RelationalOp::Ne,
            RelationalOp::Ne => RelationalOp::Eq,
            RelationalOp::Lt => RelationalOp::Ge,
            RelationalOp::Le => RelationalOp::Gt,
            RelationalOp::Gt => RelationalOp::Le,
            RelationalOp::Ge => RelationalOp::Lt,
        }
    }

    /// The operator to use when the two sides are swapped, `a < b` becomes `b > a`.
    pub fn swap_sides(self) -> RelationalOp {
        match self {
            RelationalOp::Eq | RelationalOp::Ne => self,
            RelationalOp::Lt => RelationalOp::Gt,
            RelationalOp::Le => RelationalOp::Ge,
            RelationalOp::Gt => RelationalOp::Lt,
            RelationalOp::Ge => RelationalOp::Le,
        }
    }

    pub fn holds<Value: Ord>(self, lhs: Value, rhs: Value) -> bool {
        match self {
            RelationalOp::Eq => lhs == rhs,
            RelationalOp::Ne => lhs != rhs,
            RelationalOp::Lt => lhs < rhs,
            RelationalOp::Le => lhs <= rhs,
            RelationalOp::Gt => lhs > rhs,
            RelationalOp::Ge => lhs >= rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            RelationalOp::Eq => "=",
            RelationalOp::Ne => "!=",
            RelationalOp::Lt => "<",
            RelationalOp::Le => "<=",
            RelationalOp::Gt => ">",
            RelationalOp::Ge => ">=",
        }
    }
}

impl FromStr for RelationalOp {
    type Err = ModelError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol.trim() {
            "=" | "==" => Ok(RelationalOp::Eq),
            "!=" | "<>" => Ok(RelationalOp::Ne),
            "<" => Ok(RelationalOp::Lt),
            "<=" => Ok(RelationalOp::Le),
            ">" => Ok(RelationalOp::Gt),
            ">=" => Ok(RelationalOp::Ge),
            other => Err(ModelError::UnsupportedOperator(other.to_owned())),
        }
    }
}

impl Display for RelationalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
