use std::fmt::Display;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use crate::basic_types::Solution;
use crate::Var;

/// A linear combination `sum coefficient * var + constant` of variables.
///
/// Expressions are built with the arithmetic operators on [`Var`], integers and other
/// expressions:
/// ```rust
/// # use fdsolve_core::{LinearExpression, Problem};
/// let mut problem = Problem::new("example");
/// let x = problem.variable("x", 0, 5).unwrap();
/// let y = problem.variable("y", 0, 5).unwrap();
///
/// let expression = x * 2 - y + 3;
/// assert_eq!(vec![(2, x), (-1, y)], expression.terms().to_vec());
/// assert_eq!(3, expression.constant());
/// ```
///
/// Terms over the same variable are merged and terms with a zero coefficient are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpression {
    terms: Vec<(i64, Var)>,
    constant: i64,
}

impl LinearExpression {
    pub fn new() -> Self {
        LinearExpression::default()
    }

    /// The weighted sum `sum coefficients[i] * vars[i]`; extra elements of the longer slice are
    /// ignored.
    pub fn weighted_sum(coefficients: &[i32], vars: &[Var]) -> Self {
        coefficients
            .iter()
            .zip(vars)
            .fold(LinearExpression::new(), |expression, (&coefficient, &var)| {
                expression.with_term(coefficient as i64, var)
            })
    }

    /// Adds `coefficient * var` to the expression.
    pub fn with_term(mut self, coefficient: i64, var: Var) -> Self {
        if let Some(position) = self.terms.iter().position(|&(_, other)| other == var) {
            self.terms[position].0 += coefficient;
            if self.terms[position].0 == 0 {
                let _ = self.terms.remove(position);
            }
        } else if coefficient != 0 {
            self.terms.push((coefficient, var));
        }
        self
    }

    pub fn with_constant(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    pub fn terms(&self) -> &[(i64, Var)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.terms.iter().map(|&(_, var)| var)
    }

    /// The value of the expression under the assignment of `solution`.
    ///
    /// The value is exact: it is computed in `i128`, which no sum of the terms can overflow.
    pub fn evaluate(&self, solution: &Solution) -> i128 {
        self.terms
            .iter()
            .map(|&(coefficient, var)| i128::from(coefficient) * i128::from(solution.value(var)))
            .sum::<i128>()
            + i128::from(self.constant)
    }

    pub(crate) fn scaled(mut self, factor: i64) -> Self {
        if factor == 0 {
            return LinearExpression::new();
        }
        for term in self.terms.iter_mut() {
            term.0 *= factor;
        }
        self.constant *= factor;
        self
    }
}

impl Display for LinearExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }

        for (index, &(coefficient, var)) in self.terms.iter().enumerate() {
            match (index, coefficient) {
                (0, 1) => write!(f, "{var}")?,
                (0, -1) => write!(f, "-{var}")?,
                (0, _) => write!(f, "{coefficient}*{var}")?,
                (_, 1) => write!(f, " + {var}")?,
                (_, -1) => write!(f, " - {var}")?,
                (_, _) if coefficient < 0 => write!(f, " - {}*{var}", -coefficient)?,
                (_, _) => write!(f, " + {coefficient}*{var}")?,
            }
        }

        match self.constant {
            0 => Ok(()),
            constant if constant < 0 => write!(f, " - {}", -constant),
            constant => write!(f, " + {constant}"),
        }
    }
}

impl From<Var> for LinearExpression {
    fn from(var: Var) -> Self {
        LinearExpression::new().with_term(1, var)
    }
}

impl From<i32> for LinearExpression {
    fn from(constant: i32) -> Self {
        LinearExpression::new().with_constant(constant as i64)
    }
}

impl<Rhs: Into<LinearExpression>> Add<Rhs> for LinearExpression {
    type Output = LinearExpression;

    fn add(self, rhs: Rhs) -> LinearExpression {
        let rhs = rhs.into();
        rhs.terms
            .into_iter()
            .fold(self, |expression, (coefficient, var)| {
                expression.with_term(coefficient, var)
            })
            .with_constant(rhs.constant)
    }
}

impl<Rhs: Into<LinearExpression>> Sub<Rhs> for LinearExpression {
    type Output = LinearExpression;

    fn sub(self, rhs: Rhs) -> LinearExpression {
        self + rhs.into().scaled(-1)
    }
}

impl Mul<i32> for LinearExpression {
    type Output = LinearExpression;

    fn mul(self, factor: i32) -> LinearExpression {
        self.scaled(factor as i64)
    }
}

impl Neg for LinearExpression {
    type Output = LinearExpression;

    fn neg(self) -> LinearExpression {
        self.scaled(-1)
    }
}

impl<Rhs: Into<LinearExpression>> Add<Rhs> for Var {
    type Output = LinearExpression;

    fn add(self, rhs: Rhs) -> LinearExpression {
        LinearExpression::from(self) + rhs
    }
}

impl<Rhs: Into<LinearExpression>> Sub<Rhs> for Var {
    type Output = LinearExpression;

    fn sub(self, rhs: Rhs) -> LinearExpression {
        LinearExpression::from(self) - rhs
    }
}

impl Mul<i32> for Var {
    type Output = LinearExpression;

    fn mul(self, factor: i32) -> LinearExpression {
        LinearExpression::from(self) * factor
    }
}

impl Neg for Var {
    type Output = LinearExpression;

    fn neg(self) -> LinearExpression {
        -LinearExpression::from(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Problem;

    #[test]
    fn terms_over_the_same_variable_are_merged() {
        let mut problem = Problem::new("expressions");
        let x = problem.variable("x", 0, 5).expect("valid domain");
        let y = problem.variable("y", 0, 5).expect("valid domain");

        let expression = x * 3 + y - x * 3 + 4 - y * 2;

        assert_eq!(vec![(-1, y)], expression.terms().to_vec());
        assert_eq!(4, expression.constant());
    }

    #[test]
    fn display_is_readable() {
        let mut problem = Problem::new("expressions");
        let x = problem.variable("x", 0, 5).expect("valid domain");
        let y = problem.variable("y", 0, 5).expect("valid domain");

        assert_eq!(
            format!("2*{x} - {y} - 1"),
            (x * 2 - y - 1).to_string()
        );
        assert_eq!("0", (x - x).to_string());
    }
}
