use std::ops::Not;

use itertools::Itertools;

use super::compile;
use crate::basic_types::ModelError;
use crate::basic_types::RelationalOp;
use crate::basic_types::Solution;
use crate::constraints::LinearExpression;
use crate::Problem;
use crate::Var;

/// A relation over variables of a [`Problem`].
///
/// Constraints are created with the functions of [`crate::constraints`] and take effect once they
/// are posted with [`Constraint::post`] or [`Problem::post`]. Reifying a constraint with
/// [`Problem::as_bool`] instead binds its truth value to a 0/1 variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub(crate) kind: ConstraintKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    /// `expression op 0`
    Linear {
        expression: LinearExpression,
        op: RelationalOp,
    },
    /// `a * b = product`
    Times { a: Var, b: Var, product: Var },
    AllDifferent(Vec<Var>),
    /// `counts[k] = |{i : vars[i] = values[k]}|`
    GlobalCardinality {
        vars: Vec<Var>,
        values: Vec<i32>,
        counts: Vec<Var>,
    },
    /// `value = array[index]`
    Element {
        array: Vec<Var>,
        index: Var,
        value: Var,
    },
    And(Vec<Constraint>),
    Or(Vec<Constraint>),
    Not(Box<Constraint>),
    Implies(Box<Constraint>, Box<Constraint>),
    /// `literal = 1 <-> constraint`
    Reified {
        constraint: Box<Constraint>,
        literal: Var,
    },
}

impl Constraint {
    pub(crate) fn new(kind: ConstraintKind) -> Self {
        Constraint { kind }
    }

    /// Both `self` and `other` hold.
    pub fn and(self, other: Constraint) -> Constraint {
        match self.kind {
            ConstraintKind::And(mut constraints) => {
                constraints.push(other);
                Constraint::new(ConstraintKind::And(constraints))
            }
            kind => Constraint::new(ConstraintKind::And(vec![Constraint::new(kind), other])),
        }
    }

    /// At least one of `self` and `other` holds.
    pub fn or(self, other: Constraint) -> Constraint {
        match self.kind {
            ConstraintKind::Or(mut constraints) => {
                constraints.push(other);
                Constraint::new(ConstraintKind::Or(constraints))
            }
            kind => Constraint::new(ConstraintKind::Or(vec![Constraint::new(kind), other])),
        }
    }

    /// If `self` holds then `other` holds.
    pub fn implies(self, other: Constraint) -> Constraint {
        Constraint::new(ConstraintKind::Implies(Box::new(self), Box::new(other)))
    }

    /// The constraint which holds exactly when `self` does not.
    ///
    /// Relational constraints flip their operator, conjunctions and disjunctions follow De
    /// Morgan's laws and `a.implies(b)` becomes `a and not b`. The global constraints have no
    /// dedicated negation; their negation only rules out assignments which satisfy them.
    pub fn negation(&self) -> Constraint {
        let kind = match &self.kind {
            ConstraintKind::Linear { expression, op } => ConstraintKind::Linear {
                expression: expression.clone(),
                op: op.negate(),
            },
            ConstraintKind::Times { .. }
            | ConstraintKind::AllDifferent(_)
            | ConstraintKind::GlobalCardinality { .. }
            | ConstraintKind::Element { .. } => ConstraintKind::Not(Box::new(self.clone())),
            ConstraintKind::And(constraints) => {
                ConstraintKind::Or(constraints.iter().map(Constraint::negation).collect())
            }
            ConstraintKind::Or(constraints) => {
                ConstraintKind::And(constraints.iter().map(Constraint::negation).collect())
            }
            ConstraintKind::Not(constraint) => return constraint.as_ref().clone(),
            ConstraintKind::Implies(antecedent, consequent) => ConstraintKind::And(vec![
                antecedent.as_ref().clone(),
                consequent.negation(),
            ]),
            ConstraintKind::Reified {
                constraint,
                literal,
            } => ConstraintKind::Reified {
                constraint: Box::new(constraint.negation()),
                literal: *literal,
            },
        };

        Constraint::new(kind)
    }

    /// Adds the constraint to `problem`; equivalent to [`Problem::post`].
    pub fn post(self, problem: &mut Problem) -> Result<(), ModelError> {
        problem.post(self)
    }

    /// Whether the constraint holds under the assignment of `solution`.
    pub fn is_satisfied(&self, solution: &Solution) -> bool {
        match &self.kind {
            ConstraintKind::Linear { expression, op } => {
                op.holds(expression.evaluate(solution), 0)
            }
            ConstraintKind::Times { a, b, product } => {
                solution.value(*a) as i64 * solution.value(*b) as i64
                    == solution.value(*product) as i64
            }
            ConstraintKind::AllDifferent(vars) => {
                vars.iter().map(|&var| solution.value(var)).all_unique()
            }
            ConstraintKind::GlobalCardinality {
                vars,
                values,
                counts,
            } => values.iter().zip(counts).all(|(&value, &count)| {
                let occurrences = vars
                    .iter()
                    .filter(|&&var| solution.value(var) == value)
                    .count();
                occurrences as i64 == solution.value(count) as i64
            }),
            ConstraintKind::Element {
                array,
                index,
                value,
            } => usize::try_from(solution.value(*index))
                .ok()
                .and_then(|index| array.get(index))
                .is_some_and(|&element| solution.value(element) == solution.value(*value)),
            ConstraintKind::And(constraints) => constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(solution)),
            ConstraintKind::Or(constraints) => constraints
                .iter()
                .any(|constraint| constraint.is_satisfied(solution)),
            ConstraintKind::Not(constraint) => !constraint.is_satisfied(solution),
            ConstraintKind::Implies(antecedent, consequent) => {
                !antecedent.is_satisfied(solution) || consequent.is_satisfied(solution)
            }
            ConstraintKind::Reified {
                constraint,
                literal,
            } => (solution.value(*literal) == 1) == constraint.is_satisfied(solution),
        }
    }

    /// Checks the arguments which cannot be checked when the constraint is created.
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        match &self.kind {
            ConstraintKind::GlobalCardinality { values, counts, .. }
                if values.len() != counts.len() =>
            {
                Err(ModelError::LengthMismatch {
                    argument: "counts",
                    expected: values.len(),
                    actual: counts.len(),
                })
            }
            ConstraintKind::And(constraints) | ConstraintKind::Or(constraints) => {
                constraints.iter().try_for_each(Constraint::validate)
            }
            ConstraintKind::Not(constraint) | ConstraintKind::Reified { constraint, .. } => {
                constraint.validate()
            }
            ConstraintKind::Implies(antecedent, consequent) => {
                antecedent.validate()?;
                consequent.validate()
            }
            ConstraintKind::Linear { .. }
            | ConstraintKind::Times { .. }
            | ConstraintKind::AllDifferent(_)
            | ConstraintKind::GlobalCardinality { .. }
            | ConstraintKind::Element { .. } => Ok(()),
        }
    }

    /// Every variable the constraint mentions, possibly with duplicates.
    pub(crate) fn vars(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, vars: &mut Vec<Var>) {
        match &self.kind {
            ConstraintKind::Linear { expression, .. } => vars.extend(expression.vars()),
            ConstraintKind::Times { a, b, product } => vars.extend([*a, *b, *product]),
            ConstraintKind::AllDifferent(scope) => vars.extend_from_slice(scope),
            ConstraintKind::GlobalCardinality {
                vars: scope,
                counts,
                ..
            } => {
                vars.extend_from_slice(scope);
                vars.extend_from_slice(counts);
            }
            ConstraintKind::Element {
                array,
                index,
                value,
            } => {
                vars.extend_from_slice(array);
                vars.extend([*index, *value]);
            }
            ConstraintKind::And(constraints) | ConstraintKind::Or(constraints) => constraints
                .iter()
                .for_each(|constraint| constraint.collect_vars(vars)),
            ConstraintKind::Not(constraint) => constraint.collect_vars(vars),
            ConstraintKind::Implies(antecedent, consequent) => {
                antecedent.collect_vars(vars);
                consequent.collect_vars(vars);
            }
            ConstraintKind::Reified {
                constraint,
                literal,
            } => {
                constraint.collect_vars(vars);
                vars.push(*literal);
            }
        }
    }

    /// Whether the constraint is a single primitive without a dedicated negation.
    pub(crate) fn is_global(&self) -> bool {
        compile::has_no_dedicated_negation(&self.kind)
    }
}

impl Not for Constraint {
    type Output = Constraint;

    fn not(self) -> Constraint {
        self.negation()
    }
}
