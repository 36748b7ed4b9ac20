use std::fmt::Display;
use std::sync::Arc;

use crate::api::ProblemId;
use crate::engine::DomainId;
use crate::fdsolve_assert_simple;
use crate::Problem;

/// A handle to an integer variable of a [`Problem`].
///
/// A [`Var`] is a plain index; the domain it refers to is owned by the problem, so every query
/// needs the problem which created the variable. Using a variable with another problem panics
/// for queries and results in [`ModelError::ForeignVariable`] when posting constraints.
///
/// Arithmetic operators on variables build a [`LinearExpression`]:
/// ```rust
/// # use fdsolve_core::Problem;
/// # use fdsolve_core::constraints;
/// let mut problem = Problem::new("example");
/// let x = problem.variable("x", 0, 5).unwrap();
/// let y = problem.variable("y", 0, 5).unwrap();
///
/// constraints::equals(x + y, 5).post(&mut problem).unwrap();
/// constraints::equals(x, 2).post(&mut problem).unwrap();
///
/// assert_eq!(Some(3), y.value(&problem));
/// ```
///
/// [`ModelError::ForeignVariable`]: crate::ModelError::ForeignVariable
/// [`LinearExpression`]: crate::LinearExpression
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var {
    pub(crate) domain: DomainId,
    pub(crate) problem: ProblemId,
}

impl Var {
    pub(crate) fn new(domain: DomainId, problem: ProblemId) -> Self {
        Var { domain, problem }
    }

    /// The value of the variable if its domain contains a single value.
    pub fn value(self, problem: &Problem) -> Option<i32> {
        self.assert_owner(problem);
        problem.domains.fixed_value(self.domain)
    }

    pub fn min(self, problem: &Problem) -> i32 {
        self.assert_owner(problem);
        problem.domains.lower_bound(self.domain)
    }

    pub fn max(self, problem: &Problem) -> i32 {
        self.assert_owner(problem);
        problem.domains.upper_bound(self.domain)
    }

    /// The number of values in the domain.
    pub fn size(self, problem: &Problem) -> usize {
        self.assert_owner(problem);
        problem.domains.size(self.domain)
    }

    pub fn contains(self, problem: &Problem, value: i32) -> bool {
        self.assert_owner(problem);
        problem.domains.contains(self.domain, value as i64)
    }

    /// The values in the domain in ascending order.
    pub fn values(self, problem: &Problem) -> impl Iterator<Item = i32> + '_ {
        self.assert_owner(problem);
        problem.domains.iterate_domain(self.domain)
    }

    /// The display name of the variable; auxiliary variables are named after their index.
    pub fn name(self, problem: &Problem) -> String {
        self.assert_owner(problem);
        problem
            .names
            .name(self.domain)
            .map_or_else(|| self.to_string(), str::to_owned)
    }

    /// Changes the display name of the variable.
    ///
    /// The name is not registered for lookup; use [`Problem::register`] for that.
    pub fn set_name(self, problem: &mut Problem, name: impl Into<String>) {
        self.assert_owner(problem);
        Arc::make_mut(&mut problem.names).set_name(self.domain, name.into());
    }

    fn assert_owner(self, problem: &Problem) {
        fdsolve_assert_simple!(
            self.problem == problem.id(),
            "variable {self} does not belong to problem '{}'",
            problem.name()
        );
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.domain)
    }
}
