use std::fmt::Display;
use std::sync::Arc;

use itertools::Itertools;
use log::info;

use crate::api::ProblemId;
use crate::basic_types::ModelError;
use crate::basic_types::VariableNames;
use crate::containers::KeyedVec;
use crate::engine::DomainId;
use crate::fdsolve_assert_simple;
use crate::Var;

/// A snapshot of the values of all variables at an accepted leaf of the search.
///
/// A [`Solution`] is only created once every variable is fixed and every posted constraint is
/// satisfied; it does not change afterwards, even when the problem is solved again.
#[derive(Clone, Debug)]
pub struct Solution {
    problem: ProblemId,
    values: KeyedVec<DomainId, i32>,
    names: Arc<VariableNames>,
    objective_value: Option<i32>,
    solution_number: usize,
}

impl Solution {
    pub(crate) fn new(
        problem: ProblemId,
        values: KeyedVec<DomainId, i32>,
        names: Arc<VariableNames>,
        solution_number: usize,
    ) -> Self {
        Solution {
            problem,
            values,
            names,
            objective_value: None,
            solution_number,
        }
    }

    pub(crate) fn with_objective_value(mut self, objective_value: i32) -> Self {
        self.objective_value = Some(objective_value);
        self
    }

    /// The value of `var` in this solution.
    ///
    /// # Panics
    /// When `var` was created by a different problem, or after this solution was found.
    pub fn value(&self, var: Var) -> i32 {
        fdsolve_assert_simple!(
            var.problem == self.problem,
            "variable {var} does not belong to the problem of this solution"
        );
        self.values.get(var.domain).copied().unwrap_or_else(|| {
            panic!("variable {var} was created after solution #{} was found", self.solution_number)
        })
    }

    /// The value of the variable registered under `name`.
    pub fn value_by_name(&self, name: &str) -> Result<i32, ModelError> {
        self.names
            .lookup(name)
            .and_then(|domain| self.values.get(domain).copied())
            .ok_or_else(|| ModelError::UnknownVariable(name.to_owned()))
    }

    /// All variables of the problem, auxiliary ones included, with their values.
    pub fn values(&self) -> impl Iterator<Item = (Var, i32)> + '_ {
        self.values.keys().map(|domain| {
            (
                Var {
                    domain,
                    problem: self.problem,
                },
                self.values[domain],
            )
        })
    }

    /// The value of the objective if this solution was found while optimising.
    pub fn objective_value(&self) -> Option<i32> {
        self.objective_value
    }

    /// The 1-based position of this solution among the solutions of one search.
    pub fn solution_number(&self) -> usize {
        self.solution_number
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Logs every named variable as `name = value`.
    pub fn log(&self) {
        info!("Solution #{}", self.solution_number);
        for (domain, name) in self.names.named_domains() {
            if let Some(value) = self.values.get(domain) {
                info!("{name} = {value}");
            }
        }
        if let Some(objective_value) = self.objective_value {
            info!("objective = {objective_value}");
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let assignments = self
            .names
            .named_domains()
            .filter_map(|(domain, name)| {
                self.values
                    .get(domain)
                    .map(|value| format!("{name}={value}"))
            })
            .join(" ");
        write!(f, "Solution #{}: {assignments}", self.solution_number)
    }
}
