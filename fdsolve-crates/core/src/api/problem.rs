use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::debug;
use log::warn;

use super::Solver;
use super::SolverOptions;
use crate::basic_types::ModelError;
use crate::basic_types::RelationalOp;
use crate::basic_types::VariableNames;
use crate::constraints;
use crate::constraints::Constraint;
use crate::constraints::LinearExpression;
use crate::containers::HashMap;
use crate::engine::DomainStore;
use crate::engine::IntegerDomain;
use crate::engine::PropagationEngine;
use crate::propagation::Propagator;
use crate::propagation::PropagatorId;
use crate::Var;
use crate::MAX_VALUE;
use crate::MIN_VALUE;

static NEXT_PROBLEM_ID: AtomicU32 = AtomicU32::new(0);

/// Distinguishes the variables of different problems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ProblemId(u32);

impl ProblemId {
    fn next() -> ProblemId {
        ProblemId(NEXT_PROBLEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A constraint satisfaction (or optimisation) problem.
///
/// The problem owns the domains of all its variables and the propagators of all posted
/// constraints. Every posted constraint is propagated immediately, so the domains observed through
/// [`Var`] always reflect the consequences of the model so far. Solving is done with a [`Solver`]
/// obtained from [`Problem::solver`].
///
/// # Example
/// ```rust
/// # use fdsolve_core::Problem;
/// let mut problem = Problem::new("queens");
/// let queens = problem.variable_array("q", 4, 0, 3).unwrap();
/// problem.post_all_different(&queens).unwrap();
/// for i in 0..queens.len() {
///     for j in i + 1..queens.len() {
///         let distance = (j - i) as i32;
///         problem
///             .post(fdsolve_core::constraints::not_equals(queens[i], queens[j] + distance))
///             .unwrap();
///         problem
///             .post(fdsolve_core::constraints::not_equals(queens[i], queens[j] - distance))
///             .unwrap();
///     }
/// }
///
/// let solutions = problem.solver().find_all_solutions();
/// assert_eq!(2, solutions.len());
/// ```
#[derive(Debug)]
pub struct Problem {
    id: ProblemId,
    name: String,
    pub(crate) domains: DomainStore,
    pub(crate) engine: PropagationEngine,
    pub(crate) names: Arc<VariableNames>,
    /// The variables created through the public interface, in creation order.
    user_variables: Vec<Var>,
    constants: HashMap<i32, Var>,
    pub(crate) constraints: Vec<Constraint>,
    is_infeasible: bool,
}

impl Problem {
    pub fn new(name: impl Into<String>) -> Self {
        Problem {
            id: ProblemId::next(),
            name: name.into(),
            domains: DomainStore::default(),
            engine: PropagationEngine::default(),
            names: Arc::default(),
            user_variables: Vec::new(),
            constants: HashMap::default(),
            constraints: Vec::new(),
            is_infeasible: false,
        }
    }

    pub(crate) fn id(&self) -> ProblemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a variable with the domain `[min, max]`, registered under `name`.
    pub fn variable(&mut self, name: &str, min: i32, max: i32) -> Result<Var, ModelError> {
        self.check_new_domain(name, min, max)?;
        let var = Var::new(self.domains.grow(min, max), self.id);
        self.register_user_variable(name, var)
    }

    /// Creates a variable whose domain contains exactly `values`, registered under `name`.
    pub fn variable_from_values(&mut self, name: &str, values: &[i32]) -> Result<Var, ModelError> {
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Err(ModelError::EmptyDomain(name.to_owned()));
        };
        self.check_new_domain(name, min, max)?;

        let domain = IntegerDomain::from_values(values)
            .ok_or_else(|| ModelError::EmptyDomain(name.to_owned()))?;
        let var = Var::new(self.domains.grow_sparse(domain), self.id);
        self.register_user_variable(name, var)
    }

    /// Creates the variables `name[0]` up to `name[length - 1]` with the domain `[min, max]`.
    pub fn variable_array(
        &mut self,
        name: &str,
        length: usize,
        min: i32,
        max: i32,
    ) -> Result<Vec<Var>, ModelError> {
        (0..length)
            .map(|index| self.variable(&format!("{name}[{index}]"), min, max))
            .collect()
    }

    /// Creates a `rows` by `columns` matrix of variables named `name[row][column]`.
    pub fn variable_matrix(
        &mut self,
        name: &str,
        rows: usize,
        columns: usize,
        min: i32,
        max: i32,
    ) -> Result<Vec<Vec<Var>>, ModelError> {
        if rows == 0 || columns == 0 || rows.checked_mul(columns).is_none() {
            return Err(ModelError::MalformedDimensions(vec![rows, columns]));
        }

        (0..rows)
            .map(|row| self.variable_array(&format!("{name}[{row}]"), columns, min, max))
            .collect()
    }

    /// Creates a 0/1 variable registered under `name`.
    pub fn bool_variable(&mut self, name: &str) -> Result<Var, ModelError> {
        self.variable(name, 0, 1)
    }

    /// A variable fixed to `value`; asking twice for the same value gives the same variable.
    pub fn constant(&mut self, value: i32) -> Result<Var, ModelError> {
        if let Some(&var) = self.constants.get(&value) {
            return Ok(var);
        }
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(ModelError::ValueOutOfRange {
                name: value.to_string(),
                lower_bound: value as i64,
                upper_bound: value as i64,
            });
        }

        let var = self.new_aux_variable(value, value);
        let _ = self.constants.insert(value, var);
        Ok(var)
    }

    /// Makes `var` retrievable under `name` through [`Problem::get_var`] and
    /// [`crate::Solution::value_by_name`].
    pub fn register(&mut self, name: &str, var: Var) -> Result<(), ModelError> {
        self.check_owned([var])?;
        Arc::make_mut(&mut self.names).register(name, var.domain)
    }

    pub fn get_var(&self, name: &str) -> Result<Var, ModelError> {
        self.names
            .lookup(name)
            .map(|domain| Var::new(domain, self.id))
            .ok_or_else(|| ModelError::UnknownVariable(name.to_owned()))
    }

    /// Adds `constraint` to the problem and propagates it.
    ///
    /// A constraint which makes the problem infeasible is not an error; the problem is marked as
    /// infeasible and every subsequent search finds no solution.
    pub fn post(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        constraint.validate()?;
        self.check_owned(constraint.vars())?;

        constraints::enforce(self, &constraint);
        self.constraints.push(constraint);
        let _ = self.propagate();

        Ok(())
    }

    /// Posts `lhs op rhs` and returns the posted constraint.
    pub fn linear(
        &mut self,
        lhs: impl Into<LinearExpression>,
        op: RelationalOp,
        rhs: impl Into<LinearExpression>,
    ) -> Result<Constraint, ModelError> {
        let constraint = constraints::linear(lhs, op, rhs);
        self.post(constraint.clone())?;
        Ok(constraint)
    }

    /// A new variable equal to the sum of `vars`.
    pub fn sum(&mut self, vars: &[Var]) -> Result<Var, ModelError> {
        let expression = vars
            .iter()
            .fold(LinearExpression::new(), |sum, &var| sum + var);
        self.expression_variable(expression)
    }

    /// A new variable equal to `sum coefficients[i] * vars[i]`.
    pub fn scal_prod(&mut self, coefficients: &[i32], vars: &[Var]) -> Result<Var, ModelError> {
        if coefficients.len() != vars.len() {
            return Err(ModelError::LengthMismatch {
                argument: "vars",
                expected: coefficients.len(),
                actual: vars.len(),
            });
        }
        self.expression_variable(LinearExpression::weighted_sum(coefficients, vars))
    }

    /// A new variable equal to `a + b`.
    pub fn plus(&mut self, a: Var, b: Var) -> Result<Var, ModelError> {
        self.expression_variable(a + b)
    }

    /// A new variable equal to `a + constant`.
    pub fn plus_constant(&mut self, a: Var, constant: i32) -> Result<Var, ModelError> {
        self.expression_variable(a + constant)
    }

    /// A new variable equal to `a - b`.
    pub fn minus(&mut self, a: Var, b: Var) -> Result<Var, ModelError> {
        self.expression_variable(a - b)
    }

    /// A new variable equal to `a * factor`.
    pub fn multiply(&mut self, a: Var, factor: i32) -> Result<Var, ModelError> {
        self.expression_variable(a * factor)
    }

    /// A new variable equal to `-a`.
    pub fn negative(&mut self, a: Var) -> Result<Var, ModelError> {
        self.expression_variable(-a)
    }

    /// A new variable equal to `a * b`.
    pub fn multiply_var(&mut self, a: Var, b: Var) -> Result<Var, ModelError> {
        self.check_owned([a, b])?;

        let corners = [
            a.min(self) as i64 * b.min(self) as i64,
            a.min(self) as i64 * b.max(self) as i64,
            a.max(self) as i64 * b.min(self) as i64,
            a.max(self) as i64 * b.max(self) as i64,
        ];
        let min = corners.iter().copied().min().unwrap_or_default();
        let max = corners.iter().copied().max().unwrap_or_default();

        let product = self.bounded_aux_variable(min.into(), max.into());
        self.post(constraints::times(a, b, product))?;
        Ok(product)
    }

    /// A new 0/1 variable which is 1 exactly when `constraint` holds.
    ///
    /// The constraint itself is not enforced.
    pub fn as_bool(&mut self, constraint: Constraint) -> Result<Var, ModelError> {
        let literal = self.new_aux_variable(0, 1);
        self.post(constraints::reified(constraint, literal))?;
        Ok(literal)
    }

    pub fn post_all_different(&mut self, vars: &[Var]) -> Result<(), ModelError> {
        self.post(constraints::all_different(vars))
    }

    /// Posts that `counts[k]` is the number of `vars` equal to `values[k]`.
    pub fn post_global_cardinality(
        &mut self,
        vars: &[Var],
        values: &[i32],
        counts: &[Var],
    ) -> Result<(), ModelError> {
        self.post(constraints::global_cardinality(vars, values, counts))
    }

    /// Posts `values[index] op value`.
    pub fn post_element(
        &mut self,
        values: &[i32],
        index: Var,
        op: RelationalOp,
        value: Var,
    ) -> Result<(), ModelError> {
        let array = values
            .iter()
            .map(|&value| self.constant(value))
            .collect::<Result<Vec<_>, _>>()?;
        self.post_element_var(&array, index, op, value)
    }

    /// Posts `array[index] op value`.
    ///
    /// For an operator other than [`RelationalOp::Eq`], the selected element is represented by an
    /// auxiliary variable which is related to `value` by `op`.
    pub fn post_element_var(
        &mut self,
        array: &[Var],
        index: Var,
        op: RelationalOp,
        value: Var,
    ) -> Result<(), ModelError> {
        if op == RelationalOp::Eq || array.is_empty() {
            return self.post(constraints::element(array, index, value));
        }
        self.check_owned(array.iter().copied())?;

        let problem: &Problem = self;
        let min = array.iter().map(|&var| var.min(problem)).min().unwrap_or_default();
        let max = array.iter().map(|&var| var.max(problem)).max().unwrap_or_default();
        let selected = self.new_aux_variable(min, max);

        self.post(constraints::element(array, index, selected))?;
        self.post(constraints::linear(selected, op, value))
    }

    /// Propagates all constraints at the root; returns `false` if the problem is infeasible.
    pub fn propagate(&mut self) -> bool {
        if self.is_infeasible {
            return false;
        }

        if self.engine.propagate(&mut self.domains).is_err() {
            debug!("Problem '{}' is infeasible at the root", self.name);
            self.is_infeasible = true;
        }
        !self.is_infeasible
    }

    /// Whether propagation at the root proved that the problem has no solution.
    pub fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    /// The variables created through [`Problem::variable`] and its siblings, in creation order.
    pub fn variables(&self) -> &[Var] {
        &self.user_variables
    }

    /// The number of variables, including the auxiliary ones introduced by the model.
    pub fn num_variables(&self) -> usize {
        self.domains.num_domains()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn solver(&mut self) -> Solver<'_> {
        self.solver_with_options(SolverOptions::default())
    }

    pub fn solver_with_options(&mut self, options: SolverOptions) -> Solver<'_> {
        Solver::new(self, options)
    }

    pub(crate) fn new_aux_variable(&mut self, min: i32, max: i32) -> Var {
        Var::new(self.domains.grow(min, max), self.id)
    }

    pub(crate) fn add_propagator(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        self.engine.add_propagator(propagator)
    }

    /// A variable equal to `expression`, with bounds derived from the bounds of its terms.
    fn expression_variable(&mut self, expression: LinearExpression) -> Result<Var, ModelError> {
        self.check_owned(expression.vars())?;

        let problem: &Problem = self;
        let constant = i128::from(expression.constant());
        let (min, max) = expression.terms().iter().fold(
            (constant, constant),
            |(min, max), &(coefficient, var)| {
                let at_min = i128::from(coefficient) * i128::from(var.min(problem));
                let at_max = i128::from(coefficient) * i128::from(var.max(problem));
                (min + at_min.min(at_max), max + at_min.max(at_max))
            },
        );

        let var = self.bounded_aux_variable(min, max);
        self.post(constraints::equals(expression, var))?;
        Ok(var)
    }

    /// An auxiliary variable with the bounds clamped to the supported range.
    fn bounded_aux_variable(&mut self, min: i128, max: i128) -> Var {
        let clamped_min = min.clamp(MIN_VALUE.into(), MAX_VALUE.into());
        let clamped_max = max.clamp(MIN_VALUE.into(), MAX_VALUE.into());
        if clamped_min != min || clamped_max != max {
            warn!(
                "The bounds [{min}, {max}] of a derived variable exceed the supported range and \
                 are clamped to [{clamped_min}, {clamped_max}]"
            );
        }
        self.new_aux_variable(clamped_min as i32, clamped_max as i32)
    }

    fn check_new_domain(&self, name: &str, min: i32, max: i32) -> Result<(), ModelError> {
        if min > max {
            return Err(ModelError::EmptyDomain(name.to_owned()));
        }
        if min < MIN_VALUE || max > MAX_VALUE {
            return Err(ModelError::ValueOutOfRange {
                name: name.to_owned(),
                lower_bound: min as i64,
                upper_bound: max as i64,
            });
        }
        if self.names.lookup(name).is_some() {
            return Err(ModelError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    fn register_user_variable(&mut self, name: &str, var: Var) -> Result<Var, ModelError> {
        Arc::make_mut(&mut self.names).register(name, var.domain)?;
        self.user_variables.push(var);
        Ok(var)
    }

    pub(crate) fn check_owned(
        &self,
        vars: impl IntoIterator<Item = Var>,
    ) -> Result<(), ModelError> {
        match vars.into_iter().find(|var| var.problem != self.id) {
            Some(foreign) => Err(ModelError::ForeignVariable(foreign.to_string())),
            None => Ok(()),
        }
    }
}
