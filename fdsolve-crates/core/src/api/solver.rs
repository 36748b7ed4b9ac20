use std::fmt::Debug;
use std::sync::Arc;

use log::info;
use log::warn;

use super::ProblemState;
use super::SolutionIterator;
use super::SolverOptions;
use crate::basic_types::Solution;
use crate::branching::SearchStrategy;
use crate::engine::DepthFirstSearch;
use crate::engine::SearchResult;
use crate::engine::SolverStatistics;
use crate::fdsolve_assert_simple;
use crate::optimisation::linear_sat_unsat::LinearSatUnsat;
use crate::optimisation::OptimisationDirection;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::termination::Combinator;
use crate::termination::TerminationCondition;
use crate::Problem;
use crate::Var;

/// Searches for solutions of a [`Problem`].
///
/// A solver borrows the problem mutably for its lifetime; the domains of the problem are used
/// directly as the state of the search. Unless [`ProblemState::DoNotRestore`] is requested, every
/// search leaves the problem as it found it, so a solver can run any number of searches.
///
/// ```rust
/// # use fdsolve_core::{constraints, OptimisationDirection, Problem};
/// let mut problem = Problem::new("cost");
/// let x = problem.variable("x", 0, 4).unwrap();
/// let y = problem.variable("y", 0, 4).unwrap();
/// constraints::equals(x + y, 4).post(&mut problem).unwrap();
/// let cost = problem.scal_prod(&[2, 3], &[x, y]).unwrap();
///
/// let mut solver = problem.solver();
/// let optimum = solver
///     .find_optimal_solution(OptimisationDirection::Minimise, cost)
///     .unwrap();
///
/// assert_eq!(Some(8), optimum.objective_value());
/// assert_eq!(4, optimum.value(x));
/// ```
pub struct Solver<'problem> {
    pub(crate) problem: &'problem mut Problem,
    options: SolverOptions,
    strategy: SearchStrategy,
    termination: Option<Box<dyn TerminationCondition>>,
    statistics: SolverStatistics,
}

impl Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("problem", &self.problem.name())
            .field("options", &self.options)
            .field("strategy", &self.strategy)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

impl<'problem> Solver<'problem> {
    pub(crate) fn new(problem: &'problem mut Problem, options: SolverOptions) -> Self {
        let strategy = SearchStrategy::new(problem.id());
        Solver {
            problem,
            options,
            strategy,
            termination: None,
            statistics: SolverStatistics::default(),
        }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SolverOptions {
        &mut self.options
    }

    pub fn search_strategy(&self) -> &SearchStrategy {
        &self.strategy
    }

    pub fn search_strategy_mut(&mut self) -> &mut SearchStrategy {
        &mut self.strategy
    }

    /// Adds a termination condition which is polled in addition to the limits of the
    /// [`SolverOptions`].
    ///
    /// The condition is shared by all subsequent searches of this solver.
    pub fn set_termination(&mut self, termination: Box<dyn TerminationCondition>) {
        self.termination = Some(termination);
    }

    pub fn problem(&self) -> &Problem {
        self.problem
    }

    /// Finds a single solution and restores the problem afterwards.
    pub fn find_solution(&mut self) -> Option<Solution> {
        self.find_solution_with(ProblemState::Restore)
    }

    /// Finds a single solution.
    ///
    /// With [`ProblemState::DoNotRestore`] the domains of the problem keep the values of the
    /// solution; when no solution is found the problem is always restored.
    pub fn find_solution_with(&mut self, state: ProblemState) -> Option<Solution> {
        if self.problem.is_infeasible() {
            info!("Problem '{}' is infeasible", self.problem.name());
            return None;
        }

        let mut search = self.new_search();
        let mut budget = self.options.budget();

        let solution = self.next_verified_solution(&mut search, &mut budget, 1);
        if solution.is_none() || state == ProblemState::Restore {
            search.restore(&mut self.problem.domains, &mut self.problem.engine);
        }

        self.statistics = search.statistics();
        solution
    }

    /// All solutions of the problem, or the first [`SolverOptions::max_solutions`] of them.
    pub fn find_all_solutions(&mut self) -> Vec<Solution> {
        self.solution_iterator().collect()
    }

    /// A lazy iterator over the solutions of the problem.
    ///
    /// The iterator borrows the solver; the problem is restored once the iterator is exhausted or
    /// dropped.
    pub fn solution_iterator(&mut self) -> SolutionIterator<'_, 'problem> {
        let search = self.new_search();
        let budget = self.options.budget();
        SolutionIterator::new(self, search, budget)
    }

    /// Finds a solution with the best value for `objective` and restores the problem afterwards.
    ///
    /// The search is a branch-and-bound search: every solution imposes that the next one is
    /// strictly better. When a termination condition triggers, the best solution found so far is
    /// returned.
    ///
    /// # Panics
    /// When `objective` belongs to a different problem.
    pub fn find_optimal_solution(
        &mut self,
        direction: OptimisationDirection,
        objective: Var,
    ) -> Option<Solution> {
        fdsolve_assert_simple!(
            self.problem.check_owned([objective]).is_ok(),
            "the objective {objective} does not belong to problem '{}'",
            self.problem.name()
        );
        if self.problem.is_infeasible() {
            info!("Problem '{}' is infeasible", self.problem.name());
            return None;
        }

        let mut search = self.new_search();
        let mut budget = self.options.budget();

        let optimum = LinearSatUnsat::new(direction, objective).optimise(
            self,
            &mut search,
            &mut budget,
        );

        self.statistics = search.statistics();
        optimum
    }

    /// The statistics of the most recent search.
    pub fn statistics(&self) -> SolverStatistics {
        self.statistics
    }

    /// Logs the statistics of the most recent search, if statistic logging is enabled.
    pub fn log_stats(&self) {
        if !should_log_statistics() {
            return;
        }
        self.statistics
            .log(StatisticLogger::new([self.problem.name()]));
        log_statistic_postfix();
    }

    pub(crate) fn set_statistics(&mut self, statistics: SolverStatistics) {
        self.statistics = statistics;
    }

    pub(crate) fn new_search(&self) -> DepthFirstSearch {
        let brancher = self
            .strategy
            .create_brancher(self.problem.variables(), self.options.random_seed);
        DepthFirstSearch::new(brancher, &self.problem.domains, self.options.random_seed)
    }

    /// Continues `search` until it reports a solution which satisfies every posted constraint.
    ///
    /// Returns [`None`] when the search is exhausted or stopped.
    pub(crate) fn next_verified_solution(
        &mut self,
        search: &mut DepthFirstSearch,
        budget: &mut dyn TerminationCondition,
        solution_number: usize,
    ) -> Option<Solution> {
        loop {
            let mut termination = Combinator::new(&mut *budget, &mut self.termination);
            let result = search.next_solution(
                &mut self.problem.domains,
                &mut self.problem.engine,
                &mut termination,
            );

            match result {
                SearchResult::Solution => {}
                SearchResult::Exhausted => return None,
                SearchResult::Stopped => {
                    info!(
                        "Search of '{}' stopped before the search tree was exhausted",
                        self.problem.name()
                    );
                    return None;
                }
            }

            let solution = Solution::new(
                self.problem.id(),
                self.problem.domains.fixed_values(),
                Arc::clone(&self.problem.names),
                solution_number,
            );

            if self.options.check_solutions {
                if let Some(violated) = self
                    .problem
                    .constraints
                    .iter()
                    .find(|constraint| !constraint.is_satisfied(&solution))
                {
                    warn!("Rejecting an assignment which violates {violated:?}");
                    continue;
                }
            }

            return Some(solution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::termination::DecisionBudget;

    #[test]
    fn find_solution_restores_the_problem_by_default() {
        let mut problem = Problem::new("restore");
        let x = problem.variable("x", 0, 3).expect("valid domain");

        let solution = problem.solver().find_solution().expect("feasible");

        assert_eq!(0, solution.value(x));
        assert_eq!(None, x.value(&problem));
        assert_eq!(4, x.size(&problem));
    }

    #[test]
    fn the_solution_can_be_kept_in_the_problem() {
        let mut problem = Problem::new("keep");
        let x = problem.variable("x", 0, 3).expect("valid domain");
        constraints::greater_than(x, 1)
            .post(&mut problem)
            .expect("valid constraint");

        let solution = problem
            .solver()
            .find_solution_with(ProblemState::DoNotRestore)
            .expect("feasible");

        assert_eq!(2, solution.value(x));
        assert_eq!(Some(2), x.value(&problem));
    }

    #[test]
    fn repeated_searches_find_the_same_solution() {
        let mut problem = Problem::new("repeat");
        let x = problem.variable("x", 0, 3).expect("valid domain");
        let y = problem.variable("y", 0, 3).expect("valid domain");
        constraints::less_than(x, y)
            .post(&mut problem)
            .expect("valid constraint");

        let mut solver = problem.solver();
        let first = solver.find_solution().expect("feasible");
        let second = solver.find_solution().expect("feasible");

        assert_eq!(
            (first.value(x), first.value(y)),
            (second.value(x), second.value(y))
        );
    }

    #[test]
    fn statistics_describe_the_last_search() {
        let mut problem = Problem::new("statistics");
        let vars = problem.variable_array("v", 3, 0, 2).expect("valid domain");
        problem.post_all_different(&vars).expect("valid constraint");

        let mut solver = problem.solver();
        let solutions = solver.find_all_solutions();

        assert_eq!(6, solutions.len());
        assert_eq!(6, solver.statistics().num_solutions);
        assert!(solver.statistics().num_decisions > 0);
    }

    #[test]
    fn a_decision_limit_stops_the_search() {
        let mut problem = Problem::new("limit");
        let _ = problem.variable_array("v", 4, 0, 9).expect("valid domain");
        let mut solver = problem.solver_with_options(SolverOptions {
            decision_limit: Some(2),
            ..SolverOptions::default()
        });

        assert!(solver.find_solution().is_none());
        assert!(solver.statistics().num_decisions <= 2);
    }

    #[test]
    fn an_external_termination_condition_is_polled() {
        let mut problem = Problem::new("termination");
        let _ = problem.variable_array("v", 3, 0, 9).expect("valid domain");
        let mut solver = problem.solver();
        solver.set_termination(Box::new(DecisionBudget::new(0)));

        assert!(solver.find_solution().is_none());
    }

    #[test]
    fn the_search_strategy_is_used() {
        let mut problem = Problem::new("strategy");
        let x = problem.variable("x", 0, 3).expect("valid domain");
        let y = problem.variable("y", 0, 3).expect("valid domain");

        let mut solver = problem.solver();
        solver
            .search_strategy_mut()
            .set_vars(&[y, x])
            .expect("owned variables");
        solver
            .search_strategy_mut()
            .set_value_selector_type(crate::ValueSelectorType::Max);

        let solution = solver.find_solution().expect("feasible");

        assert_eq!((3, 3), (solution.value(x), solution.value(y)));
    }
}
