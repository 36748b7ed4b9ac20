//! Contains the structures corresponding to solution iterations.
use std::fmt::Debug;

use log::debug;

use super::Solver;
use crate::basic_types::Solution;
use crate::engine::DepthFirstSearch;
use crate::termination::Combinator;
use crate::termination::DecisionBudget;
use crate::termination::TimeBudget;

/// A lazy sequence of the distinct solutions of a problem, created by
/// [`Solver::solution_iterator`].
///
/// Every call to [`Iterator::next`] resumes the search from the previous solution. The iteration
/// ends when the search tree is exhausted, a termination condition triggers, or
/// [`crate::SolverOptions::max_solutions`] solutions were produced; the problem is then restored
/// to the state it had before the iteration started. Dropping the iterator early restores the
/// problem as well.
pub struct SolutionIterator<'solver, 'problem> {
    solver: &'solver mut Solver<'problem>,
    search: DepthFirstSearch,
    budget: Combinator<Option<TimeBudget>, Option<DecisionBudget>>,
    num_solutions: usize,
    finished: bool,
}

impl Debug for SolutionIterator<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionIterator")
            .field("search", &self.search)
            .field("num_solutions", &self.num_solutions)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<'solver, 'problem> SolutionIterator<'solver, 'problem> {
    pub(crate) fn new(
        solver: &'solver mut Solver<'problem>,
        search: DepthFirstSearch,
        budget: Combinator<Option<TimeBudget>, Option<DecisionBudget>>,
    ) -> Self {
        let finished = solver.problem.is_infeasible();
        SolutionIterator {
            solver,
            search,
            budget,
            num_solutions: 0,
            finished,
        }
    }

    /// The number of solutions produced so far.
    pub fn num_solutions(&self) -> usize {
        self.num_solutions
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        self.search
            .restore(&mut self.solver.problem.domains, &mut self.solver.problem.engine);
        self.solver.set_statistics(self.search.statistics());
        debug!("Enumeration ended after {} solution(s)", self.num_solutions);
    }
}

impl Iterator for SolutionIterator<'_, '_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.finished {
            return None;
        }
        if self
            .solver
            .options()
            .max_solutions
            .is_some_and(|max_solutions| self.num_solutions >= max_solutions)
        {
            self.finish();
            return None;
        }

        let solution = self.solver.next_verified_solution(
            &mut self.search,
            &mut self.budget,
            self.num_solutions + 1,
        );
        self.solver.set_statistics(self.search.statistics());

        match solution {
            Some(solution) => {
                self.num_solutions += 1;
                Some(solution)
            }
            None => {
                self.finish();
                None
            }
        }
    }
}

impl Drop for SolutionIterator<'_, '_> {
    fn drop(&mut self) {
        self.finish();
    }
}
