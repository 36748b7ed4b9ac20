use log::debug;

use crate::basic_types::Solution;
use crate::engine::DepthFirstSearch;
use crate::optimisation::OptimisationDirection;
use crate::propagation::PropagatorId;
use crate::propagators::LinearLessOrEqualPropagator;
use crate::propagators::Term;
use crate::termination::TerminationCondition;
use crate::Solver;
use crate::Var;

/// Implements the linear SAT-UNSAT (LSU) optimisation procedure.
///
/// Every solution found by the search adds the bound `objective < value` (after scaling the
/// objective by -1 when maximising) to the problem, replacing the previous bound. The search then
/// resumes from the solution, so the subtrees which were already explored are not revisited. The
/// last solution is optimal once the search is exhausted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinearSatUnsat {
    direction: OptimisationDirection,
    objective: Var,
}

impl LinearSatUnsat {
    pub(crate) fn new(direction: OptimisationDirection, objective: Var) -> Self {
        LinearSatUnsat {
            direction,
            objective,
        }
    }

    /// Runs `search` to exhaustion while tightening the objective; the problem is restored
    /// afterwards and the bound is removed again.
    pub(crate) fn optimise(
        &self,
        solver: &mut Solver<'_>,
        search: &mut DepthFirstSearch,
        termination: &mut dyn TerminationCondition,
    ) -> Option<Solution> {
        let mut best_solution: Option<Solution> = None;
        let mut bound: Option<PropagatorId> = None;

        while let Some(solution) = solver.next_verified_solution(
            search,
            termination,
            best_solution.as_ref().map_or(1, |best| best.solution_number() + 1),
        ) {
            let objective_value = solution.value(self.objective);
            search.statistics_mut().num_objective_improvements += 1;
            debug!("Found a solution with objective value {objective_value}");

            let engine = &mut solver.problem.engine;
            if let Some(previous) = bound.take() {
                engine.retire(previous);
            }
            let propagator = engine.add_propagator(Box::new(self.bound_below(objective_value)));
            engine.enqueue_on_backtrack(propagator);
            bound = Some(propagator);

            best_solution = Some(solution.with_objective_value(objective_value));
        }

        search.restore(&mut solver.problem.domains, &mut solver.problem.engine);
        if let Some(bound) = bound {
            solver.problem.engine.retire(bound);
        }

        best_solution
    }

    /// The propagator which only admits objective values better than `objective_value`.
    fn bound_below(&self, objective_value: i32) -> LinearLessOrEqualPropagator {
        let sign = match self.direction {
            OptimisationDirection::Minimise => 1,
            OptimisationDirection::Maximise => -1,
        };

        LinearLessOrEqualPropagator::new(
            [Term::new(sign, self.objective.domain)].into(),
            sign * objective_value as i64 - 1,
        )
    }
}
