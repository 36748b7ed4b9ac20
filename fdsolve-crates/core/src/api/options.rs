use std::time::Duration;

use crate::termination::Combinator;
use crate::termination::DecisionBudget;
use crate::termination::TimeBudget;
#[cfg(doc)]
use crate::Solver;

/// Options which configure a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    /// The seed of the random selectors of the search.
    pub random_seed: u64,
    /// The wall-clock time each search may take; the time starts when the search starts.
    pub time_limit: Option<Duration>,
    /// The number of decisions each search may take.
    pub decision_limit: Option<u64>,
    /// The number of solutions [`Solver::find_all_solutions`] enumerates at most.
    pub max_solutions: Option<usize>,
    /// Whether every solution is checked against all posted constraints before it is reported.
    pub check_solutions: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            random_seed: 42,
            time_limit: None,
            decision_limit: None,
            max_solutions: None,
            check_solutions: true,
        }
    }
}

impl SolverOptions {
    /// The termination condition which enforces the limits of these options.
    pub(crate) fn budget(&self) -> Combinator<Option<TimeBudget>, Option<DecisionBudget>> {
        Combinator::new(
            self.time_limit.map(TimeBudget::starting_now),
            self.decision_limit.map(DecisionBudget::new),
        )
    }
}

/// What happens to the domains of a [`crate::Problem`] when a search returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ProblemState {
    /// Every change made by the search is undone, so the problem can be solved again.
    #[default]
    Restore,
    /// The domains keep the values of the returned solution.
    ///
    /// Posting constraints afterwards acts on the narrowed domains.
    DoNotRestore,
}
