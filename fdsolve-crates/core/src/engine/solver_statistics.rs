use crate::create_statistics_struct;
#[cfg(doc)]
use crate::Solver;

create_statistics_struct!(
    /// The statistics of the most recent search of a [`Solver`].
    pub SolverStatistics {
        /// The number of decisions taken by the search
        num_decisions: u64,
        /// The number of nodes at which propagation failed or a leaf was rejected
        num_failures: u64,
        /// The number of times a propagator was invoked
        num_propagator_calls: u64,
        /// The number of solutions the search reported
        num_solutions: u64,
        /// The largest number of open choice points
        peak_depth: u64,
        /// The number of times a better objective value was found
        num_objective_improvements: u64,
        /// The wall-clock time spent searching, in milliseconds
        time_spent_in_search_ms: u128,
});
