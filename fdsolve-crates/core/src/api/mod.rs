//! The public face of the crate: the [`Problem`] which owns the model, the [`Var`] handles into
//! it and the [`Solver`] which searches it.
mod options;
mod problem;
mod solution_iterator;
mod solver;
mod var;

pub use options::ProblemState;
pub use options::SolverOptions;
pub use problem::Problem;
pub(crate) use problem::ProblemId;
pub use solution_iterator::SolutionIterator;
pub use solver::Solver;
pub use var::Var;
