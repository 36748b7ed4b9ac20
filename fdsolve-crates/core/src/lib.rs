//! # fdsolve
//! A finite-domain constraint satisfaction and optimisation engine.
//!
//! A model is built on a [`Problem`]: integer variables with finite domains and the
//! [`constraints`] over them. Posting a constraint immediately propagates it, so the domains of
//! the variables always reflect what the model implies. A [`Solver`] then explores the remaining
//! assignments with a depth-first search, and can
//! - find a single solution ([`Solver::find_solution`]),
//! - enumerate the solutions lazily ([`Solver::solution_iterator`]) or all at once
//!   ([`Solver::find_all_solutions`]),
//! - find a solution with the best value of an objective variable
//!   ([`Solver::find_optimal_solution`]).
//!
//! # Example
//! ```rust
//! # use fdsolve_core::constraints;
//! # use fdsolve_core::Problem;
//! let mut problem = Problem::new("permutations");
//! let vars = problem.variable_array("v", 3, 0, 2).unwrap();
//! problem.post_all_different(&vars).unwrap();
//! constraints::less_than(vars[0], vars[2])
//!     .post(&mut problem)
//!     .unwrap();
//!
//! let solutions = problem.solver().find_all_solutions();
//! assert_eq!(3, solutions.len());
//! for solution in solutions {
//!     assert!(solution.value(vars[0]) < solution.value(vars[2]));
//! }
//! ```
//!
//! Infeasibility is never an error: a search over an infeasible problem simply finds no solution.
//! Errors ([`ModelError`]) are only raised while the model is built.
//!
//! # Search
//! The variables and value orderings the search branches on are configured through the
//! [`SearchStrategy`] of a solver; the limits of a search through [`SolverOptions`] and the
//! [`termination`] conditions.
pub(crate) mod basic_types;
pub(crate) mod branching;
pub(crate) mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagation;
pub(crate) mod propagators;

#[doc(hidden)]
pub mod asserts;
pub mod constraints;
pub mod optimisation;
pub mod statistics;

pub use engine::termination;

// The api module is private with public re-exports, so that users write
// `use fdsolve_core::Solver;` rather than `use fdsolve_core::api::Solver;`.
mod api;

pub use api::*;

pub use crate::basic_types::ModelError;
pub use crate::basic_types::RelationalOp;
pub use crate::basic_types::Solution;
pub use crate::branching::SearchStrategy;
pub use crate::branching::ValueSelectorType;
pub use crate::branching::VarSelectorType;
pub use crate::constraints::Constraint;
pub use crate::constraints::LinearExpression;
pub use crate::engine::SolverStatistics;
pub use crate::optimisation::OptimisationDirection;

/// The smallest value a variable can take.
pub const MIN_VALUE: i32 = -(1 << 30);
/// The largest value a variable can take.
///
/// Keeping values within `[MIN_VALUE, MAX_VALUE]` leaves room for the intermediate results of
/// propagation, which are computed in 64 bits.
pub const MAX_VALUE: i32 = 1 << 30;
