//! Contains the structures which define the decision making procedure of the search.
//!
//! A [`Brancher`] returns the next decision as a [`Predicate`] over a single variable; the search
//! applies it and, when the subtree below it is exhausted, applies its negation instead. The
//! [`IndependentVariableValueBrancher`] combines a [`VariableSelector`] which picks an unfixed
//! variable with a [`ValueSelector`] which decides how to split its domain.
//!
//! Users configure branching through the [`SearchStrategy`] of a solver.
//!
//! [`Predicate`]: crate::engine::Predicate
//! [`VariableSelector`]: variable_selection::VariableSelector
//! [`ValueSelector`]: value_selection::ValueSelector
mod brancher;
mod independent_variable_value_brancher;
mod search_strategy;
mod selection_context;
pub(crate) mod tie_breaking;
pub(crate) mod value_selection;
pub(crate) mod variable_selection;

pub(crate) use brancher::Brancher;
pub(crate) use independent_variable_value_brancher::IndependentVariableValueBrancher;
pub use search_strategy::SearchStrategy;
pub use search_strategy::ValueSelectorType;
pub use search_strategy::VarSelectorType;
pub(crate) use selection_context::SelectionContext;
#[cfg(test)]
pub(crate) use selection_context::TestSelection;
