use std::fmt::Debug;

use crate::branching::SelectionContext;
use crate::engine::Predicate;

/// A trait for defining a branching strategy.
///
/// The returned decision has to shrink the domain of an unfixed variable; it is never applied by
/// the brancher itself. If all variables the brancher is responsible for are fixed, it returns
/// [`None`].
pub(crate) trait Brancher: Debug {
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Predicate>;
}
