//! Structures for deciding between variables which score equally during variable selection.
//!
//! A [`TieBreaker`] is fed every candidate together with its score and keeps only those with the
//! best score according to its [`Direction`]; among those it picks one, for example the first one
//! it has seen ([`InOrderTieBreaker`]) or a uniformly random one ([`RandomTieBreaker`]).
mod in_order_tie_breaker;
mod random_tie_breaker;

pub(crate) use in_order_tie_breaker::InOrderTieBreaker;
pub(crate) use random_tie_breaker::RandomTieBreaker;

/// The interface for a tie-breaker which considers elements with values; depending on the
/// [`Direction`] it should only consider the elements with the "best" value for selection.
pub(crate) trait TieBreaker<Var, Value> {
    /// Consider the next element with corresponding value.
    fn consider(&mut self, variable: Var, value: Value);

    /// Get the element which was selected and reset the tie-breaker so it can be used again.
    fn select(&mut self) -> Option<Var>;

    fn get_direction(&self) -> Direction;
}

/// Whether the tie-breaker looks for the element with the maximum or the minimum value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Maximum,
    Minimum,
}

impl Direction {
    /// Whether `value` is strictly better than `incumbent`.
    pub(crate) fn improves<Value: PartialOrd>(self, value: &Value, incumbent: &Value) -> bool {
        match self {
            Direction::Maximum => value > incumbent,
            Direction::Minimum => value < incumbent,
        }
    }
}
