use thiserror::Error;

#[cfg(doc)]
use crate::Problem;
use crate::MAX_VALUE;
use crate::MIN_VALUE;

/// Errors which are raised while a model is being built on a [`Problem`].
///
/// These are reported eagerly; failures which arise during propagation or search never surface as
/// a [`ModelError`] but lead to backtracking, and infeasibility is reported by the solver returning
/// no solution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A variable created by one problem was used in another one.
    #[error("The variable '{0}' does not belong to this problem")]
    ForeignVariable(String),
    /// No variable is registered under the given name.
    #[error("No variable is registered under the name '{0}'")]
    UnknownVariable(String),
    /// A variable was created without any admissible value.
    #[error("The initial domain of '{0}' is empty")]
    EmptyDomain(String),
    /// A variable was created with values which the engine cannot represent.
    #[error(
        "The domain [{lower_bound}, {upper_bound}] of '{name}' exceeds the supported range [{}, {}]",
        MIN_VALUE,
        MAX_VALUE
    )]
    ValueOutOfRange {
        name: String,
        lower_bound: i64,
        upper_bound: i64,
    },
    /// A variable matrix was requested with a zero or overflowing dimension.
    #[error("Cannot create a variable matrix with dimensions {0:?}")]
    MalformedDimensions(Vec<usize>),
    /// Two parallel arrays have a different number of elements.
    #[error("Expected {expected} elements for {argument} but got {actual}")]
    LengthMismatch {
        argument: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An operator symbol could not be resolved.
    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),
    /// A second variable was registered under an existing name.
    #[error("The name '{0}' is already registered")]
    DuplicateName(String),
    /// The search strategy cannot be used with this problem.
    #[error("Invalid search strategy: {0}")]
    InvalidStrategy(String),
}
