/// Returned when a domain mutation would remove the last value of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EmptyDomain;

/// The reasons a propagator can report that the current node of the search is infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inconsistency {
    /// Some domain became empty.
    EmptyDomain,
    /// The propagator detected a violation without emptying a domain.
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

/// The result of invoking a propagator; an error triggers backtracking.
pub(crate) type PropagationStatus = Result<(), Inconsistency>;
