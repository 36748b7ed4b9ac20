use super::midpoint;
use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::Predicate;

/// A [`ValueSelector`] which splits the bounds of the domain in half and removes the lower half
/// first.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ReverseInDomainSplit;

impl ValueSelector<DomainId> for ReverseInDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        Predicate::LowerBound {
            domain: decision_variable,
            bound: midpoint(context, decision_variable) + 1,
        }
    }
}
