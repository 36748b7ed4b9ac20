use super::midpoint;
use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::Predicate;

/// A [`ValueSelector`] which splits the bounds of the domain in half and removes the upper half
/// first.
///
/// The split disregards holes, so it is not necessarily even.
#[derive(Debug, Copy, Clone)]
pub(crate) struct InDomainSplit;

impl ValueSelector<DomainId> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        Predicate::UpperBound {
            domain: decision_variable,
            bound: midpoint(context, decision_variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::TestSelection;

    #[test]
    fn upper_half_is_removed() {
        let (mut selection, variables) = TestSelection::new(&[(0, 10), (-3, -2)]);

        assert_eq!(
            Predicate::UpperBound {
                domain: variables[0],
                bound: 5
            },
            InDomainSplit.select_value(&mut selection.context(), variables[0])
        );
        assert_eq!(
            Predicate::UpperBound {
                domain: variables[1],
                bound: -3
            },
            InDomainSplit.select_value(&mut selection.context(), variables[1])
        );
    }
}
