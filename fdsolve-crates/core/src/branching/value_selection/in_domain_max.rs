use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::Predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which assigns the variable to its upper bound.
#[derive(Debug, Copy, Clone)]
pub(crate) struct InDomainMax;

impl ValueSelector<DomainId> for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        Predicate::Equal {
            domain: decision_variable,
            value: context.upper_bound(decision_variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::TestSelection;

    #[test]
    fn upper_bound_is_selected() {
        let (mut selection, variables) = TestSelection::new(&[(2, 9)]);

        let decision = InDomainMax.select_value(&mut selection.context(), variables[0]);

        assert_eq!(
            Predicate::Equal {
                domain: variables[0],
                value: 9
            },
            decision
        );
    }
}
