use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::Predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which assigns the variable to its lower bound.
#[derive(Debug, Copy, Clone)]
pub(crate) struct InDomainMin;

impl ValueSelector<DomainId> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        Predicate::Equal {
            domain: decision_variable,
            value: context.lower_bound(decision_variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::TestSelection;

    #[test]
    fn lower_bound_is_selected() {
        let (mut selection, variables) = TestSelection::new(&[(2, 9)]);

        let decision = InDomainMin.select_value(&mut selection.context(), variables[0]);

        assert_eq!(
            Predicate::Equal {
                domain: variables[0],
                value: 2
            },
            decision
        );
    }
}
