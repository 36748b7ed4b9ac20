use std::fmt::Debug;
use std::marker::PhantomData;

use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::Predicate;

/// A [`Brancher`] which uses a single [`VariableSelector`] and a single [`ValueSelector`]
/// independently of one another.
pub(crate) struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    /// Determines which (unfixed) variable to branch on next.
    variable_selector: VariableSelect,
    /// Determines how the domain of the selected variable is split.
    value_selector: ValueSelect,
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect> Debug
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndependentVariableValueBrancher").finish()
    }
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub(crate) fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Predicate> {
        self.variable_selector
            .select_variable(context)
            .map(|selected_variable| self.value_selector.select_value(context, selected_variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::branching::TestSelection;

    #[test]
    fn decides_on_the_first_unfixed_variable() {
        let (mut selection, variables) = TestSelection::new(&[(3, 3), (1, 4), (0, 9)]);
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin);

        let decision = brancher.next_decision(&mut selection.context());

        assert_eq!(
            Some(Predicate::Equal {
                domain: variables[1],
                value: 1
            }),
            decision
        );
    }

    #[test]
    fn no_decision_when_everything_is_fixed() {
        let (mut selection, variables) = TestSelection::new(&[(3, 3), (4, 4)]);
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin);

        assert_eq!(None, brancher.next_decision(&mut selection.context()));
    }
}
