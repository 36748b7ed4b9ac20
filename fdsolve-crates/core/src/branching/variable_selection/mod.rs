//! Strategies which select the variable to branch on next.
mod anti_first_fail;
mod first_fail;
mod input_order;
mod largest;
mod min_domain_min_value;
mod most_constrained;
mod random;
mod smallest;

pub(crate) use anti_first_fail::AntiFirstFail;
pub(crate) use first_fail::FirstFail;
pub(crate) use input_order::InputOrder;
pub(crate) use largest::Largest;
pub(crate) use min_domain_min_value::MinDomainMinValue;
pub(crate) use most_constrained::MostConstrained;
pub(crate) use random::RandomSelector;
pub(crate) use smallest::Smallest;

use crate::branching::SelectionContext;

/// Selects the next variable to branch on.
pub(crate) trait VariableSelector<Var> {
    /// Determines which variable to select next if there are any left to branch on; returns
    /// [`None`] only when every variable of the selector is fixed.
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<Var>;
}

impl<Var> VariableSelector<Var> for Box<dyn VariableSelector<Var>> {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<Var> {
        self.as_mut().select_variable(context)
    }
}
