use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the first unfixed variable in the order they were
/// provided.
#[derive(Debug)]
pub(crate) struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector<DomainId> for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .find(|&variable| !context.is_fixed(variable))
    }
}
