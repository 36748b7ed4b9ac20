use std::cmp::Reverse;

use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the smallest domain, breaking ties in
/// favour of the variable attached to the most propagators.
#[derive(Debug)]
pub(crate) struct MostConstrained {
    variables: Vec<DomainId>,
    tie_breaker: InOrderTieBreaker<DomainId, (usize, Reverse<usize>)>,
}

impl MostConstrained {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The MostConstrained variable selector was not provided with any variables");
        }
        MostConstrained {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl VariableSelector<DomainId> for MostConstrained {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .for_each(|&variable| {
                self.tie_breaker.consider(
                    variable,
                    (context.size(variable), Reverse(context.degree(variable))),
                );
            });
        self.tie_breaker.select()
    }
}
