use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the unfixed variable with the largest upper bound.
#[derive(Debug)]
pub(crate) struct Largest {
    variables: Vec<DomainId>,
    tie_breaker: InOrderTieBreaker<DomainId, i32>,
}

impl Largest {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The Largest variable selector was not provided with any variables");
        }
        Largest {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl VariableSelector<DomainId> for Largest {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .for_each(|&variable| {
                self.tie_breaker
                    .consider(variable, context.upper_bound(variable));
            });
        self.tie_breaker.select()
    }
}
