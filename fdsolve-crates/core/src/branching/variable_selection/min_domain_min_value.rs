use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the smallest domain, breaking ties in
/// favour of the smallest lower bound.
#[derive(Debug)]
pub(crate) struct MinDomainMinValue {
    variables: Vec<DomainId>,
    tie_breaker: InOrderTieBreaker<DomainId, (usize, i32)>,
}

impl MinDomainMinValue {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The MinDomainMinValue variable selector was not provided with any variables");
        }
        MinDomainMinValue {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl VariableSelector<DomainId> for MinDomainMinValue {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .for_each(|&variable| {
                self.tie_breaker.consider(
                    variable,
                    (context.size(variable), context.lower_bound(variable)),
                );
            });
        self.tie_breaker.select()
    }
}
