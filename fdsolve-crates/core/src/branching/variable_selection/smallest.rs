use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the unfixed variable with the smallest lower bound.
#[derive(Debug)]
pub(crate) struct Smallest {
    variables: Vec<DomainId>,
    tie_breaker: InOrderTieBreaker<DomainId, i32>,
}

impl Smallest {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The Smallest variable selector was not provided with any variables");
        }
        Smallest {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl VariableSelector<DomainId> for Smallest {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .for_each(|&variable| {
                self.tie_breaker
                    .consider(variable, context.lower_bound(variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::TestSelection;

    #[test]
    fn smallest_lower_bound_is_selected() {
        let (mut selection, variables) = TestSelection::new(&[(3, 10), (-2, 20), (-5, -5)]);
        let mut strategy = Smallest::new(&variables);

        assert_eq!(
            Some(variables[1]),
            strategy.select_variable(&mut selection.context())
        );
    }
}
