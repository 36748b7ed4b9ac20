use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the most values in its domain.
#[derive(Debug)]
pub(crate) struct AntiFirstFail {
    variables: Vec<DomainId>,
    tie_breaker: InOrderTieBreaker<DomainId, usize>,
}

impl AntiFirstFail {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The AntiFirstFail variable selector was not provided with any variables");
        }
        AntiFirstFail {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl VariableSelector<DomainId> for AntiFirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .for_each(|&variable| {
                self.tie_breaker
                    .consider(variable, context.size(variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::TestSelection;

    #[test]
    fn largest_domain_is_selected() {
        let (mut selection, variables) = TestSelection::new(&[(0, 10), (5, 20)]);
        let mut strategy = AntiFirstFail::new(&variables);

        assert_eq!(
            Some(variables[1]),
            strategy.select_variable(&mut selection.context())
        );

        selection
            .domains
            .set_lower_bound(variables[1], 15)
            .expect("non-empty");

        assert_eq!(
            Some(variables[0]),
            strategy.select_variable(&mut selection.context())
        );
    }
}
