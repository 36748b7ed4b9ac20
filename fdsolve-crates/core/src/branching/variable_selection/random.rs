use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::RandomTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects an unfixed variable uniformly at random.
#[derive(Debug)]
pub(crate) struct RandomSelector {
    variables: Vec<DomainId>,
    tie_breaker: RandomTieBreaker<DomainId, ()>,
}

impl RandomSelector {
    pub(crate) fn new(variables: &[DomainId], seed: u64) -> Self {
        if variables.is_empty() {
            warn!("The Random variable selector was not provided with any variables");
        }
        RandomSelector {
            variables: variables.to_vec(),
            tie_breaker: RandomTieBreaker::new(Direction::Minimum, seed),
        }
    }
}

impl VariableSelector<DomainId> for RandomSelector {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .for_each(|&variable| self.tie_breaker.consider(variable, ()));
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::TestSelection;

    #[test]
    fn only_unfixed_variables_are_selected() {
        let (mut selection, variables) = TestSelection::new(&[(1, 1), (0, 4), (2, 2), (3, 9)]);
        let mut strategy = RandomSelector::new(&variables, 3);

        for _ in 0..50 {
            let selected = strategy
                .select_variable(&mut selection.context())
                .expect("two variables are unfixed");
            assert!(selected == variables[1] || selected == variables[3]);
        }
    }
}
