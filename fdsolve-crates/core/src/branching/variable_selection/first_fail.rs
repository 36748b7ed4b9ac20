use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::fdsolve_assert_eq_simple;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the fewest values in its domain.
///
/// Uses a [`TieBreaker`] to break ties, by default the [`InOrderTieBreaker`].
#[derive(Debug)]
pub(crate) struct FirstFail<TieBreaking> {
    variables: Vec<DomainId>,
    tie_breaker: TieBreaking,
}

impl FirstFail<InOrderTieBreaker<DomainId, usize>> {
    pub(crate) fn new(variables: &[DomainId]) -> Self {
        FirstFail::with_tie_breaker(variables, InOrderTieBreaker::new(Direction::Minimum))
    }
}

impl<TieBreaking: TieBreaker<DomainId, usize>> FirstFail<TieBreaking> {
    pub(crate) fn with_tie_breaker(variables: &[DomainId], tie_breaker: TieBreaking) -> Self {
        fdsolve_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Minimum,
            "FirstFail requires a tie-breaker which looks for the minimum"
        );
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<TieBreaking: TieBreaker<DomainId, usize>> VariableSelector<DomainId>
    for FirstFail<TieBreaking>
{
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
    fn smallest_domain_is_selected() {
        let (mut selection, variables) = TestSelection::new(&[(0, 10), (5, 20)]);
        let mut strategy = FirstFail::new(&variables);

        assert_eq!(
            Some(variables[0]),
            strategy.select_variable(&mut selection.context())
        );

        selection
            .domains
            .set_lower_bound(variables[1], 15)
            .expect("non-empty");

        assert_eq!(
            Some(variables[1]),
            strategy.select_variable(&mut selection.context())
        );
    }

    #[test]
    fn holes_count_towards_the_size() {
        let (mut selection, variables) = TestSelection::new(&[(0, 4), (0, 5)]);
        let mut strategy = FirstFail::new(&variables);
        for value in [1, 2, 3] {
            selection
                .domains
                .remove(variables[1], value)
                .expect("non-empty");
        }

        assert_eq!(
            Some(variables[1]),
            strategy.select_variable(&mut selection.context())
        );
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let (mut selection, variables) = TestSelection::new(&[(10, 10), (20, 20)]);
        let mut strategy = FirstFail::new(&variables);

        assert_eq!(None, strategy.select_variable(&mut selection.context()));
    }
}
