use rand::Rng;

use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::Predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which assigns the variable to a value of its domain chosen uniformly at
/// random.
#[derive(Debug, Copy, Clone)]
pub(crate) struct InDomainRandom;

impl ValueSelector<DomainId> for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        let size = context.size(decision_variable);
        let index = context.random().gen_range(0..size);
        let value = context
            .iterate_domain(decision_variable)
            .nth(index)
            .unwrap_or_else(|| context.lower_bound(decision_variable));

        Predicate::Equal {
            domain: decision_variable,
            value,
        }
    }
}
