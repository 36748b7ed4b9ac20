use super::midpoint;
use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::Predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which assigns the variable to the middle of its bounds or, if that value
/// was removed, to the closest value in the domain (preferring the smaller one).
#[derive(Debug, Copy, Clone)]
pub(crate) struct InDomainMiddle;

impl ValueSelector<DomainId> for InDomainMiddle {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        let middle = midpoint(context, decision_variable) as i64;
        let lower_bound = context.lower_bound(decision_variable) as i64;
        let upper_bound = context.upper_bound(decision_variable) as i64;

        let mut offset = 0;
        while middle - offset >= lower_bound || middle + offset <= upper_bound {
            for candidate in [middle - offset, middle + offset] {
                if context.contains(decision_variable, candidate) {
                    return Predicate::Equal {
                        domain: decision_variable,
                        value: candidate as i32,
                    };
                }
            }
            offset += 1;
        }

        unreachable!("the domain of {decision_variable} is not empty")
    }
}
