//! Strategies which decide how the domain of the selected variable is split.
//!
//! Every selector returns a [`Predicate`] which the search applies first; its negation is the
//! alternative which is tried once the subtree below the decision is exhausted.
mod in_domain_max;
mod in_domain_middle;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;
mod reverse_in_domain_split;

pub(crate) use in_domain_max::InDomainMax;
pub(crate) use in_domain_middle::InDomainMiddle;
pub(crate) use in_domain_min::InDomainMin;
pub(crate) use in_domain_random::InDomainRandom;
pub(crate) use in_domain_split::InDomainSplit;
pub(crate) use reverse_in_domain_split::ReverseInDomainSplit;

use crate::branching::SelectionContext;
use crate::engine::Predicate;

/// Selects the decision for a variable which is not fixed.
pub(crate) trait ValueSelector<Var> {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, decision_variable: Var)
        -> Predicate;
}

impl<Var> ValueSelector<Var> for Box<dyn ValueSelector<Var>> {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: Var,
    ) -> Predicate {
        self.as_mut().select_value(context, decision_variable)
    }
}

/// The midpoint of the bounds of `domain`, rounded towards negative infinity.
fn midpoint(context: &SelectionContext<'_>, domain: crate::engine::DomainId) -> i32 {
    use crate::propagation::ReadDomains;

    let lower_bound = context.lower_bound(domain) as i64;
    let upper_bound = context.upper_bound(domain) as i64;
    crate::math::div_floor((lower_bound + upper_bound).into(), 2) as i32
}
