//! Bounds-consistent propagators for linear (in)equalities and products.
mod linear_equal;
mod linear_less_or_equal;
mod linear_not_equal;
mod times;

pub(crate) use linear_equal::LinearEqualPropagator;
pub(crate) use linear_less_or_equal::LinearLessOrEqualPropagator;
pub(crate) use linear_not_equal::LinearNotEqualPropagator;
pub(crate) use times::TimesPropagator;

use crate::basic_types::EmptyDomain;
use crate::engine::DomainId;
use crate::math::div_ceil;
use crate::math::div_floor;
use crate::math::saturating_i64;
use crate::propagation::PropagationContextMut;
use crate::propagation::ReadDomains;

/// A term `coefficient * domain` of a linear sum; the coefficient is never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Term {
    pub(crate) coefficient: i64,
    pub(crate) domain: DomainId,
}

impl Term {
    pub(crate) fn new(coefficient: i64, domain: DomainId) -> Term {
        Term {
            coefficient,
            domain,
        }
    }

    pub(crate) fn min(&self, context: &impl ReadDomains) -> i128 {
        let value = if self.coefficient > 0 {
            context.lower_bound(self.domain)
        } else {
            context.upper_bound(self.domain)
        };
        i128::from(self.coefficient) * i128::from(value)
    }

    pub(crate) fn max(&self, context: &impl ReadDomains) -> i128 {
        let value = if self.coefficient > 0 {
            context.upper_bound(self.domain)
        } else {
            context.lower_bound(self.domain)
        };
        i128::from(self.coefficient) * i128::from(value)
    }

    /// Restricts the domain such that `coefficient * domain <= bound`.
    pub(crate) fn set_max(
        &self,
        context: &mut PropagationContextMut<'_>,
        bound: i128,
    ) -> Result<(), EmptyDomain> {
        let coefficient = i128::from(self.coefficient);
        if coefficient > 0 {
            context.set_upper_bound(self.domain, saturating_i64(div_floor(bound, coefficient)))
        } else {
            context.set_lower_bound(self.domain, saturating_i64(div_ceil(bound, coefficient)))
        }
    }

    /// Restricts the domain such that `coefficient * domain >= bound`.
    pub(crate) fn set_min(
        &self,
        context: &mut PropagationContextMut<'_>,
        bound: i128,
    ) -> Result<(), EmptyDomain> {
        let coefficient = i128::from(self.coefficient);
        if coefficient > 0 {
            context.set_lower_bound(self.domain, saturating_i64(div_ceil(bound, coefficient)))
        } else {
            context.set_upper_bound(self.domain, saturating_i64(div_floor(bound, coefficient)))
        }
    }
}

/// The smallest and largest value the sum of `terms` can take.
pub(crate) fn sum_bounds(terms: &[Term], context: &impl ReadDomains) -> (i128, i128) {
    terms.iter().fold((0, 0), |(lower, upper), term| {
        (lower + term.min(context), upper + term.max(context))
    })
}
