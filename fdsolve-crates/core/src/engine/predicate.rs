use std::fmt::Display;

use super::DomainId;
use super::DomainStore;
use crate::basic_types::EmptyDomain;

/// An atomic statement about a single domain; used for search decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Predicate {
    /// `[domain >= bound]`
    LowerBound { domain: DomainId, bound: i32 },
    /// `[domain <= bound]`
    UpperBound { domain: DomainId, bound: i32 },
    /// `[domain == value]`
    Equal { domain: DomainId, value: i32 },
    /// `[domain != value]`
    NotEqual { domain: DomainId, value: i32 },
}

impl Predicate {
    pub(crate) fn get_domain(&self) -> DomainId {
        match *self {
            Predicate::LowerBound { domain, .. }
            | Predicate::UpperBound { domain, .. }
            | Predicate::Equal { domain, .. }
            | Predicate::NotEqual { domain, .. } => domain,
        }
    }

    pub(crate) fn negate(&self) -> Predicate {
        match *self {
            Predicate::LowerBound { domain, bound } => Predicate::UpperBound {
                domain,
                bound: bound - 1,
            },
            Predicate::UpperBound { domain, bound } => Predicate::LowerBound {
                domain,
                bound: bound + 1,
            },
            Predicate::Equal { domain, value } => Predicate::NotEqual { domain, value },
            Predicate::NotEqual { domain, value } => Predicate::Equal { domain, value },
        }
    }

    pub(crate) fn is_satisfied(&self, domains: &DomainStore) -> bool {
        match *self {
            Predicate::LowerBound { domain, bound } => domains.lower_bound(domain) >= bound,
            Predicate::UpperBound { domain, bound } => domains.upper_bound(domain) <= bound,
            Predicate::Equal { domain, value } => domains.fixed_value(domain) == Some(value),
            Predicate::NotEqual { domain, value } => !domains.contains(domain, value as i64),
        }
    }

    /// Restricts the domain such that the predicate holds.
    pub(crate) fn apply(&self, domains: &mut DomainStore) -> Result<(), EmptyDomain> {
        match *self {
            Predicate::LowerBound { domain, bound } => {
                domains.set_lower_bound(domain, bound as i64)
            }
            Predicate::UpperBound { domain, bound } => {
                domains.set_upper_bound(domain, bound as i64)
            }
            Predicate::Equal { domain, value } => domains.assign(domain, value as i64),
            Predicate::NotEqual { domain, value } => domains.remove(domain, value as i64),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::LowerBound { domain, bound } => write!(f, "[{domain} >= {bound}]"),
            Predicate::UpperBound { domain, bound } => write!(f, "[{domain} <= {bound}]"),
            Predicate::Equal { domain, value } => write!(f, "[{domain} == {value}]"),
            Predicate::NotEqual { domain, value } => write!(f, "[{domain} != {value}]"),
        }
    }
}
