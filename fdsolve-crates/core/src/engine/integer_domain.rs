use std::collections::BTreeMap;
use std::collections::BTreeSet;

use itertools::Itertools;

use crate::fdsolve_assert_moderate;

/// A single change to an [`IntegerDomain`], recorded on the trail with the information needed to
/// revert it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DomainChange {
    /// The lower bound changed; holds the previous lower bound.
    LowerBound(i32),
    /// The upper bound changed; holds the previous upper bound.
    UpperBound(i32),
    /// The given value was removed from the inside of the domain.
    Removal(i32),
}

/// A finite set of integers stored as an interval with holes.
///
/// The bounds are always members of the domain, which means the domain is never empty. Holes are
/// stored as maximal runs of consecutive missing values, keyed by their first value, so a sparse
/// domain costs memory in the number of gaps rather than in its width. Holes which fall outside
/// of the bounds are kept so that reverting a bound change restores them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: BTreeMap<i32, i32>,
}

impl IntegerDomain {
    pub(crate) fn new(lower_bound: i32, upper_bound: i32) -> IntegerDomain {
        fdsolve_assert_moderate!(lower_bound <= upper_bound);
        IntegerDomain {
            lower_bound,
            upper_bound,
            holes: BTreeMap::new(),
        }
    }

    /// Creates the domain containing exactly `values`; returns [`None`] if there are no values.
    pub(crate) fn from_values(values: &[i32]) -> Option<IntegerDomain> {
        let values = values.iter().copied().collect::<BTreeSet<_>>();
        let lower_bound = *values.first()?;
        let upper_bound = *values.last()?;

        let holes = values
            .iter()
            .tuple_windows()
            .filter(|&(&below, &above)| above - below > 1)
            .map(|(&below, &above)| (below + 1, above - 1))
            .collect();

        Some(IntegerDomain {
            lower_bound,
            upper_bound,
            holes,
        })
    }

    pub(crate) fn lower_bound(&self) -> i32 {
        self.lower_bound
    }

    pub(crate) fn upper_bound(&self) -> i32 {
        self.upper_bound
    }

    pub(crate) fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && self.hole_at(value).is_none()
    }

    pub(crate) fn is_fixed(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    /// The number of values in the domain.
    pub(crate) fn size(&self) -> usize {
        let span = (self.upper_bound as i64 - self.lower_bound as i64 + 1) as usize;
        let missing = self
            .inner_holes()
            .map(|(start, end)| (end as i64 - start as i64 + 1) as usize)
            .sum::<usize>();
        span - missing
    }

    /// The values of the domain in ascending order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        let starts = std::iter::once(self.lower_bound)
            .chain(self.inner_holes().map(|(_, end)| end + 1));
        let ends = self
            .inner_holes()
            .map(|(start, _)| start - 1)
            .chain(std::iter::once(self.upper_bound));
        starts.zip(ends).flat_map(|(start, end)| start..=end)
    }

    /// The smallest member which is at least `value`.
    pub(crate) fn next_value_at_least(&self, value: i32) -> Option<i32> {
        let candidate = value.max(self.lower_bound);
        if candidate > self.upper_bound {
            return None;
        }
        // Runs are maximal and the upper bound is a member, so the value after a run is one.
        Some(self.hole_at(candidate).map_or(candidate, |(_, end)| end + 1))
    }

    /// The largest member which is at most `value`.
    pub(crate) fn next_value_at_most(&self, value: i32) -> Option<i32> {
        let candidate = value.min(self.upper_bound);
        if candidate < self.lower_bound {
            return None;
        }
        Some(self.hole_at(candidate).map_or(candidate, |(start, _)| start - 1))
    }

    /// The run of holes which contains `value`.
    fn hole_at(&self, value: i32) -> Option<(i32, i32)> {
        self.holes
            .range(..=value)
            .next_back()
            .filter(|&(_, &end)| value <= end)
            .map(|(&start, &end)| (start, end))
    }

    /// The runs of holes between the bounds; a run never contains a bound, so it lies either
    /// completely inside or completely outside of them.
    fn inner_holes(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.holes
            .range(self.lower_bound..=self.upper_bound)
            .map(|(&start, &end)| (start, end))
    }

    /// Moves the lower bound to `new_lower_bound`, which must be a member of the domain.
    pub(crate) fn set_lower_bound(&mut self, new_lower_bound: i32) -> DomainChange {
        fdsolve_assert_moderate!(self.contains(new_lower_bound));
        let change = DomainChange::LowerBound(self.lower_bound);
        self.lower_bound = new_lower_bound;
        change
    }

    /// Moves the upper bound to `new_upper_bound`, which must be a member of the domain.
    pub(crate) fn set_upper_bound(&mut self, new_upper_bound: i32) -> DomainChange {
        fdsolve_assert_moderate!(self.contains(new_upper_bound));
        let change = DomainChange::UpperBound(self.upper_bound);
        self.upper_bound = new_upper_bound;
        change
    }

    /// Punches a hole at `value`, which must lie strictly between the bounds.
    pub(crate) fn remove_inner_value(&mut self, value: i32) -> DomainChange {
        fdsolve_assert_moderate!(self.lower_bound < value && value < self.upper_bound);
        fdsolve_assert_moderate!(self.hole_at(value).is_none());

        let start = self
            .holes
            .range(..value)
            .next_back()
            .filter(|&(_, &end)| end == value - 1)
            .map_or(value, |(&start, _)| start);
        let end = self.holes.remove(&(value + 1)).unwrap_or(value);
        let _ = self.holes.insert(start, end);

        DomainChange::Removal(value)
    }

    pub(crate) fn undo(&mut self, change: DomainChange) {
        match change {
            DomainChange::LowerBound(old) => self.lower_bound = old,
            DomainChange::UpperBound(old) => self.upper_bound = old,
            DomainChange::Removal(value) => {
                // Changes are undone newest first, so `value` is still inside its run.
                let Some((start, end)) = self.hole_at(value) else {
                    return;
                };
                let _ = self.holes.remove(&start);
                if start < value {
                    let _ = self.holes.insert(start, value - 1);
                }
                if value < end {
                    let _ = self.holes.insert(value + 1, end);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_domains_have_exact_size() {
        let domain = IntegerDomain::from_values(&[7, 1, 3, 3]).expect("non-empty");

        assert_eq!(1, domain.lower_bound());
        assert_eq!(7, domain.upper_bound());
        assert_eq!(3, domain.size());
        assert_eq!(vec![1, 3, 7], domain.iter().collect::<Vec<_>>());
        assert!(!domain.contains(2));
    }

    #[test]
    fn no_values_gives_no_domain() {
        assert!(IntegerDomain::from_values(&[]).is_none());
    }

    #[test]
    fn holes_outside_the_bounds_do_not_count() {
        let mut domain = IntegerDomain::new(0, 5);
        let _ = domain.remove_inner_value(1);
        let _ = domain.set_lower_bound(2);

        assert_eq!(4, domain.size());
        assert_eq!(Some(2), domain.next_value_at_least(-3));
    }

    #[test]
    fn next_values_skip_holes() {
        let mut domain = IntegerDomain::new(0, 5);
        let _ = domain.remove_inner_value(2);
        let _ = domain.remove_inner_value(3);

        assert_eq!(Some(4), domain.next_value_at_least(2));
        assert_eq!(Some(1), domain.next_value_at_most(3));
        assert_eq!(None, domain.next_value_at_least(6));
    }

    #[test]
    fn undoing_changes_in_reverse_restores_the_domain() {
        let original = IntegerDomain::new(0, 9);
        let mut domain = original.clone();

        let changes = [
            domain.remove_inner_value(4),
            domain.set_lower_bound(2),
            domain.remove_inner_value(7),
            domain.set_upper_bound(8),
        ];
        for change in changes.into_iter().rev() {
            domain.undo(change);
        }

        assert_eq!(original, domain);
    }

    #[test]
    fn a_wide_sparse_domain_stores_only_its_gaps() {
        let domain = IntegerDomain::from_values(&[crate::MIN_VALUE, 0, crate::MAX_VALUE])
            .expect("non-empty");

        assert_eq!(3, domain.size());
        assert_eq!(2, domain.holes.len());
        assert_eq!(
            vec![crate::MIN_VALUE, 0, crate::MAX_VALUE],
            domain.iter().collect::<Vec<_>>()
        );
        assert_eq!(Some(0), domain.next_value_at_least(crate::MIN_VALUE + 1));
        assert_eq!(Some(0), domain.next_value_at_most(crate::MAX_VALUE - 1));
        assert!(!domain.contains(1));
    }

    #[test]
    fn adjacent_removals_merge_into_one_run() {
        let mut domain = IntegerDomain::new(0, 9);
        let changes = [
            domain.remove_inner_value(3),
            domain.remove_inner_value(5),
            domain.remove_inner_value(4),
        ];

        assert_eq!(1, domain.holes.len());
        assert_eq!(Some(6), domain.next_value_at_least(3));
        assert_eq!(Some(2), domain.next_value_at_most(5));
        assert_eq!(7, domain.size());

        for change in changes.into_iter().rev() {
            domain.undo(change);
        }
        assert_eq!(IntegerDomain::new(0, 9), domain);
    }
}
