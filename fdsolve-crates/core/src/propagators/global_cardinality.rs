use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::containers::HashSet;
use crate::engine::DomainEvents;
use crate::engine::DomainId;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::ReadDomains;
use crate::propagation::RegistrationContext;

/// Propagator for `counts[k] = |{i : variables[i] = values[k]}|` for every `k`.
///
/// Per value, the count is bounded by the number of variables fixed to it and the number of
/// variables which can still take it; when either bound is reached, the variables are pruned or
/// fixed. Since every variable takes at most one value, the sum of the counts is additionally
/// bounded by the number of variables which must and which can take one of the values.
#[derive(Clone, Debug)]
pub(crate) struct GlobalCardinalityPropagator {
    variables: Box<[DomainId]>,
    values: Box<[i32]>,
    counts: Box<[DomainId]>,
    value_set: HashSet<i32>,
    values_are_distinct: bool,
}

impl GlobalCardinalityPropagator {
    pub(crate) fn new(
        variables: Box<[DomainId]>,
        values: Box<[i32]>,
        counts: Box<[DomainId]>,
    ) -> Self {
        let value_set = values.iter().copied().collect::<HashSet<_>>();
        let values_are_distinct = value_set.len() == values.len();

        GlobalCardinalityPropagator {
            variables,
            values,
            counts,
            value_set,
            values_are_distinct,
        }
    }

    /// The number of variables fixed to `value` and the number which contain it.
    fn occurrences(&self, context: &impl ReadDomains, value: i32) -> (i64, i64) {
        self.variables
            .iter()
            .fold((0, 0), |(must, possible), &variable| {
                if !context.contains(variable, value as i64) {
                    (must, possible)
                } else if context.is_fixed(variable) {
                    (must + 1, possible + 1)
                } else {
                    (must, possible + 1)
                }
            })
    }

    /// Whether every value in the domain of `variable` is one of the counted values.
    fn is_covered(&self, context: &impl ReadDomains, variable: DomainId) -> bool {
        context.size(variable) <= self.value_set.len()
            && context
                .iterate_domain(variable)
                .all(|value| self.value_set.contains(&value))
    }

    fn can_reach(&self, context: &impl ReadDomains, variable: DomainId) -> bool {
        self.value_set
            .iter()
            .any(|&value| context.contains(variable, value as i64))
    }

    fn propagate_value(
        &self,
        context: &mut PropagationContextMut<'_>,
        value: i32,
        count: DomainId,
    ) -> PropagationStatus {
        let (must, possible) = self.occurrences(&*context, value);
        context.set_lower_bound(count, must)?;
        context.set_upper_bound(count, possible)?;

        if must == possible {
            return Ok(());
        }

        if context.upper_bound(count) as i64 == must {
            for &variable in self.variables.iter() {
                if !context.is_fixed(variable) {
                    context.remove(variable, value as i64)?;
                }
            }
        } else if context.lower_bound(count) as i64 == possible {
            for &variable in self.variables.iter() {
                if context.contains(variable, value as i64) {
                    context.assign(variable, value as i64)?;
                }
            }
        }

        Ok(())
    }

    fn propagate_total(&self, context: &mut PropagationContextMut<'_>) -> PropagationStatus {
        let covered = self
            .variables
            .iter()
            .filter(|&&variable| self.is_covered(&*context, variable))
            .count() as i64;
        let reachable = self
            .variables
            .iter()
            .filter(|&&variable| self.can_reach(&*context, variable))
            .count() as i64;

        let sum_lower_bounds = self
            .counts
            .iter()
            .map(|&count| context.lower_bound(count) as i64)
            .sum::<i64>();
        let sum_upper_bounds = self
            .counts
            .iter()
            .map(|&count| context.upper_bound(count) as i64)
            .sum::<i64>();

        if sum_lower_bounds > reachable || sum_upper_bounds < covered {
            return Err(Inconsistency::Conflict);
        }

        for &count in self.counts.iter() {
            let lower_bound = context.lower_bound(count) as i64;
            let upper_bound = context.upper_bound(count) as i64;
            context.set_lower_bound(count, covered - (sum_upper_bounds - upper_bound))?;
            context.set_upper_bound(count, reachable - (sum_lower_bounds - lower_bound))?;
        }

        Ok(())
    }
}

impl Propagator for GlobalCardinalityPropagator {
    fn name(&self) -> &str {
        "GlobalCardinality"
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        for &variable in self.variables.iter() {
            context.register(variable, DomainEvents::ANY);
        }
        for &count in self.counts.iter() {
            context.register(count, DomainEvents::BOUNDS);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        for (&value, &count) in self.values.iter().zip(self.counts.iter()) {
            self.propagate_value(&mut context, value, count)?;
        }

        if self.values_are_distinct {
            self.propagate_total(&mut context)?;
        }

        Ok(())
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        let mut all_fixed = true;

        for (&value, &count) in self.values.iter().zip(self.counts.iter()) {
            let (must, possible) = self.occurrences(&context, value);
            let lower_bound = context.lower_bound(count) as i64;
            let upper_bound = context.upper_bound(count) as i64;

            if lower_bound > possible || upper_bound < must {
                return Entailment::Disentailed;
            }
            if must != possible || lower_bound != upper_bound {
                all_fixed = false;
            }
        }

        if all_fixed {
            Entailment::Entailed
        } else {
            Entailment::Undecided
        }
    }
}
