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

/// Propagator for the constraint that all variables take pairwise distinct values.
///
/// The value of every fixed variable is removed from the other variables. On top of that, Hall
/// intervals are detected on the bounds: if `k` variables have their domains within an interval of
/// `k` values, those values are removed from the bounds of all other variables.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentPropagator {
    variables: Box<[DomainId]>,
}

impl AllDifferentPropagator {
    pub(crate) fn new(variables: Box<[DomainId]>) -> Self {
        AllDifferentPropagator { variables }
    }

    fn remove_fixed_values(&self, context: &mut PropagationContextMut<'_>) -> PropagationStatus {
        let mut processed = vec![false; self.variables.len()];

        loop {
            let mut found_fixed = false;

            for (i, &variable) in self.variables.iter().enumerate() {
                if processed[i] {
                    continue;
                }
                let Some(value) = context.fixed_value(variable) else {
                    continue;
                };

                processed[i] = true;
                found_fixed = true;
                for (j, &other) in self.variables.iter().enumerate() {
                    if i != j {
                        context.remove(other, value as i64)?;
                    }
                }
            }

            if !found_fixed {
                return Ok(());
            }
        }
    }

    fn propagate_hall_intervals(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatus {
        let mut lower_bounds = self
            .variables
            .iter()
            .map(|&variable| context.lower_bound(variable) as i64)
            .collect::<Vec<_>>();
        lower_bounds.sort_unstable();
        lower_bounds.dedup();

        let mut upper_bounds = self
            .variables
            .iter()
            .map(|&variable| context.upper_bound(variable) as i64)
            .collect::<Vec<_>>();
        upper_bounds.sort_unstable();
        upper_bounds.dedup();

        for &start in lower_bounds.iter() {
            for &end in upper_bounds.iter().filter(|&&end| end >= start) {
                let num_inside = self
                    .variables
                    .iter()
                    .filter(|&&variable| is_inside(&*context, variable, start, end))
                    .count() as i64;
                let capacity = end - start + 1;

                if num_inside > capacity {
                    return Err(Inconsistency::Conflict);
                }
                if num_inside < capacity {
                    continue;
                }

                for &variable in self.variables.iter() {
                    if is_inside(&*context, variable, start, end) {
                        continue;
                    }
                    if (start..=end).contains(&(context.lower_bound(variable) as i64)) {
                        context.set_lower_bound(variable, end + 1)?;
                    }
                    if (start..=end).contains(&(context.upper_bound(variable) as i64)) {
                        context.set_upper_bound(variable, start - 1)?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn is_inside(context: &impl ReadDomains, variable: DomainId, start: i64, end: i64) -> bool {
    context.lower_bound(variable) as i64 >= start && context.upper_bound(variable) as i64 <= end
}

impl Propagator for AllDifferentPropagator {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        for &variable in self.variables.iter() {
            context.register(variable, DomainEvents::BOUNDS);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        self.remove_fixed_values(&mut context)?;
        self.propagate_hall_intervals(&mut context)
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        let mut seen: HashSet<i32> = HashSet::default();
        let mut all_fixed = true;

        for &variable in self.variables.iter() {
            match context.fixed_value(variable) {
                Some(value) => {
                    if !seen.insert(value) {
                        return Entailment::Disentailed;
                    }
                }
                None => all_fixed = false,
            }
        }

        if all_fixed {
            Entailment::Entailed
        } else {
            Entailment::Undecided
        }
    }
}
