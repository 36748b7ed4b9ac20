use crate::basic_types::PropagationStatus;
use crate::engine::DomainEvents;
use crate::engine::DomainId;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::ReadDomains;
use crate::propagation::RegistrationContext;

/// Domains with more values than this are only pruned on their bounds.
const MAX_DOMAIN_SIZE_FOR_HOLES: usize = 1 << 16;

/// Propagator for `value = array[index]` with a zero-based index.
///
/// Indices whose element cannot equal `value` are removed, `value` is restricted to the union of
/// the elements which remain reachable, and once the index is fixed the selected element and
/// `value` are made equal.
#[derive(Clone, Debug)]
pub(crate) struct ElementPropagator {
    array: Box<[DomainId]>,
    index: DomainId,
    value: DomainId,
}

impl ElementPropagator {
    pub(crate) fn new(array: Box<[DomainId]>, index: DomainId, value: DomainId) -> Self {
        ElementPropagator {
            array,
            index,
            value,
        }
    }

    fn element_at(&self, index: i32) -> Option<DomainId> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.array.get(index).copied())
    }

    fn supported_indices(&self, context: &impl ReadDomains) -> Vec<i32> {
        self.array
            .iter()
            .enumerate()
            .filter(|&(index, &element)| {
                context.contains(self.index, index as i64)
                    && intersects(context, element, self.value)
            })
            .map(|(index, _)| index as i32)
            .collect()
    }

    /// Makes the domains of `from` and `to` equal from the perspective of `to`.
    fn restrict_to(
        context: &mut PropagationContextMut<'_>,
        from: DomainId,
        to: DomainId,
    ) -> PropagationStatus {
        context.set_lower_bound(to, context.lower_bound(from) as i64)?;
        context.set_upper_bound(to, context.upper_bound(from) as i64)?;

        if context.size(to) <= MAX_DOMAIN_SIZE_FOR_HOLES {
            let unsupported = context
                .iterate_domain(to)
                .filter(|&value| !context.contains(from, value as i64))
                .collect::<Vec<_>>();
            for value in unsupported {
                context.remove(to, value as i64)?;
            }
        }

        Ok(())
    }
}

/// Whether the domains of `a` and `b` share a value.
fn intersects(context: &impl ReadDomains, a: DomainId, b: DomainId) -> bool {
    if context.upper_bound(a) < context.lower_bound(b)
        || context.upper_bound(b) < context.lower_bound(a)
    {
        return false;
    }

    let (smaller, larger) = if context.size(a) <= context.size(b) {
        (a, b)
    } else {
        (b, a)
    };
    context
        .iterate_domain(smaller)
        .any(|value| context.contains(larger, value as i64))
}

impl Propagator for ElementPropagator {
    fn name(&self) -> &str {
        "Element"
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        context.register(self.index, DomainEvents::ANY);
        context.register(self.value, DomainEvents::ANY);
        for &element in self.array.iter() {
            context.register(element, DomainEvents::ANY);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        context.set_lower_bound(self.index, 0)?;
        context.set_upper_bound(self.index, self.array.len() as i64 - 1)?;

        let supported = self.supported_indices(&context);
        let unsupported = context
            .iterate_domain(self.index)
            .filter(|index| !supported.contains(index))
            .collect::<Vec<_>>();
        for index in unsupported {
            context.remove(self.index, index as i64)?;
        }

        let elements = supported
            .iter()
            .filter_map(|&index| self.element_at(index))
            .collect::<Vec<_>>();
        let lower_bound = elements
            .iter()
            .map(|&element| context.lower_bound(element))
            .min();
        let upper_bound = elements
            .iter()
            .map(|&element| context.upper_bound(element))
            .max();
        if let (Some(lower_bound), Some(upper_bound)) = (lower_bound, upper_bound) {
            context.set_lower_bound(self.value, lower_bound as i64)?;
            context.set_upper_bound(self.value, upper_bound as i64)?;
        }

        if context.size(self.value) <= MAX_DOMAIN_SIZE_FOR_HOLES {
            let unsupported = context
                .iterate_domain(self.value)
                .filter(|&value| {
                    !elements
                        .iter()
                        .any(|&element| context.contains(element, value as i64))
                })
                .collect::<Vec<_>>();
            for value in unsupported {
                context.remove(self.value, value as i64)?;
            }
        }

        if let Some(element) = context
            .fixed_value(self.index)
            .and_then(|index| self.element_at(index))
        {
            Self::restrict_to(&mut context, self.value, element)?;
            Self::restrict_to(&mut context, element, self.value)?;
        }

        Ok(())
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        if self.supported_indices(&context).is_empty() {
            return Entailment::Disentailed;
        }

        let selected = context
            .fixed_value(self.index)
            .and_then(|index| self.element_at(index))
            .and_then(|element| context.fixed_value(element));
        match (selected, context.fixed_value(self.value)) {
            (Some(element), Some(value)) if element == value => Entailment::Entailed,
            (Some(_), Some(_)) => Entailment::Disentailed,
            _ => Entailment::Undecided,
        }
    }
}
