use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::RegistrationContext;

/// Enforces that the constraint of the wrapped propagator does not hold.
///
/// This is only used for constraints without a dedicated negation (the global constraints); it
/// fails as soon as the wrapped constraint becomes entailed and never prunes.
#[derive(Debug)]
pub(crate) struct NegatedPropagator {
    inner: Box<dyn Propagator>,
}

impl NegatedPropagator {
    pub(crate) fn new(inner: Box<dyn Propagator>) -> Self {
        NegatedPropagator { inner }
    }
}

impl Propagator for NegatedPropagator {
    fn name(&self) -> &str {
        "Negated"
    }

    fn register(&self, context: &mut RegistrationContext<'_>) {
        self.inner.register(context);
    }

    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatus {
        match self.inner.entailment(context.as_readonly()) {
            Entailment::Entailed => Err(Inconsistency::Conflict),
            Entailment::Disentailed | Entailment::Undecided => Ok(()),
        }
    }

    fn entailment(&self, context: PropagationContext<'_>) -> Entailment {
        self.inner.entailment(context).negate()
    }
}
