//! The propagators which implement the constraints of a model.
pub(crate) mod all_different;
pub(crate) mod arithmetic;
pub(crate) mod element;
pub(crate) mod global_cardinality;
pub(crate) mod negated;
pub(crate) mod reified;

pub(crate) use all_different::AllDifferentPropagator;
pub(crate) use arithmetic::*;
pub(crate) use element::ElementPropagator;
pub(crate) use global_cardinality::GlobalCardinalityPropagator;
pub(crate) use negated::NegatedPropagator;
pub(crate) use reified::ReifiedPropagator;
