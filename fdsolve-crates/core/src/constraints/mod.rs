//! Defines the constraints which can be posted on a [`Problem`].
//!
//! A [`Constraint`] is a relation over variables. It is a plain value which does not touch the
//! problem until it is posted; constraints can therefore be combined freely with
//! [`Constraint::and`], [`Constraint::or`], [`Constraint::implies`] and negation before they are
//! posted or reified.
//!
//! # Example
//! ```
//! # use fdsolve_core::constraints;
//! # use fdsolve_core::Problem;
//! let mut problem = Problem::new("example");
//! let a = problem.variable("a", 0, 3).unwrap();
//! let b = problem.variable("b", 0, 3).unwrap();
//!
//! constraints::less_than(a, b)
//!     .or(constraints::equals(a, 3))
//!     .post(&mut problem)
//!     .unwrap();
//! ```
//!
//! In the problem, constraints are enforced through propagators; logical combinations are
//! decomposed into reified primitive constraints over auxiliary 0/1 variables.
mod all_different;
mod arithmetic;
mod boolean;
mod compile;
mod constraint;
mod element;
mod global_cardinality;
mod linear_expression;

pub use all_different::*;
pub use arithmetic::*;
pub use boolean::*;
pub(crate) use compile::enforce;
pub use constraint::Constraint;
pub(crate) use constraint::ConstraintKind;
pub use element::*;
pub use global_cardinality::*;
pub use linear_expression::LinearExpression;

#[cfg(doc)]
use crate::Problem;
