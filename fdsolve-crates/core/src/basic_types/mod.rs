//! Basic types shared by the model, the engine and the search.
mod model_error;
mod propagation_status;
mod relational_op;
mod solution;
mod trail;
mod variable_names;

pub use model_error::ModelError;
pub(crate) use propagation_status::EmptyDomain;
pub(crate) use propagation_status::Inconsistency;
pub(crate) use propagation_status::PropagationStatus;
pub use relational_op::RelationalOp;
pub use solution::Solution;
pub(crate) use trail::Trail;
pub(crate) use variable_names::VariableNames;
