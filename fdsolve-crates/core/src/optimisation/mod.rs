//! Contains structures related to optimisation.
pub(crate) mod linear_sat_unsat;

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}
