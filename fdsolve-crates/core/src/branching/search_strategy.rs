use crate::api::ProblemId;
use crate::basic_types::ModelError;
use crate::branching::value_selection::InDomainMax;
use crate::branching::value_selection::InDomainMiddle;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::InDomainRandom;
use crate::branching::value_selection::InDomainSplit;
use crate::branching::value_selection::ReverseInDomainSplit;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::AntiFirstFail;
use crate::branching::variable_selection::FirstFail;
use crate::branching::variable_selection::InputOrder;
use crate::branching::variable_selection::Largest;
use crate::branching::variable_selection::MinDomainMinValue;
use crate::branching::variable_selection::MostConstrained;
use crate::branching::variable_selection::RandomSelector;
use crate::branching::variable_selection::Smallest;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::IndependentVariableValueBrancher;
use crate::engine::DomainId;
use crate::Var;
#[cfg(doc)]
use crate::Solver;

/// The order in which unfixed variables are branched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VarSelectorType {
    /// The first unfixed variable in the order of the strategy.
    #[default]
    InputOrder,
    /// The variable with the fewest values left ("first fail").
    MinDomain,
    /// The variable with the most values left.
    MaxDomain,
    /// The variable with the smallest lower bound.
    MinValue,
    /// The variable with the largest upper bound.
    MaxValue,
    /// The variable with the fewest values left, ties broken by the smallest lower bound.
    MinDomainMinValue,
    /// The variable with the fewest values left, ties broken by the number of constraints on it.
    MostConstrained,
    /// A uniformly random unfixed variable.
    Random,
}

/// How the domain of the selected variable is split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueSelectorType {
    /// `x = min`, otherwise `x != min`.
    #[default]
    Min,
    /// `x = max`, otherwise `x != max`.
    Max,
    /// `x = v` for the value `v` closest to the middle of the bounds, otherwise `x != v`.
    Middle,
    /// `x = v` for a random value `v` in the domain, otherwise `x != v`.
    Random,
    /// `x <= mid`, otherwise `x > mid`.
    SplitLower,
    /// `x > mid`, otherwise `x <= mid`.
    SplitUpper,
}

/// Determines which variables the [`Solver`] branches on and in which way.
///
/// By default the search branches on all variables created through the problem (not on the
/// auxiliary variables introduced for expressions and reifications) in creation order, trying the
/// smallest value first. Variables which are not covered by the strategy but are still unfixed
/// once the strategy is exhausted are assigned in creation order, so every solution assigns every
/// variable.
#[derive(Debug, Clone)]
pub struct SearchStrategy {
    problem: ProblemId,
    vars: Option<Vec<Var>>,
    var_selector: VarSelectorType,
    value_selector: ValueSelectorType,
}

impl SearchStrategy {
    pub(crate) fn new(problem: ProblemId) -> Self {
        SearchStrategy {
            problem,
            vars: None,
            var_selector: VarSelectorType::default(),
            value_selector: ValueSelectorType::default(),
        }
    }

    /// Restricts branching to `vars`, in this order.
    pub fn set_vars(&mut self, vars: &[Var]) -> Result<(), ModelError> {
        if vars.is_empty() {
            return Err(ModelError::InvalidStrategy(
                "the strategy requires at least one variable".to_owned(),
            ));
        }
        if let Some(foreign) = vars.iter().find(|var| var.problem != self.problem) {
            return Err(ModelError::InvalidStrategy(format!(
                "the variable {foreign} does not belong to this problem"
            )));
        }

        self.vars = Some(vars.to_vec());
        Ok(())
    }

    pub fn vars(&self) -> Option<&[Var]> {
        self.vars.as_deref()
    }

    pub fn set_var_selector_type(&mut self, var_selector: VarSelectorType) {
        self.var_selector = var_selector;
    }

    pub fn var_selector_type(&self) -> VarSelectorType {
        self.var_selector
    }

    pub fn set_value_selector_type(&mut self, value_selector: ValueSelectorType) {
        self.value_selector = value_selector;
    }

    pub fn value_selector_type(&self) -> ValueSelectorType {
        self.value_selector
    }

    /// Creates the brancher for this strategy; `default_vars` are used when no variables were set.
    pub(crate) fn create_brancher(&self, default_vars: &[Var], seed: u64) -> Box<dyn Brancher> {
        let variables = self
            .vars
            .as_deref()
            .unwrap_or(default_vars)
            .iter()
            .map(|var| var.domain)
            .collect::<Vec<_>>();

        let variable_selector: Box<dyn VariableSelector<DomainId>> = match self.var_selector {
            VarSelectorType::InputOrder => Box::new(InputOrder::new(&variables)),
            VarSelectorType::MinDomain => Box::new(FirstFail::new(&variables)),
            VarSelectorType::MaxDomain => Box::new(AntiFirstFail::new(&variables)),
            VarSelectorType::MinValue => Box::new(Smallest::new(&variables)),
            VarSelectorType::MaxValue => Box::new(Largest::new(&variables)),
            VarSelectorType::MinDomainMinValue => Box::new(MinDomainMinValue::new(&variables)),
            VarSelectorType::MostConstrained => Box::new(MostConstrained::new(&variables)),
            VarSelectorType::Random => Box::new(RandomSelector::new(&variables, seed)),
        };
        let value_selector: Box<dyn ValueSelector<DomainId>> = match self.value_selector {
            ValueSelectorType::Min => Box::new(InDomainMin),
            ValueSelectorType::Max => Box::new(InDomainMax),
            ValueSelectorType::Middle => Box::new(InDomainMiddle),
            ValueSelectorType::Random => Box::new(InDomainRandom),
            ValueSelectorType::SplitLower => Box::new(InDomainSplit),
            ValueSelectorType::SplitUpper => Box::new(ReverseInDomainSplit),
        };

        Box::new(IndependentVariableValueBrancher::new(
            variable_selector,
            value_selector,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Problem;

    #[test]
    fn foreign_variables_are_rejected() {
        let mut problem = Problem::new("strategy");
        let mut other = Problem::new("other");
        let x = other.variable("x", 0, 3).expect("valid domain");
        let _ = problem.variable("y", 0, 3).expect("valid domain");

        let mut strategy = SearchStrategy::new(problem.id());

        assert!(matches!(
            strategy.set_vars(&[x]),
            Err(ModelError::InvalidStrategy(_))
        ));
        assert!(strategy.vars().is_none());
    }

    #[test]
    fn empty_variable_lists_are_rejected() {
        let problem = Problem::new("strategy");
        let mut strategy = SearchStrategy::new(problem.id());

        assert!(matches!(
            strategy.set_vars(&[]),
            Err(ModelError::InvalidStrategy(_))
        ));
    }
}
