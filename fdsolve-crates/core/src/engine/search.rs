use std::fmt::Debug;
use std::time::Instant;

use log::debug;
use log::trace;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::DomainId;
use super::DomainStore;
use super::Predicate;
use super::PropagationEngine;
use super::SolverStatistics;
use crate::basic_types::EmptyDomain;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::InputOrder;
use crate::branching::Brancher;
use crate::branching::IndependentVariableValueBrancher;
use crate::branching::SelectionContext;
use crate::fdsolve_assert_advanced;
use crate::fdsolve_assert_moderate;
use crate::termination::TerminationCondition;

/// What a call to [`DepthFirstSearch::next_solution`] ended with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchResult {
    /// Every domain is fixed and every propagator is entailed; the domains hold the solution.
    Solution,
    /// The search tree has been fully explored.
    Exhausted,
    /// The termination condition triggered before the tree was exhausted.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Initial,
    AtSolution,
    Exhausted,
    Stopped,
}

/// A node of the search tree.
#[derive(Clone, Copy, Debug)]
struct ChoicePoint {
    /// The predicate which was applied when the node was entered.
    decision: Predicate,
    /// The checkpoint of the domains before `decision` was applied.
    checkpoint: usize,
    /// Whether the negation of `decision` still has to be explored.
    has_alternative: bool,
}

/// A resumable depth-first search with binary branching.
///
/// Every decision `p` opens a choice point; once the subtree below `p` is exhausted, the search
/// backtracks to the checkpoint before `p` and continues with `!p`. After a solution has been
/// reported, asking for the next one treats that leaf as a failure, which makes the search
/// enumerate every solution exactly once.
pub(crate) struct DepthFirstSearch {
    brancher: Box<dyn Brancher>,
    /// Assigns the variables the brancher does not cover, so that every leaf is total.
    fallback: IndependentVariableValueBrancher<DomainId, InputOrder, InDomainMin>,
    random: SmallRng,
    choice_points: Vec<ChoicePoint>,
    root_checkpoint: usize,
    state: SearchState,
    statistics: SolverStatistics,
}

impl Debug for DepthFirstSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthFirstSearch")
            .field("brancher", &self.brancher)
            .field("choice_points", &self.choice_points)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DepthFirstSearch {
    pub(crate) fn new(brancher: Box<dyn Brancher>, domains: &DomainStore, seed: u64) -> Self {
        let all_domains = domains.get_domains().collect::<Vec<_>>();
        DepthFirstSearch {
            brancher,
            fallback: IndependentVariableValueBrancher::new(
                InputOrder::new(&all_domains),
                InDomainMin,
            ),
            random: SmallRng::seed_from_u64(seed),
            choice_points: Vec::new(),
            root_checkpoint: 0,
            state: SearchState::Initial,
            statistics: SolverStatistics::default(),
        }
    }

    pub(crate) fn statistics(&self) -> SolverStatistics {
        self.statistics
    }

    pub(crate) fn statistics_mut(&mut self) -> &mut SolverStatistics {
        &mut self.statistics
    }

    /// The number of open choice points.
    pub(crate) fn depth(&self) -> usize {
        self.choice_points.len()
    }

    /// Continues the search until it reaches the next solution or the end of the search tree, or
    /// until `termination` triggers.
    pub(crate) fn next_solution(
        &mut self,
        domains: &mut DomainStore,
        engine: &mut PropagationEngine,
        termination: &mut dyn TerminationCondition,
    ) -> SearchResult {
        let started_at = Instant::now();
        let propagator_calls = engine.num_propagator_calls();

        let result = self.search(domains, engine, termination);

        self.statistics.num_propagator_calls += engine.num_propagator_calls() - propagator_calls;
        self.statistics.time_spent_in_search_ms += started_at.elapsed().as_millis();
        result
    }

    /// Reverts every change the search made to the domains.
    pub(crate) fn restore(&mut self, domains: &mut DomainStore, engine: &mut PropagationEngine) {
        if self.state == SearchState::Initial {
            return;
        }

        domains.synchronise(self.root_checkpoint);
        engine.notify_backtrack();
        self.choice_points.clear();
        if self.state == SearchState::AtSolution {
            self.state = SearchState::Exhausted;
        }
    }

    fn search(
        &mut self,
        domains: &mut DomainStore,
        engine: &mut PropagationEngine,
        termination: &mut dyn TerminationCondition,
    ) -> SearchResult {
        match self.state {
            SearchState::Exhausted => return SearchResult::Exhausted,
            SearchState::Stopped => return SearchResult::Stopped,
            SearchState::Initial => {
                self.root_checkpoint = domains.get_checkpoint();
                domains.new_checkpoint();
                engine.enqueue_all();
            }
            SearchState::AtSolution => {
                // The previous solution is rejected so the search moves on to the next leaf.
                if !self.backtrack(domains, engine) {
                    return self.exhausted();
                }
            }
        }

        loop {
            if termination.should_stop() {
                debug!(
                    "Search stopped by the termination condition at depth {}",
                    self.depth()
                );
                self.state = SearchState::Stopped;
                return SearchResult::Stopped;
            }

            if engine.propagate(domains).is_err() {
                self.statistics.num_failures += 1;
                if !self.backtrack(domains, engine) {
                    return self.exhausted();
                }
                continue;
            }

            if let Some(decision) = self.next_decision(domains, engine) {
                termination.decision_has_been_made();
                if self.decide(decision, domains).is_err() {
                    self.statistics.num_failures += 1;
                    if !self.backtrack(domains, engine) {
                        return self.exhausted();
                    }
                }
                continue;
            }

            if let Some(propagator) = engine.find_non_entailed(domains) {
                warn!(
                    "{} ({propagator}) is not satisfied by a total assignment; rejecting the leaf",
                    engine.propagator_name(propagator)
                );
                self.statistics.num_failures += 1;
                if !self.backtrack(domains, engine) {
                    return self.exhausted();
                }
                continue;
            }

            fdsolve_assert_advanced!(domains
                .get_domains()
                .all(|domain| domains.is_fixed(domain)));
            self.statistics.num_solutions += 1;
            self.state = SearchState::AtSolution;
            debug!("Found a solution at depth {}", self.depth());
            return SearchResult::Solution;
        }
    }

    fn next_decision(
        &mut self,
        domains: &DomainStore,
        engine: &PropagationEngine,
    ) -> Option<Predicate> {
        let mut context = SelectionContext::new(domains, engine.watch_lists(), &mut self.random);

        if let Some(decision) = self.brancher.next_decision(&mut context) {
            return Some(decision);
        }
        self.fallback.next_decision(&mut context)
    }

    fn decide(
        &mut self,
        decision: Predicate,
        domains: &mut DomainStore,
    ) -> Result<(), EmptyDomain> {
        fdsolve_assert_moderate!(
            !decision.is_satisfied(domains),
            "the decision {decision} does not shrink any domain"
        );
        fdsolve_assert_moderate!(!domains.is_fixed(decision.get_domain()));

        self.statistics.num_decisions += 1;

        let checkpoint = domains.get_checkpoint();
        domains.new_checkpoint();
        self.choice_points.push(ChoicePoint {
            decision,
            checkpoint,
            has_alternative: true,
        });
        self.statistics.peak_depth = self.statistics.peak_depth.max(self.depth() as u64);

        trace!("Decision {decision} at depth {}", self.depth());
        decision.apply(domains)
    }

    /// Undoes choice points until one with an unexplored alternative is found and applies that
    /// alternative; returns `false` when the search tree is exhausted.
    fn backtrack(&mut self, domains: &mut DomainStore, engine: &mut PropagationEngine) -> bool {
        while let Some(choice_point) = self.choice_points.pop() {
            domains.synchronise(choice_point.checkpoint);
            engine.notify_backtrack();

            if !choice_point.has_alternative {
                continue;
            }

            let alternative = choice_point.decision.negate();
            domains.new_checkpoint();
            self.choice_points.push(ChoicePoint {
                decision: alternative,
                checkpoint: choice_point.checkpoint,
                has_alternative: false,
            });

            trace!("Alternative {alternative} at depth {}", self.depth());
            if alternative.apply(domains).is_ok() {
                return true;
            }
            self.statistics.num_failures += 1;
        }

        false
    }

    fn exhausted(&mut self) -> SearchResult {
        debug!(
            "Search tree exhausted after {} decisions",
            self.statistics.num_decisions
        );
        self.state = SearchState::Exhausted;
        SearchResult::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::value_selection::InDomainMax;
    use crate::propagators::AllDifferentPropagator;
    use crate::propagators::LinearEqualPropagator;
    use crate::propagators::Term;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    fn search_over(domains: &DomainStore, variables: &[DomainId]) -> DepthFirstSearch {
        let brancher = Box::new(IndependentVariableValueBrancher::new(
            InputOrder::new(variables),
            InDomainMin,
        ));
        DepthFirstSearch::new(brancher, domains, 0)
    }

    fn collect_solutions(
        search: &mut DepthFirstSearch,
        domains: &mut DomainStore,
        engine: &mut PropagationEngine,
        variables: &[DomainId],
    ) -> Vec<Vec<i32>> {
        let mut solutions = Vec::new();
        while search.next_solution(domains, engine, &mut Indefinite) == SearchResult::Solution {
            solutions.push(
                variables
                    .iter()
                    .map(|&variable| domains.lower_bound(variable))
                    .collect(),
            );
        }
        solutions
    }

    #[test]
    fn enumerates_every_assignment_without_constraints() {
        let (mut domains, variables) = DomainStore::create_for_testing(&[(0, 1), (0, 2)]);
        let mut engine = PropagationEngine::default();
        let mut search = search_over(&domains, &variables);

        let solutions = collect_solutions(&mut search, &mut domains, &mut engine, &variables);

        assert_eq!(
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ],
            solutions
        );
    }

    #[test]
    fn all_different_permutations() {
        let (mut domains, variables) = DomainStore::create_for_testing(&[(0, 2), (0, 2), (0, 2)]);
        let mut engine = PropagationEngine::default();
        let _ = engine.add_propagator(Box::new(AllDifferentPropagator::new(
            variables.clone().into(),
        )));
        let mut search = search_over(&domains, &variables);

        let solutions = collect_solutions(&mut search, &mut domains, &mut engine, &variables);

        assert_eq!(6, solutions.len());
        assert_eq!(vec![0, 1, 2], solutions[0]);
        assert_eq!(vec![2, 1, 0], solutions[5]);
    }

    #[test]
    fn restoring_reverts_the_domains() {
        let (mut domains, variables) = DomainStore::create_for_testing(&[(0, 5), (0, 5)]);
        let mut engine = PropagationEngine::default();
        let _ = engine.add_propagator(Box::new(LinearEqualPropagator::new(
            [Term::new(1, variables[0]), Term::new(1, variables[1])].into(),
            7,
        )));
        let mut search = search_over(&domains, &variables);

        assert_eq!(
            SearchResult::Solution,
            search.next_solution(&mut domains, &mut engine, &mut Indefinite)
        );
        assert_eq!(2, domains.lower_bound(variables[0]));

        search.restore(&mut domains, &mut engine);

        assert_eq!(
            (0, 5),
            (
                domains.lower_bound(variables[0]),
                domains.upper_bound(variables[0])
            )
        );
        assert_eq!(
            SearchResult::Exhausted,
            search.next_solution(&mut domains, &mut engine, &mut Indefinite)
        );
    }

    #[test]
    fn infeasible_root_exhausts_immediately() {
        let (mut domains, variables) = DomainStore::create_for_testing(&[(0, 0)]);
        let mut engine = PropagationEngine::default();
        let _ = engine.add_propagator(Box::new(LinearEqualPropagator::new(
            [Term::new(1, variables[0])].into(),
            1,
        )));
        let mut search = search_over(&domains, &variables);

        assert_eq!(
            SearchResult::Exhausted,
            search.next_solution(&mut domains, &mut engine, &mut Indefinite)
        );
        assert_eq!(0, search.statistics().num_decisions);
    }

    #[test]
    fn decision_budget_stops_the_search() {
        let (mut domains, variables) = DomainStore::create_for_testing(&[(0, 9), (0, 9)]);
        let mut engine = PropagationEngine::default();
        let mut search = search_over(&domains, &variables);
        let mut budget = DecisionBudget::new(1);

        assert_eq!(
            SearchResult::Stopped,
            search.next_solution(&mut domains, &mut engine, &mut budget)
        );
        assert_eq!(1, search.statistics().num_decisions);
        assert_eq!(
            SearchResult::Stopped,
            search.next_solution(&mut domains, &mut engine, &mut Indefinite)
        );
    }

    #[test]
    fn uncovered_variables_are_still_assigned() {
        let (mut domains, variables) = DomainStore::create_for_testing(&[(0, 3), (4, 6)]);
        let mut engine = PropagationEngine::default();
        let brancher = Box::new(IndependentVariableValueBrancher::new(
            InputOrder::new(&variables[..1]),
            InDomainMax,
        ));
        let mut search = DepthFirstSearch::new(brancher, &domains, 0);

        assert_eq!(
            SearchResult::Solution,
            search.next_solution(&mut domains, &mut engine, &mut Indefinite)
        );
        assert_eq!(Some(3), domains.fixed_value(variables[0]));
        assert_eq!(Some(4), domains.fixed_value(variables[1]));
    }
}
