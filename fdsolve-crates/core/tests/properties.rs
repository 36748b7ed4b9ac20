#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024
use std::collections::BTreeSet;

use fdsolve_core::constraints;
use fdsolve_core::Constraint;
use fdsolve_core::LinearExpression;
use fdsolve_core::OptimisationDirection;
use fdsolve_core::Problem;
use fdsolve_core::RelationalOp;
use fdsolve_core::Var;
use fdsolve_core::VarSelectorType;
use proptest::collection::vec;
use proptest::prelude::*;

const NUM_VARIABLES: usize = 3;
const MAX: i32 = 3;

/// A constraint over the variables `x0, x1, x2` which can be evaluated without the solver.
#[derive(Clone, Debug)]
enum Model {
    Linear {
        coefficients: [i32; NUM_VARIABLES],
        op: RelationalOp,
        rhs: i32,
    },
    AllDifferent(Vec<usize>),
    Element {
        array: [i32; 3],
        index: usize,
        value: usize,
    },
    GlobalCardinality {
        scope: Vec<usize>,
        values: Vec<i32>,
        counts: Vec<usize>,
    },
    Times {
        a: usize,
        b: usize,
        product: usize,
    },
    And(Box<Model>, Box<Model>),
    Or(Box<Model>, Box<Model>),
    Implies(Box<Model>, Box<Model>),
    Not(Box<Model>),
    /// The 0/1 literal of `model` from [`Problem::as_bool`] is constrained to `expected`.
    Reified {
        model: Box<Model>,
        expected: bool,
    },
}

impl Model {
    fn holds(&self, assignment: &[i32]) -> bool {
        match self {
            Model::Linear {
                coefficients,
                op,
                rhs,
            } => {
                let lhs = coefficients
                    .iter()
                    .zip(assignment)
                    .map(|(&coefficient, &value)| coefficient as i64 * value as i64)
                    .sum::<i64>();
                op.holds(lhs, *rhs as i64)
            }
            Model::AllDifferent(scope) => {
                let values = scope
                    .iter()
                    .map(|&index| assignment[index])
                    .collect::<BTreeSet<_>>();
                values.len() == scope.len()
            }
            Model::Element {
                array,
                index,
                value,
            } => usize::try_from(assignment[*index])
                .ok()
                .and_then(|index| array.get(index))
                .is_some_and(|&element| element == assignment[*value]),
            Model::GlobalCardinality {
                scope,
                values,
                counts,
            } => values.iter().zip(counts).all(|(&value, &count)| {
                let occurrences = scope
                    .iter()
                    .filter(|&&index| assignment[index] == value)
                    .count();
                occurrences as i32 == assignment[count]
            }),
            Model::Times { a, b, product } => {
                assignment[*a] * assignment[*b] == assignment[*product]
            }
            Model::And(lhs, rhs) => lhs.holds(assignment) && rhs.holds(assignment),
            Model::Or(lhs, rhs) => lhs.holds(assignment) || rhs.holds(assignment),
            Model::Implies(lhs, rhs) => !lhs.holds(assignment) || rhs.holds(assignment),
            Model::Not(model) => !model.holds(assignment),
            Model::Reified { model, expected } => model.holds(assignment) == *expected,
        }
    }

    fn constraint(&self, problem: &mut Problem, vars: &[Var]) -> Constraint {
        match self {
            Model::Linear {
                coefficients,
                op,
                rhs,
            } => constraints::linear(
                LinearExpression::weighted_sum(coefficients, vars),
                *op,
                *rhs,
            ),
            Model::AllDifferent(scope) => constraints::all_different(
                &scope.iter().map(|&index| vars[index]).collect::<Vec<_>>(),
            ),
            Model::Element {
                array,
                index,
                value,
            } => {
                let array = array
                    .iter()
                    .map(|&element| problem.constant(element).expect("in range"))
                    .collect::<Vec<_>>();
                constraints::element(&array, vars[*index], vars[*value])
            }
            Model::GlobalCardinality {
                scope,
                values,
                counts,
            } => constraints::global_cardinality(
                &scope.iter().map(|&index| vars[index]).collect::<Vec<_>>(),
                values,
                &counts.iter().map(|&index| vars[index]).collect::<Vec<_>>(),
            ),
            Model::Times { a, b, product } => {
                constraints::times(vars[*a], vars[*b], vars[*product])
            }
            Model::And(lhs, rhs) => lhs
                .constraint(problem, vars)
                .and(rhs.constraint(problem, vars)),
            Model::Or(lhs, rhs) => lhs
                .constraint(problem, vars)
                .or(rhs.constraint(problem, vars)),
            Model::Implies(lhs, rhs) => lhs
                .constraint(problem, vars)
                .implies(rhs.constraint(problem, vars)),
            Model::Not(model) => !model.constraint(problem, vars),
            Model::Reified { model, expected } => {
                let constraint = model.constraint(problem, vars);
                let literal = problem.as_bool(constraint).expect("the constraint is valid");
                constraints::equals(literal, i32::from(*expected))
            }
        }
    }
}

fn relational_op() -> impl Strategy<Value = RelationalOp> {
    prop_oneof![
        Just(RelationalOp::Eq),
        Just(RelationalOp::Ne),
        Just(RelationalOp::Lt),
        Just(RelationalOp::Le),
        Just(RelationalOp::Gt),
        Just(RelationalOp::Ge),
    ]
}

fn primitive() -> impl Strategy<Value = Model> {
    let variable = 0..NUM_VARIABLES;
    prop_oneof![
        3 => ([-2..=2, -2..=2, -2..=2], relational_op(), -4..=6).prop_map(
            |(coefficients, op, rhs)| Model::Linear {
                coefficients,
                op,
                rhs,
            }
        ),
        1 => proptest::sample::subsequence((0..NUM_VARIABLES).collect::<Vec<_>>(), 2..=3)
            .prop_map(Model::AllDifferent),
        1 => ([0..=MAX, 0..=MAX, 0..=MAX], variable.clone(), variable.clone())
            .prop_filter("index and value differ", |(_, index, value)| index != value)
            .prop_map(|(array, index, value)| Model::Element {
                array,
                index,
                value,
            }),
        1 => (
            proptest::sample::subsequence((0..NUM_VARIABLES).collect::<Vec<_>>(), 1..=3),
            proptest::sample::subsequence((0..=MAX).collect::<Vec<_>>(), 1..=2),
            vec(variable.clone(), 2),
        )
            .prop_map(|(scope, values, counts)| Model::GlobalCardinality {
                counts: counts[..values.len()].to_vec(),
                scope,
                values,
            }),
        1 => (variable.clone(), variable.clone(), variable)
            .prop_map(|(a, b, product)| Model::Times { a, b, product }),
    ]
}

fn model() -> impl Strategy<Value = Model> {
    primitive().prop_recursive(2, 6, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(lhs, rhs)| Model::And(Box::new(lhs), Box::new(rhs))),
            (inner.clone(), inner.clone())
                .prop_map(|(lhs, rhs)| Model::Or(Box::new(lhs), Box::new(rhs))),
            (inner.clone(), inner.clone())
                .prop_map(|(lhs, rhs)| Model::Implies(Box::new(lhs), Box::new(rhs))),
            inner.clone().prop_map(|model| Model::Not(Box::new(model))),
            (inner, any::<bool>()).prop_map(|(model, expected)| Model::Reified {
                model: Box::new(model),
                expected,
            }),
        ]
    })
}

fn all_assignments() -> Vec<Vec<i32>> {
    (0..NUM_VARIABLES).fold(vec![vec![]], |assignments, _| {
        assignments
            .into_iter()
            .flat_map(|assignment| {
                (0..=MAX).map(move |value| {
                    let mut extended = assignment.clone();
                    extended.push(value);
                    extended
                })
            })
            .collect()
    })
}

fn build(models: &[Model]) -> (Problem, Vec<Var>, Vec<Constraint>) {
    let mut problem = Problem::new("random");
    let vars = problem
        .variable_array("x", NUM_VARIABLES, 0, MAX)
        .expect("valid domain");
    let constraints = models
        .iter()
        .map(|model| model.constraint(&mut problem, &vars))
        .collect::<Vec<_>>();
    for constraint in &constraints {
        problem
            .post(constraint.clone())
            .expect("the constraint is valid");
    }
    (problem, vars, constraints)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enumeration_matches_brute_force(models in vec(model(), 1..4)) {
        let expected = all_assignments()
            .into_iter()
            .filter(|assignment| models.iter().all(|model| model.holds(assignment)))
            .collect::<BTreeSet<_>>();

        let (mut problem, vars, constraints) = build(&models);
        let solutions = problem.solver().find_all_solutions();

        let actual = solutions
            .iter()
            .map(|solution| vars.iter().map(|&var| solution.value(var)).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        prop_assert_eq!(actual.len(), expected.len(), "duplicate or missing solutions");
        prop_assert_eq!(actual.into_iter().collect::<BTreeSet<_>>(), expected);

        for solution in &solutions {
            prop_assert!(constraints.iter().all(|constraint| constraint.is_satisfied(solution)));
        }
    }

    #[test]
    fn optimisation_matches_brute_force(
        models in vec(model(), 0..3),
        weights in [-3..=3, -3..=3, -3..=3],
        maximise in any::<bool>(),
        var_selector in prop_oneof![
            Just(VarSelectorType::InputOrder),
            Just(VarSelectorType::MinDomain),
            Just(VarSelectorType::MostConstrained),
        ],
    ) {
        let objective_values = all_assignments()
            .into_iter()
            .filter(|assignment| models.iter().all(|model| model.holds(assignment)))
            .map(|assignment| {
                weights
                    .iter()
                    .zip(&assignment)
                    .map(|(&weight, &value)| weight * value)
                    .sum::<i32>()
            })
            .collect::<Vec<_>>();
        let expected = if maximise {
            objective_values.iter().max().copied()
        } else {
            objective_values.iter().min().copied()
        };

        let (mut problem, vars, _) = build(&models);
        let objective = problem.scal_prod(&weights, &vars).expect("owned variables");
        let direction = if maximise {
            OptimisationDirection::Maximise
        } else {
            OptimisationDirection::Minimise
        };

        let mut solver = problem.solver();
        solver.search_strategy_mut().set_var_selector_type(var_selector);
        let optimum = solver.find_optimal_solution(direction, objective);

        prop_assert_eq!(expected, optimum.and_then(|solution| solution.objective_value()));
    }

    #[test]
    fn posting_only_shrinks_domains(models in vec(model(), 1..5)) {
        let mut problem = Problem::new("monotone");
        let vars = problem
            .variable_array("x", NUM_VARIABLES, 0, MAX)
            .expect("valid domain");

        for model in &models {
            let before = vars
                .iter()
                .map(|&var| var.values(&problem).collect::<BTreeSet<_>>())
                .collect::<Vec<_>>();

            let constraint = model.constraint(&mut problem, &vars);
            problem.post(constraint).expect("the constraint is valid");
            if problem.is_infeasible() {
                break;
            }

            for (&var, before) in vars.iter().zip(&before) {
                let after = var.values(&problem).collect::<BTreeSet<_>>();
                prop_assert!(after.is_subset(before));
            }
        }
    }
}
