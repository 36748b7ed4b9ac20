#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024
use std::collections::BTreeSet;

use fdsolve_core::constraints;
use fdsolve_core::LinearExpression;
use fdsolve_core::OptimisationDirection;
use fdsolve_core::Problem;
use fdsolve_core::ProblemState;
use fdsolve_core::RelationalOp;
use fdsolve_core::MAX_VALUE;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn all_different_over_three_values_has_six_permutations() {
    init_logging();
    let mut problem = Problem::new("permutations");
    let a = problem.variable("a", 0, 2).expect("valid domain");
    let b = problem.variable("b", 0, 2).expect("valid domain");
    let c = problem.variable("c", 0, 2).expect("valid domain");
    problem
        .post_all_different(&[a, b, c])
        .expect("valid constraint");

    let solutions = problem
        .solver()
        .find_all_solutions()
        .into_iter()
        .map(|solution| [solution.value(a), solution.value(b), solution.value(c)])
        .collect::<BTreeSet<_>>();

    let expected = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ]
    .into_iter()
    .collect::<BTreeSet<_>>();
    assert_eq!(expected, solutions);
}

#[test]
fn a_sum_has_one_solution_per_split() {
    init_logging();
    let mut problem = Problem::new("sum");
    let x = problem.variable("x", 0, 5).expect("valid domain");
    let y = problem.variable("y", 0, 5).expect("valid domain");
    let _ = problem
        .linear(x + y, RelationalOp::Eq, 5)
        .expect("valid constraint");

    let solutions = problem
        .solver()
        .find_all_solutions()
        .into_iter()
        .map(|solution| (solution.value(x), solution.value(y)))
        .collect::<Vec<_>>();

    assert_eq!(
        vec![(0, 5), (1, 4), (2, 3), (3, 2), (4, 1), (5, 0)],
        solutions
    );
}

#[test]
fn element_restricts_the_value_to_the_array() {
    init_logging();
    let mut problem = Problem::new("element");
    let index = problem.variable("idx", 0, 2).expect("valid domain");
    let value = problem.variable("val", -10, 10).expect("valid domain");

    problem
        .post_element(&[3, 7, 1], index, RelationalOp::Eq, value)
        .expect("valid constraint");
    assert_eq!(vec![1, 3, 7], value.values(&problem).collect::<Vec<_>>());

    constraints::equals(index, 1)
        .post(&mut problem)
        .expect("valid constraint");
    assert_eq!(Some(7), value.value(&problem));
}

#[test]
fn cardinalities_add_up_to_the_number_of_variables() {
    init_logging();
    let mut problem = Problem::new("gcc");
    let vars = problem.variable_array("v", 3, 0, 1).expect("valid domain");
    let counts = problem.variable_array("c", 2, 0, 3).expect("valid domain");
    problem
        .post_global_cardinality(&vars, &[0, 1], &counts)
        .expect("valid constraint");

    let solutions = problem.solver().find_all_solutions();

    assert_eq!(8, solutions.len());
    for solution in &solutions {
        assert_eq!(3, solution.value(counts[0]) + solution.value(counts[1]));
        let ones = vars
            .iter()
            .filter(|&&var| solution.value(var) == 1)
            .count();
        assert_eq!(ones as i32, solution.value(counts[1]));
    }

    constraints::equals(counts[0], 2)
        .post(&mut problem)
        .expect("valid constraint");
    assert_eq!(Some(1), counts[1].value(&problem));
}

#[test]
fn minimising_a_weighted_sum() {
    init_logging();
    let mut problem = Problem::new("cost");
    let x = problem.variable("x", 0, 4).expect("valid domain");
    let y = problem.variable("y", 0, 4).expect("valid domain");
    constraints::equals(x + y, 4)
        .post(&mut problem)
        .expect("valid constraint");
    let cost = problem.scal_prod(&[2, 3], &[x, y]).expect("owned variables");
    problem.register("cost", cost).expect("name is free");

    let optimum = problem
        .solver()
        .find_optimal_solution(OptimisationDirection::Minimise, cost)
        .expect("feasible");

    assert_eq!(4, optimum.value(x));
    assert_eq!(0, optimum.value(y));
    assert_eq!(Ok(8), optimum.value_by_name("cost"));
    assert_eq!(Some(8), optimum.objective_value());
}

#[test]
fn an_infeasible_problem_has_no_solution() {
    init_logging();
    let mut problem = Problem::new("infeasible");
    let x = problem.variable("x", 0, 0).expect("valid domain");

    constraints::equals(x, 1)
        .post(&mut problem)
        .expect("infeasibility is not a model error");

    let mut solver = problem.solver();
    assert!(solver.find_solution().is_none());
    assert!(solver.find_all_solutions().is_empty());
    assert!(solver
        .find_optimal_solution(OptimisationDirection::Maximise, x)
        .is_none());
}

#[test]
fn logical_combinations_are_enforced() {
    init_logging();
    let mut problem = Problem::new("logic");
    let x = problem.variable("x", 0, 3).expect("valid domain");
    let y = problem.variable("y", 0, 3).expect("valid domain");

    let constraint = constraints::equals(x, 0)
        .or(constraints::equals(y, 0))
        .and(constraints::greater_than(x, 1).implies(constraints::less_than(x, y)))
        .and(!constraints::equals(x, y));
    constraint
        .clone()
        .post(&mut problem)
        .expect("valid constraint");

    let solutions = problem.solver().find_all_solutions();

    let expected = (0..=3)
        .flat_map(|x| (0..=3).map(move |y| (x, y)))
        .filter(|&(x, y)| (x == 0 || y == 0) && (x <= 1 || x < y) && x != y)
        .collect::<Vec<_>>();
    let actual = solutions
        .iter()
        .map(|solution| (solution.value(x), solution.value(y)))
        .collect::<Vec<_>>();
    assert_eq!(expected, actual);
    assert!(solutions
        .iter()
        .all(|solution| constraint.is_satisfied(solution)));
}

#[test]
fn a_reified_constraint_counts_satisfied_conditions() {
    init_logging();
    let mut problem = Problem::new("reified");
    let vars = problem.variable_array("v", 3, 0, 2).expect("valid domain");
    let literals = vars
        .iter()
        .map(|&var| problem.as_bool(constraints::equals(var, 2)))
        .collect::<Result<Vec<_>, _>>()
        .expect("valid constraints");
    let twos = problem.sum(&literals).expect("owned variables");
    constraints::equals(twos, 2)
        .post(&mut problem)
        .expect("valid constraint");

    let solutions = problem.solver().find_all_solutions();

    // Choose the two variables equal to 2, the third one takes 0 or 1.
    assert_eq!(6, solutions.len());
    for solution in solutions {
        let count = vars
            .iter()
            .filter(|&&var| solution.value(var) == 2)
            .count();
        assert_eq!(2, count);
    }
}

#[test]
fn the_problem_can_be_solved_again_after_a_restore() {
    init_logging();
    let mut problem = Problem::new("restore");
    let vars = problem.variable_array("v", 3, 1, 3).expect("valid domain");
    problem.post_all_different(&vars).expect("valid constraint");

    let first = problem.solver().find_solution().expect("feasible");
    let all = problem.solver().find_all_solutions();
    let kept = problem
        .solver()
        .find_solution_with(ProblemState::DoNotRestore)
        .expect("feasible");

    assert_eq!(6, all.len());
    assert_eq!(first.value(vars[0]), kept.value(vars[0]));
    assert!(vars.iter().all(|&var| var.value(&problem).is_some()));
}

#[test]
fn the_iterator_stops_after_the_requested_number_of_solutions() {
    init_logging();
    let mut problem = Problem::new("iterator");
    let x = problem.variable("x", 0, 9).expect("valid domain");

    let mut solver = problem.solver_with_options(fdsolve_core::SolverOptions {
        max_solutions: Some(3),
        ..Default::default()
    });
    let first_three = solver.find_all_solutions();
    let lazily = solver
        .solution_iterator()
        .map(|solution| solution.value(x))
        .take(2)
        .collect::<Vec<_>>();

    assert_eq!(3, first_three.len());
    assert_eq!(vec![0, 1], lazily);
    assert_eq!(10, x.size(solver.problem()));
}

#[test]
fn large_weighted_sums_are_evaluated_exactly() {
    init_logging();
    let mut problem = Problem::new("large sums");
    let vars = problem
        .variable_array("v", 9, MAX_VALUE, MAX_VALUE)
        .expect("valid domain");
    let sum = LinearExpression::weighted_sum(&[i32::MAX; 9], &vars);

    let non_negative = constraints::greater_than_or_equals(sum.clone(), 0);
    non_negative
        .clone()
        .post(&mut problem)
        .expect("valid constraint");
    let solution = problem.solver().find_solution().expect("feasible");
    assert!(non_negative.is_satisfied(&solution));
    assert!(!constraints::less_than(sum.clone(), 0).is_satisfied(&solution));

    constraints::less_than(sum, 0)
        .post(&mut problem)
        .expect("infeasibility is not a model error");
    assert!(problem.solver().find_solution().is_none());
}

#[test]
#[should_panic(expected = "was created after solution #1 was found")]
fn values_of_variables_created_after_a_solution_are_not_available() {
    init_logging();
    let mut problem = Problem::new("late variable");
    let x = problem.variable("x", 0, 3).expect("valid domain");
    let solution = problem.solver().find_solution().expect("feasible");
    assert_eq!(Ok(solution.value(x)), solution.value_by_name("x"));

    let y = problem.plus_constant(x, 1).expect("owned variable");
    let _ = solution.value(y);
}
