//! Inverse design: normal equations and black-box minimization
//!
//! The targets are built from a known control so the optimum is reachable
//! and its cost is (numerically) zero.

use adrs_rs::AdrsError;
use adrs_rs::inverse::{
    ControlProblem, InverseDesign, MinimizeOptions, NelderMead, solve_normal_equations,
};
use adrs_rs::solver::SolverConfiguration;
use nalgebra::{DMatrix, DVector};

mod common;
use common::assert_fields_close;

const POINTS: usize = 30;

fn converged_problem() -> ControlProblem {
    ControlProblem::default().with_config(SolverConfiguration::iterative(1e-10, 50_000))
}

#[test]
fn test_linear_design_reaches_six_basis_target() {
    let problem = converged_problem();
    let target = problem
        .forward(POINTS, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .unwrap()
        .field;
    let design = InverseDesign::new(problem, 6);

    let outcome = design.solve_linear(POINTS, &target).unwrap();

    // The Gram matrix is ill-conditioned: the control itself is not
    // recovered digit for digit, the field is
    assert!(outcome.cost < 1e-8, "cost = {:e}", outcome.cost);
    assert_fields_close(&outcome.field, &target, 1e-4, "optimal field");
}

#[test]
fn test_linear_design_beats_zero_control() {
    let problem = converged_problem();
    let target = DVector::from_fn(POINTS, |j, _| {
        let x = j as f64 / (POINTS - 1) as f64;
        0.2 * (std::f64::consts::PI * x).sin()
    });
    let baseline = problem.solve(POINTS, &[0.0; 4], &target).unwrap().cost;

    let outcome = InverseDesign::new(problem, 4)
        .solve_linear(POINTS, &target)
        .unwrap();

    assert!(outcome.cost < baseline);
}

#[test]
fn test_unit_responses_are_independent_solves() {
    let design = InverseDesign::new(converged_problem(), 3);
    let responses = design.unit_responses(POINTS).unwrap();

    assert_eq!(responses.len(), 3);
    for (c, response) in responses.iter().enumerate() {
        let single = {
            let mut control = vec![0.0; 3];
            control[c] = 1.0;
            design.problem.forward(POINTS, &control).unwrap().field
        };
        assert_eq!(response, &single);
    }
}

#[test]
fn test_minimizer_lowers_cost() {
    let problem = ControlProblem::default();
    let target = problem.forward(20, &[2.0, 1.0]).unwrap().field;
    let design = InverseDesign::new(problem, 2);

    let x0 = [0.5, 0.5];
    let start = design.problem.solve(20, &x0, &target).unwrap().cost;

    let minimizer = NelderMead::new(MinimizeOptions {
        max_iter: 300,
        ..MinimizeOptions::default()
    });
    let (outcome, design_outcome) = design.minimize(20, &target, &minimizer, &x0).unwrap();

    assert!(outcome.fun < 1e-3 * start, "{} vs {start}", outcome.fun);
    assert_eq!(design_outcome.control.len(), 2);
    assert!((design_outcome.cost - outcome.fun).abs() < 1e-12);
}

#[test]
fn test_singular_normal_matrix() {
    let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0]);
    let b = DVector::from_vec(vec![1.0, 2.0, 3.0]);

    let error = solve_normal_equations(&a, &b).unwrap_err();
    assert!(matches!(error, AdrsError::SingularSystem { size: 3 }));
}

#[test]
fn test_target_mismatch_in_design() {
    let design = InverseDesign::new(ControlProblem::default(), 2);
    let target = DVector::zeros(POINTS + 1);

    assert!(matches!(
        design.solve_linear(POINTS, &target),
        Err(AdrsError::DimensionMismatch { .. })
    ));
}
