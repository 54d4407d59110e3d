//! Integration tests: physics module + solver module + forward entry point
//!
//! These tests verify that models, scenarios and solvers work correctly
//! together, and that the forward entry point honours its contract.

use adrs_rs::AdrsError;
use adrs_rs::inverse::{self, ControlProblem};
use adrs_rs::solver::{
    ConvergenceStatus, DomainBoundaries, ForwardEulerSolver, MultiStageSolver, Scenario, Solver,
    SolverConfiguration,
};
use adrs_rs::physics::Grid;
use nalgebra::DVector;

mod common;
use common::test_helpers::relative_error;
use common::{UniformSource, ZeroSource, assert_fields_close, create_control_scenario};

fn converged_problem() -> ControlProblem {
    ControlProblem::default().with_config(SolverConfiguration::iterative(1e-10, 50_000))
}

// =================================================================================================
// Fixed point and linearity
// =================================================================================================

#[test]
fn test_zero_control_is_fixed_point() {
    for points in [3, 10, 30, 64] {
        let target = DVector::zeros(points);
        let (cost, field) = inverse::solve(points, &[0.0; 6], &target).unwrap();

        assert_eq!(cost, 0.0, "N = {points}");
        assert!(field.iter().all(|&v| v == 0.0), "N = {points}");
    }
}

#[test]
fn test_superposition_of_controls() {
    let problem = converged_problem();
    let c1 = [1.0, 0.0, 2.0];
    let c2 = [0.0, -1.5, 0.5];
    let sum: Vec<f64> = c1.iter().zip(&c2).map(|(a, b)| a + b).collect();

    let t1 = problem.forward(40, &c1).unwrap();
    let t2 = problem.forward(40, &c2).unwrap();
    let t12 = problem.forward(40, &sum).unwrap();

    assert!(t1.is_converged() && t2.is_converged() && t12.is_converged());
    assert_fields_close(&t12.field, &(&t1.field + &t2.field), 1e-8, "superposition");
}

#[test]
fn test_response_scales_with_control() {
    let problem = converged_problem();
    let single = problem.forward(25, &[0.0, 1.0]).unwrap().field;
    let triple = problem.forward(25, &[0.0, 3.0]).unwrap().field;

    assert_fields_close(&triple, &(single * 3.0), 1e-8, "scaling");
}

// =================================================================================================
// Invariants
// =================================================================================================

#[test]
fn test_boundaries_stay_exactly_zero() {
    let scenario = create_control_scenario(30, &[5.0, -3.0, 2.0, 1.0]);
    // tolerance too small to reach: every iteration runs
    let config = SolverConfiguration::iterative(1e-300, 500);

    let result = MultiStageSolver::new().solve(&scenario, &config).unwrap();

    assert_eq!(result.status, ConvergenceStatus::MaxIterationsReached);
    assert_eq!(result.iterations(), 500);
    assert_eq!(result.field[0], 0.0);
    assert_eq!(result.field[29], 0.0);
}

#[test]
fn test_forward_solve_is_idempotent() {
    let control = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let target = DVector::from_element(30, 0.1);

    let (cost_a, field_a) = inverse::solve(30, &control, &target).unwrap();
    let (cost_b, field_b) = inverse::solve(30, &control, &target).unwrap();

    assert_eq!(cost_a.to_bits(), cost_b.to_bits());
    assert_eq!(field_a, field_b);
}

#[test]
fn test_residual_history_decreases() {
    let result = ControlProblem::default()
        .forward(30, &[1.0, 2.0, 3.0])
        .unwrap();
    let history = result.normalized_history();

    assert!(result.residual_history.iter().all(|&r| r >= 0.0));
    assert_eq!(history[0], 1.0);
    assert!(history[history.len() - 1] < 0.1 * history[0]);

    // Non-increasing in trend: mean over successive quarters of the run
    let window = (history.len() / 4).max(1);
    let means: Vec<f64> = history
        .chunks(window)
        .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
        .collect();
    assert!(means.len() >= 2);
    for pair in means.windows(2) {
        assert!(pair[1] <= pair[0], "windowed means {means:?}");
    }
}

// =================================================================================================
// Reference scenario
// =================================================================================================

#[test]
fn test_six_basis_bump() {
    let control = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let problem = ControlProblem::default();

    let result = problem.forward(30, &control).unwrap();
    let field = &result.field;

    // Positive forcing gives a positive bump with zero ends
    assert_eq!(field[0], 0.0);
    assert_eq!(field[29], 0.0);
    assert!((1..29).all(|j| field[j] > 0.0));

    let (peak, _) = field
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |(best, max), (j, &v)| if v > max { (j, v) } else { (best, max) });
    assert!(peak > 0 && peak < 29);

    // The field is its own best target
    let solution = problem.solve(30, &control, field).unwrap();
    assert!(solution.cost.abs() < 1e-14);
}

#[test]
fn test_uniform_source_reaches_reaction_balance() {
    let model = UniformSource::new(2.0, 4.0);
    let expected = model.steady_value();
    let scenario = Scenario::new(Box::new(model), Grid::unit(12).unwrap());
    let config = SolverConfiguration::iterative(1e-12, 10_000);

    for result in [
        MultiStageSolver::new().solve(&scenario, &config).unwrap(),
        ForwardEulerSolver::new().solve(&scenario, &config).unwrap(),
    ] {
        assert!(result.is_converged());
        for j in 1..11 {
            assert!(relative_error(result.field[j], expected) < 1e-9);
        }
        assert_eq!(result.field[0], 0.0);
    }
}

#[test]
fn test_dirichlet_boundaries_with_zero_source() {
    let scenario = Scenario::new(Box::new(ZeroSource::new()), Grid::unit(21).unwrap())
        .with_boundaries(DomainBoundaries::dirichlet(1.0, 0.5));
    let config = SolverConfiguration::iterative(1e-8, 100_000);

    let result = ForwardEulerSolver::new().solve(&scenario, &config).unwrap();

    assert!(result.is_converged());
    assert_eq!(result.field[0], 1.0);
    assert_eq!(result.field[20], 0.5);
    assert!(result.field.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

// =================================================================================================
// Error contract
// =================================================================================================

#[test]
fn test_too_few_points_rejected() {
    for points in [0, 1, 2] {
        let target = DVector::zeros(points);
        let error = inverse::solve(points, &[1.0], &target).unwrap_err();
        assert!(
            matches!(error, AdrsError::InvalidGridSize { points: p, .. } if p == points),
            "N = {points}: {error}"
        );
    }
}

#[test]
fn test_target_length_mismatch() {
    let target = DVector::zeros(29);
    let error = inverse::solve(30, &[1.0], &target).unwrap_err();

    assert!(matches!(
        error,
        AdrsError::DimensionMismatch {
            expected: 30,
            found: 29,
            ..
        }
    ));
}

#[test]
fn test_non_finite_control_rejected() {
    let target = DVector::zeros(10);
    let error = inverse::solve(10, &[f64::INFINITY], &target).unwrap_err();
    assert!(matches!(error, AdrsError::InvalidParameter { name: "control", .. }));
}
