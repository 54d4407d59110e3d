//! Helper functions for integration tests

#![allow(dead_code)]

use adrs_rs::models::GaussianControl;
use adrs_rs::physics::Grid;
use adrs_rs::solver::Scenario;
use nalgebra::DVector;

/// Assert that two fields agree node by node within `tolerance`
pub fn assert_fields_close(
    field1: &DVector<f64>,
    field2: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(field1.len(), field2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in field1.iter().zip(field2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Node {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Root-mean-square difference of two fields
pub fn compute_l2_error(field1: &DVector<f64>, field2: &DVector<f64>) -> f64 {
    if field1.is_empty() {
        return 0.0;
    }
    ((field1 - field2).norm_squared() / field1.len() as f64).sqrt()
}

/// Control-forcing scenario on the unit interval
pub fn create_control_scenario(points: usize, control: &[f64]) -> Scenario {
    let grid = Grid::unit(points).expect("valid grid size");
    Scenario::new(Box::new(GaussianControl::new(control.to_vec())), grid)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
