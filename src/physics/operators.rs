//! Finite-difference operators on a uniform grid
//!
//! # Stencils
//!
//! ```text
//! centered first derivative   (T[j+1] - T[j-1]) / (2h)
//! centered second derivative  (T[j-1] - 2T[j] + T[j+1]) / h²
//! upwind first derivative     (T[j] - T[j-1]) / h        if V ≥ 0
//!                             (T[j+1] - T[j]) / h        if V < 0
//! ```
//!
//! Point stencils (`centered_gradient`, `centered_curvature`) are only defined
//! on interior nodes. Whole-field operators return a vector with one value
//! per node; how the two edge values are filled is stated on each function.

use nalgebra::DVector;

/// Centered first derivative at interior node `j`
#[inline]
pub fn centered_gradient(field: &DVector<f64>, j: usize, step: f64) -> f64 {
    (field[j + 1] - field[j - 1]) / (2.0 * step)
}

/// Centered second derivative at interior node `j`
#[inline]
pub fn centered_curvature(field: &DVector<f64>, j: usize, step: f64) -> f64 {
    (field[j - 1] - 2.0 * field[j] + field[j + 1]) / (step * step)
}

/// Centered first and second derivatives on interior nodes
///
/// Edge entries are left at zero.
pub fn centered_derivatives(field: &DVector<f64>, step: f64) -> (DVector<f64>, DVector<f64>) {
    let n = field.len();
    let mut gradient = DVector::zeros(n);
    let mut curvature = DVector::zeros(n);

    for j in 1..n.saturating_sub(1) {
        gradient[j] = centered_gradient(field, j, step);
        curvature[j] = centered_curvature(field, j, step);
    }

    (gradient, curvature)
}

/// Upwind first derivative on every node
///
/// The one-sided difference follows the sign of `velocity`; the node left
/// without an upwind neighbour copies the value of its neighbour.
pub fn upwind_gradient(field: &DVector<f64>, step: f64, velocity: f64) -> DVector<f64> {
    let n = field.len();
    let mut gradient = DVector::zeros(n);
    if n < 2 {
        return gradient;
    }

    if velocity >= 0.0 {
        for j in 1..n {
            gradient[j] = (field[j] - field[j - 1]) / step;
        }
        gradient[0] = gradient[1];
    } else {
        for j in 0..n - 1 {
            gradient[j] = (field[j + 1] - field[j]) / step;
        }
        gradient[n - 1] = gradient[n - 2];
    }

    gradient
}

/// Centered second derivative on every node
///
/// Edge values copy the adjacent interior value.
pub fn laplacian(field: &DVector<f64>, step: f64) -> DVector<f64> {
    let n = field.len();
    let mut result = DVector::zeros(n);
    if n < 3 {
        return result;
    }

    for j in 1..n - 1 {
        result[j] = centered_curvature(field, j, step);
    }
    result[0] = result[1];
    result[n - 1] = result[n - 2];

    result
}

/// Largest absolute entry (0 for an empty vector)
pub fn max_abs(values: &DVector<f64>) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
