//! Discrete norms and observed convergence order

use nalgebra::DVector;

use crate::error::{AdrsError, Result};

/// Discrete L2 norm `sqrt(h · Σ v_j²)`
pub fn l2_norm(values: &DVector<f64>, step: f64) -> f64 {
    (step * values.norm_squared()).sqrt()
}

/// H1 seminorm of the error, `‖(u - u_ex)'‖_L2`
///
/// Derivatives use centered differences inside and are copied from the
/// neighbouring interior node at both ends.
pub fn h1_seminorm(field: &DVector<f64>, exact: &DVector<f64>, step: f64) -> Result<f64> {
    let n = field.len();
    if exact.len() != n {
        return Err(AdrsError::mismatch("exact solution", n, exact.len()));
    }
    if n < 3 {
        return Err(AdrsError::InvalidGridSize {
            points: n,
            minimum: 3,
        });
    }

    let error = field - exact;
    let mut derivative = DVector::zeros(n);
    for j in 1..n - 1 {
        derivative[j] = (error[j + 1] - error[j - 1]) / (2.0 * step);
    }
    derivative[0] = derivative[1];
    derivative[n - 1] = derivative[n - 2];

    Ok(l2_norm(&derivative, step))
}

/// `sqrt(h · Σ (u - u_ex)²) / N`, the error measure of the unsteady study
pub fn normalized_l2_error(field: &DVector<f64>, exact: &DVector<f64>, step: f64) -> Result<f64> {
    if exact.len() != field.len() {
        return Err(AdrsError::mismatch("exact solution", field.len(), exact.len()));
    }
    Ok(l2_norm(&(field - exact), step) / field.len() as f64)
}

/// Least-squares slope of `log(error)` against `log(h)`
///
/// # Example
///
/// ```rust
/// use adrs_rs::analysis::convergence_order;
///
/// let hs = [0.1, 0.05, 0.025];
/// let errors: Vec<f64> = hs.iter().map(|h| 3.0 * h * h).collect();
///
/// let order = convergence_order(&hs, &errors).unwrap();
/// assert!((order - 2.0).abs() < 1e-12);
/// ```
pub fn convergence_order(steps: &[f64], errors: &[f64]) -> Result<f64> {
    if steps.len() != errors.len() {
        return Err(AdrsError::mismatch("errors", steps.len(), errors.len()));
    }
    if steps.len() < 2 {
        return Err(AdrsError::parameter(
            "samples",
            "at least two refinement levels are needed",
        ));
    }
    if steps.iter().chain(errors).any(|&v| !(v.is_finite() && v > 0.0)) {
        return Err(AdrsError::parameter(
            "samples",
            "steps and errors must be positive and finite",
        ));
    }

    let xs: Vec<f64> = steps.iter().map(|h| h.ln()).collect();
    let ys: Vec<f64> = errors.iter().map(|e| e.ln()).collect();
    let count = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / count;
    let y_mean = ys.iter().sum::<f64>() / count;

    let (covariance, variance) = xs
        .iter()
        .zip(&ys)
        .fold((0.0, 0.0), |(cov, var), (x, y)| {
            (cov + (x - x_mean) * (y - y_mean), var + (x - x_mean).powi(2))
        });

    if variance == 0.0 {
        return Err(AdrsError::parameter("samples", "all steps are equal"));
    }
    Ok(covariance / variance)
}
