//! Stability-limited time steps
//!
//! # Mathematical Background
//!
//! Explicit schemes are stable only when the time step resolves the fastest
//! process on the grid. Each physical term contributes a rate:
//!
//! ```text
//! advection   |V| / h
//! diffusion   2K / h²
//! reaction    λ          (multi-stage step: max|F| stands in for it)
//! ```
//!
//! The time step is a safety factor times the inverse of their sum.

use crate::physics::AdrsCoefficients;

/// Time step of the multi-stage solver
///
/// ```text
/// dt = safety · h² / (|V|·h + 2K + max|F|·h²)
/// ```
///
/// With a zero forcing the last term vanishes.
///
/// # Example
///
/// ```rust
/// use adrs_rs::physics::AdrsCoefficients;
/// use adrs_rs::solver::stability::multistage_time_step;
///
/// let coefficients = AdrsCoefficients::new(0.1, 1.0, 1.0);
/// let dt = multistage_time_step(0.1, &coefficients, 0.0, 1.0);
/// // 0.01 / (0.1 + 0.2)
/// assert!((dt - 0.01 / 0.3).abs() < 1e-15);
/// ```
pub fn multistage_time_step(
    step: f64,
    coefficients: &AdrsCoefficients,
    max_abs_source: f64,
    safety: f64,
) -> f64 {
    let h2 = step * step;
    let denominator =
        coefficients.velocity.abs() * step + 2.0 * coefficients.diffusion + max_abs_source * h2;
    safety * h2 / denominator
}

/// Fixed time step of the forward-Euler upwind solver
///
/// ```text
/// dt = safety / (|V|/h + 2K/h² + λ)
/// ```
pub fn explicit_euler_time_step(step: f64, coefficients: &AdrsCoefficients, safety: f64) -> f64 {
    let rate = coefficients.velocity.abs() / step
        + 2.0 * coefficients.diffusion / (step * step)
        + coefficients.reaction;
    safety / rate
}
