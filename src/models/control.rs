//! Gaussian-basis control forcing
//!
//! # Mathematical Background
//!
//! The forcing is a linear combination of `nbc` Gaussian bumps whose centres
//! sit at L/1, L/2, …, L/nbc:
//!
//! ```text
//! F(x_j) = Σ_c  x[c] · exp(-100 · (x_j - L/(c+1))²)      interior nodes
//! F(x_0) = F(x_{N-1}) = 0
//! ```
//!
//! The steady response of the ADRS operator is linear in F, hence linear in
//! the control vector `x`; the inverse-design driver relies on that.

use nalgebra::DVector;

use crate::error::{AdrsError, Result};
use crate::physics::{AdrsCoefficients, Grid, PhysicalModel};

/// Sharpness of every Gaussian bump
pub const CONTROL_SHARPNESS: f64 = 100.0;

/// Forcing assembled from a control vector
///
/// # Example
///
/// ```rust
/// use adrs_rs::models::GaussianControl;
/// use adrs_rs::physics::{Grid, PhysicalModel};
///
/// let grid = Grid::unit(30).unwrap();
/// let model = GaussianControl::new(vec![1.0, 2.0]);
/// let forcing = model.source(&grid, 0.0);
///
/// assert_eq!(forcing[0], 0.0);
/// assert_eq!(forcing[29], 0.0);
/// assert!(forcing[15] > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianControl {
    coefficients: AdrsCoefficients,
    amplitudes: Vec<f64>,
}

impl GaussianControl {
    /// Control forcing with the default coefficients K = 0.1, V = 1, λ = 1
    pub fn new(amplitudes: Vec<f64>) -> Self {
        Self {
            coefficients: AdrsCoefficients::default(),
            amplitudes,
        }
    }

    /// `count` basis functions, only basis `index` switched on with unit weight
    pub fn unit(count: usize, index: usize) -> Self {
        let mut amplitudes = vec![0.0; count];
        if let Some(weight) = amplitudes.get_mut(index) {
            *weight = 1.0;
        }
        Self::new(amplitudes)
    }

    pub fn with_coefficients(mut self, coefficients: AdrsCoefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Number of basis functions
    pub fn basis_count(&self) -> usize {
        self.amplitudes.len()
    }

    /// Centre of basis `c` on a domain of length `length`
    pub fn basis_center(length: f64, c: usize) -> f64 {
        length / (c + 1) as f64
    }

    /// Basis function `c` sampled on the interior nodes of `grid`
    pub fn basis(grid: &Grid, c: usize) -> DVector<f64> {
        let center = Self::basis_center(grid.length(), c);
        let mut values = grid.zeros();
        for j in grid.interior() {
            let offset = grid.x(j) - center;
            values[j] = (-CONTROL_SHARPNESS * offset * offset).exp();
        }
        values
    }
}

impl PhysicalModel for GaussianControl {
    fn coefficients(&self) -> AdrsCoefficients {
        self.coefficients
    }

    fn source(&self, grid: &Grid, _time: f64) -> DVector<f64> {
        let mut forcing = grid.zeros();
        for (c, &weight) in self.amplitudes.iter().enumerate() {
            if weight != 0.0 {
                forcing.axpy(weight, &Self::basis(grid, c), 1.0);
            }
        }
        forcing
    }

    fn validate(&self) -> Result<()> {
        self.coefficients.validate()?;
        if let Some((c, value)) = self
            .amplitudes
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(AdrsError::parameter(
                "control",
                format!("component {c} is not finite ({value})"),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Gaussian control"
    }

    fn description(&self) -> Option<&str> {
        Some("ADRS forcing built from Gaussian bumps centred at L/(c+1)")
    }
}
