//! Manufactured solutions for verification
//!
//! # Method of Manufactured Solutions
//!
//! Pick an exact profile u_ex, plug it into the equation and use whatever is
//! left over as the forcing:
//!
//! ```text
//! F = u_ex,t + V u_ex,x - K u_ex,xx + λ u_ex
//! ```
//!
//! The discrete solution driven by that F must then approach u_ex as the
//! grid is refined, which gives a quantitative check of the solver.
//!
//! Two profiles are provided:
//!
//! - [`GaussianManufactured`]: steady bump `exp(-10 (s - L/2)²)` with analytic
//!   derivatives, used with the forward-Euler upwind solver.
//! - [`OscillatingManufactured`]: time-periodic profile whose derivatives are
//!   taken with the same centered stencils as the multi-stage solver.

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::physics::operators::centered_derivatives;
use crate::physics::{AdrsCoefficients, Grid, PhysicalModel};
use crate::solver::{BoundaryCondition, DomainBoundaries};

// =================================================================================================
// Steady Gaussian bump
// =================================================================================================

/// Steady manufactured solution `u_ex(s) = exp(-10 (s - L/2)²)`
///
/// Default coefficients: v = 1, ν = 0.01, λ = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianManufactured {
    coefficients: AdrsCoefficients,
}

impl GaussianManufactured {
    /// Bump sharpness
    pub const SHARPNESS: f64 = 10.0;

    pub fn new(coefficients: AdrsCoefficients) -> Self {
        Self { coefficients }
    }

    /// Exact value at `s` on a domain of length `length`
    pub fn exact_at(length: f64, s: f64) -> f64 {
        let offset = s - 0.5 * length;
        (-Self::SHARPNESS * offset * offset).exp()
    }

    /// Dirichlet `u_ex(0)` on the left, zero gradient on the right
    pub fn boundaries(&self, grid: &Grid) -> DomainBoundaries {
        DomainBoundaries::new(
            BoundaryCondition::Dirichlet(Self::exact_at(grid.length(), 0.0)),
            BoundaryCondition::Neumann(0.0),
        )
    }
}

impl Default for GaussianManufactured {
    fn default() -> Self {
        Self::new(AdrsCoefficients::new(0.01, 1.0, 1.0))
    }
}

impl PhysicalModel for GaussianManufactured {
    fn coefficients(&self) -> AdrsCoefficients {
        self.coefficients
    }

    fn source(&self, grid: &Grid, _time: f64) -> DVector<f64> {
        let AdrsCoefficients {
            diffusion,
            velocity,
            reaction,
        } = self.coefficients;
        let center = 0.5 * grid.length();
        let k = Self::SHARPNESS;

        grid.map(|s| {
            let offset = s - center;
            let u = (-k * offset * offset).exp();
            let du = -2.0 * k * offset * u;
            let d2u = (4.0 * k * k * offset * offset - 2.0 * k) * u;
            velocity * du - diffusion * d2u + reaction * u
        })
    }

    fn exact_solution(&self, grid: &Grid, _time: f64) -> Option<DVector<f64>> {
        let length = grid.length();
        Some(grid.map(|s| Self::exact_at(length, s)))
    }

    fn name(&self) -> &str {
        "Steady Gaussian manufactured solution"
    }
}

// =================================================================================================
// Unsteady oscillating profile
// =================================================================================================

/// Time-periodic manufactured solution
///
/// ```text
/// g_j   = exp(-1000 ((j - N/3) / N)²)
/// v_j   = (g_j + exp(-10 g_j)) · sin(5 j π / N)       interior j, 0 on the boundary
/// T_ex  = sin(4πt) · v
/// ```
///
/// Default coefficients: K = 0.1, V = 1, λ = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatingManufactured {
    coefficients: AdrsCoefficients,
}

impl OscillatingManufactured {
    /// Angular frequency of the time modulation
    pub const OMEGA: f64 = 4.0 * PI;

    pub fn new(coefficients: AdrsCoefficients) -> Self {
        Self { coefficients }
    }

    /// Spatial shape v_j
    pub fn profile(grid: &Grid) -> DVector<f64> {
        let n = grid.points() as f64;
        let mut values = grid.zeros();
        for j in grid.interior() {
            let jf = j as f64;
            let s = (jf - n / 3.0) / n;
            let g = (-1000.0 * s * s).exp();
            values[j] = (g + (-10.0 * g).exp()) * (5.0 * jf * PI / n).sin();
        }
        values
    }

    /// Exact solution and its time derivative at `time`
    pub fn exact_with_rate(grid: &Grid, time: f64) -> (DVector<f64>, DVector<f64>) {
        let profile = Self::profile(grid);
        let value = &profile * (Self::OMEGA * time).sin();
        let rate = &profile * (Self::OMEGA * (Self::OMEGA * time).cos());
        (value, rate)
    }
}

impl Default for OscillatingManufactured {
    fn default() -> Self {
        Self::new(AdrsCoefficients::default())
    }
}

impl PhysicalModel for OscillatingManufactured {
    fn coefficients(&self) -> AdrsCoefficients {
        self.coefficients
    }

    fn source(&self, grid: &Grid, time: f64) -> DVector<f64> {
        let AdrsCoefficients {
            diffusion,
            velocity,
            reaction,
        } = self.coefficients;
        let (exact, rate) = Self::exact_with_rate(grid, time);
        let (gradient, curvature) = centered_derivatives(&exact, grid.step());

        let mut forcing = grid.zeros();
        for j in grid.interior() {
            forcing[j] = velocity * gradient[j] - diffusion * curvature[j]
                + reaction * exact[j]
                + rate[j];
        }
        forcing
    }

    fn is_time_dependent(&self) -> bool {
        true
    }

    fn exact_solution(&self, grid: &Grid, time: f64) -> Option<DVector<f64>> {
        Some(Self::exact_with_rate(grid, time).0)
    }

    fn name(&self) -> &str {
        "Oscillating manufactured solution"
    }

    fn description(&self) -> Option<&str> {
        Some("sin(4πt)-modulated profile with a steep Gaussian feature at N/3")
    }
}
