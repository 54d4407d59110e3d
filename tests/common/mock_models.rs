//! Mock physical models for testing
//!
//! Both models have a known steady state, which makes them useful for
//! checking the solvers independently of the control forcing.

#![allow(dead_code)]

use adrs_rs::physics::{AdrsCoefficients, Grid, PhysicalModel};
use nalgebra::DVector;

// =================================================================================================
// Zero forcing
// =================================================================================================

/// F ≡ 0: with homogeneous boundaries the steady state is T ≡ 0
pub struct ZeroSource {
    pub coefficients: AdrsCoefficients,
}

impl ZeroSource {
    pub fn new() -> Self {
        Self {
            coefficients: AdrsCoefficients::default(),
        }
    }
}

impl PhysicalModel for ZeroSource {
    fn coefficients(&self) -> AdrsCoefficients {
        self.coefficients
    }

    fn source(&self, grid: &Grid, _time: f64) -> DVector<f64> {
        grid.zeros()
    }

    fn name(&self) -> &str {
        "Zero source"
    }
}

// =================================================================================================
// Uniform forcing, pure reaction
// =================================================================================================

/// F = f on interior nodes with K = V = 0: steady state T = f/λ inside
pub struct UniformSource {
    pub value: f64,
    pub reaction: f64,
}

impl UniformSource {
    pub fn new(value: f64, reaction: f64) -> Self {
        Self { value, reaction }
    }

    /// Steady interior value
    pub fn steady_value(&self) -> f64 {
        self.value / self.reaction
    }
}

impl PhysicalModel for UniformSource {
    fn coefficients(&self) -> AdrsCoefficients {
        AdrsCoefficients::new(0.0, 0.0, self.reaction)
    }

    fn source(&self, grid: &Grid, _time: f64) -> DVector<f64> {
        let mut forcing = grid.zeros();
        for j in grid.interior() {
            forcing[j] = self.value;
        }
        forcing
    }

    fn name(&self) -> &str {
        "Uniform source"
    }
}
