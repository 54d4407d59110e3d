//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `AdrsCoefficients`: the constant coefficients K, V, λ of the equation
//! - `PhysicalModel`: trait for every model solved by the crate

use nalgebra::DVector;

use crate::error::{AdrsError, Result};
use crate::physics::grid::Grid;

// =================================================================================================
// Equation coefficients
// =================================================================================================

/// Constant coefficients of the ADRS equation
///
/// ```text
/// u_t = -V u_x + K u_xx - λ u + F
/// ```
///
/// # Example
///
/// ```rust
/// use adrs_rs::physics::AdrsCoefficients;
///
/// let coefficients = AdrsCoefficients::new(0.1, 1.0, 1.0);
/// // K + 0.5 h |V|
/// assert!((coefficients.effective_viscosity(0.2) - 0.2).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdrsCoefficients {
    /// Diffusion coefficient K (≥ 0)
    pub diffusion: f64,

    /// Advection velocity V (any sign)
    pub velocity: f64,

    /// Linear reaction rate λ (≥ 0)
    pub reaction: f64,
}

impl AdrsCoefficients {
    pub fn new(diffusion: f64, velocity: f64, reaction: f64) -> Self {
        Self {
            diffusion,
            velocity,
            reaction,
        }
    }

    /// Effective diffusivity `K + 0.5·h·|V|`
    ///
    /// The extra term is the artificial viscosity that stabilises centered
    /// advection on coarse grids.
    pub fn effective_viscosity(&self, step: f64) -> f64 {
        self.diffusion + 0.5 * step * self.velocity.abs()
    }

    /// Reject negative diffusion or reaction and non-finite values
    pub fn validate(&self) -> Result<()> {
        if !(self.diffusion.is_finite() && self.diffusion >= 0.0) {
            return Err(AdrsError::parameter(
                "diffusion",
                format!("must be finite and non-negative, got {}", self.diffusion),
            ));
        }
        if !self.velocity.is_finite() {
            return Err(AdrsError::parameter(
                "velocity",
                format!("must be finite, got {}", self.velocity),
            ));
        }
        if !(self.reaction.is_finite() && self.reaction >= 0.0) {
            return Err(AdrsError::parameter(
                "reaction",
                format!("must be finite and non-negative, got {}", self.reaction),
            ));
        }
        Ok(())
    }
}

impl Default for AdrsCoefficients {
    /// K = 0.1, V = 1, λ = 1
    fn default() -> Self {
        Self::new(0.1, 1.0, 1.0)
    }
}

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
///
/// A model describes WHAT is solved: the coefficients of the equation, the
/// forcing term and the initial profile. It does NOT march anything in time
/// (that's the Solver's job).
///
/// # Mandatory Point
///
/// Models must be `Send + Sync` so that independent solves can run on
/// separate threads.
pub trait PhysicalModel: Send + Sync {
    /// Coefficients K, V, λ
    fn coefficients(&self) -> AdrsCoefficients;

    /// Forcing term F evaluated on every node of `grid` at `time`
    ///
    /// Steady models ignore `time`.
    fn source(&self, grid: &Grid, time: f64) -> DVector<f64>;

    /// Whether `source` changes with time
    ///
    /// Solvers evaluate a steady source once per solve.
    fn is_time_dependent(&self) -> bool {
        false
    }

    /// Initial field (zero by default)
    fn setup_initial_state(&self, grid: &Grid) -> DVector<f64> {
        grid.zeros()
    }

    /// Exact solution, when known
    fn exact_solution(&self, _grid: &Grid, _time: f64) -> Option<DVector<f64>> {
        None
    }

    /// Check the model parameters before a solve
    fn validate(&self) -> Result<()> {
        self.coefficients().validate()
    }

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct ConstantSource(f64);

    impl PhysicalModel for ConstantSource {
        fn coefficients(&self) -> AdrsCoefficients {
            AdrsCoefficients::default()
        }

        fn source(&self, grid: &Grid, _time: f64) -> DVector<f64> {
            DVector::from_element(grid.points(), self.0)
        }

        fn name(&self) -> &str {
            "Constant"
        }
    }

    #[test]
    fn test_default_coefficients() {
        let coefficients = AdrsCoefficients::default();
        assert_eq!(coefficients.diffusion, 0.1);
        assert_eq!(coefficients.velocity, 1.0);
        assert_eq!(coefficients.reaction, 1.0);
        assert!(coefficients.validate().is_ok());
    }

    #[test]
    fn test_effective_viscosity_uses_speed() {
        let forward = AdrsCoefficients::new(0.1, 2.0, 0.0);
        let backward = AdrsCoefficients::new(0.1, -2.0, 0.0);

        assert_relative_eq!(forward.effective_viscosity(0.1), 0.2, epsilon = 1e-15);
        assert_relative_eq!(
            forward.effective_viscosity(0.1),
            backward.effective_viscosity(0.1)
        );
    }

    #[test]
    fn test_invalid_coefficients() {
        assert!(AdrsCoefficients::new(-0.1, 1.0, 1.0).validate().is_err());
        assert!(AdrsCoefficients::new(0.1, f64::NAN, 1.0).validate().is_err());
        assert!(AdrsCoefficients::new(0.1, 1.0, -1.0).validate().is_err());
        assert!(AdrsCoefficients::new(0.0, -3.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_trait_defaults() {
        let model = ConstantSource(2.0);
        let grid = Grid::unit(5).unwrap();

        assert!(!model.is_time_dependent());
        assert_eq!(model.setup_initial_state(&grid), grid.zeros());
        assert!(model.exact_solution(&grid, 0.0).is_none());
        assert!(model.description().is_none());
        assert_eq!(model.source(&grid, 3.0)[2], 2.0);
    }
}
