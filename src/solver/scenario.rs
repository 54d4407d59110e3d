//! Simulation scenario definition
//!
//! A scenario combines a physical model, the grid it lives on and the
//! boundary conditions.

use nalgebra::DVector;

use crate::error::Result;
use crate::physics::{Grid, PhysicalModel};
use crate::solver::boundary::DomainBoundaries;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equation)
/// - Grid (discretisation of [0, L])
/// - Boundary conditions
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use adrs_rs::models::GaussianControl;
/// use adrs_rs::physics::Grid;
/// use adrs_rs::solver::Scenario;
///
/// let grid = Grid::unit(30).unwrap();
/// let scenario = Scenario::new(Box::new(GaussianControl::new(vec![1.0])), grid);
///
/// assert!(scenario.validate().is_ok());
/// assert!(scenario.conditions.is_homogeneous());
/// ```
pub struct Scenario {
    /// Physical model (equation)
    pub model: Box<dyn PhysicalModel>,

    pub grid: Grid,

    /// Conditions at both ends
    pub conditions: DomainBoundaries,
}

impl Scenario {
    /// Create a scenario with homogeneous Dirichlet boundaries
    pub fn new(model: Box<dyn PhysicalModel>, grid: Grid) -> Self {
        Self {
            model,
            grid,
            conditions: DomainBoundaries::homogeneous(),
        }
    }

    pub fn with_boundaries(mut self, conditions: DomainBoundaries) -> Self {
        self.conditions = conditions;
        self
    }

    /// Verifying scenario content (model parameters and boundaries)
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.conditions.validate()
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }

    /// time dependant forcing
    pub fn is_time_dependent(&self) -> bool {
        self.model.is_time_dependent()
    }

    /// Model initial profile with the boundary values applied
    pub fn initial_field(&self) -> Result<DVector<f64>> {
        let mut field = self.model.setup_initial_state(&self.grid);
        self.grid.check_len("initial state", &field)?;
        self.conditions.apply(&mut field, self.grid.step());
        Ok(field)
    }

    /// Forcing at `time`, checked against the grid size
    pub fn source(&self, time: f64) -> Result<DVector<f64>> {
        let forcing = self.model.source(&self.grid, time);
        self.grid.check_len("source", &forcing)?;
        Ok(forcing)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("points", &self.grid.points())
            .field("length", &self.grid.length())
            .field("is time dependent", &self.is_time_dependent())
            .field("Boundaries / conditions", &self.conditions)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdrsError;
    use crate::physics::AdrsCoefficients;
    use crate::solver::boundary::BoundaryCondition;

    // Mocking a Physical model
    struct MockModel {
        points: usize,
    }

    impl PhysicalModel for MockModel {
        fn coefficients(&self) -> AdrsCoefficients {
            AdrsCoefficients::default()
        }

        fn source(&self, _grid: &Grid, _time: f64) -> DVector<f64> {
            DVector::zeros(self.points)
        }

        fn setup_initial_state(&self, _grid: &Grid) -> DVector<f64> {
            DVector::from_element(self.points, 1.0)
        }

        fn name(&self) -> &str {
            "MockModel"
        }
    }

    #[test]
    fn test_scenario_creation() {
        let grid = Grid::unit(10).unwrap();
        let scenario = Scenario::new(Box::new(MockModel { points: 10 }), grid);

        assert_eq!(scenario.get_model_name(), "MockModel");
        assert!(!scenario.is_time_dependent());
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_initial_field_gets_boundaries() {
        let grid = Grid::unit(5).unwrap();
        let scenario = Scenario::new(Box::new(MockModel { points: 5 }), grid).with_boundaries(
            DomainBoundaries::new(BoundaryCondition::Dirichlet(2.0), BoundaryCondition::Dirichlet(0.0)),
        );

        let field = scenario.initial_field().unwrap();
        assert_eq!(field.as_slice(), &[2.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_wrong_sized_model_rejected() {
        let grid = Grid::unit(5).unwrap();
        let scenario = Scenario::new(Box::new(MockModel { points: 4 }), grid);

        assert!(matches!(
            scenario.initial_field(),
            Err(AdrsError::DimensionMismatch { expected: 5, found: 4, .. })
        ));
        assert!(scenario.source(0.0).is_err());
    }

    #[test]
    fn test_debug_output() {
        let grid = Grid::unit(7).unwrap();
        let scenario = Scenario::new(Box::new(MockModel { points: 7 }), grid);
        let debug = format!("{:?}", scenario);

        assert!(debug.contains("MockModel"));
        assert!(debug.contains("points: 7"));
    }
}
