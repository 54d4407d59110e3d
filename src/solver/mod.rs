//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a numerical method to the equation provided by
//! a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (coefficients, forcing)
//!    - Grid
//!    - Boundary conditions
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Stopping rule (steady relaxation or time horizon)
//!    - Stage count, safety factor, log cadence
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the final field and the residual history
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`, `SimulationResult`
//! - **`boundary`**: `BoundaryCondition`, `DomainBoundaries`
//! - **`scenario`**: `Scenario`
//! - **`stability`**: stability-limited time steps
//! - **Solver implementations**:
//!   - `MultiStageSolver`: centered stencils, R relaxation stages, adaptive dt
//!   - `ForwardEulerSolver`: upwind advection, fixed dt
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐   ┌──────┐
//! │  Physical Model │   │ Grid │
//! └────────┬────────┘   └──┬───┘
//!          └───────┬───────┘
//!          ┌───────▼────────┐
//!          │ Scenario       │ ← WHAT to solve (+ boundaries)
//!          └───────┬────────┘
//!       ┌──────────▼───────────┐
//!       │ Solver Configuration │ ← HOW to solve
//!       └──────────┬───────────┘
//!          ┌───────▼────────┐
//!          │ Solver         │ ← The method
//!          └───────┬────────┘
//!       ┌──────────▼───────────┐
//!       │ Simulation Result    │ ← field + residual history
//!       └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every solver returns [`Result`](crate::error::Result). Invalid input and
//! NaN/Inf in the field are errors; hitting the iteration cap is not, it is
//! reported by [`ConvergenceStatus::MaxIterationsReached`].

// =================================================================================================
// Module Declarations
// =================================================================================================

mod boundary;
mod methods;
mod scenario;
pub mod stability;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    ConvergenceStatus, DEFAULT_REPORT_EVERY, DEFAULT_STAGES, SimulationResult, Solver,
    SolverConfiguration, SolverType,
};

pub use boundary::{BoundaryCondition, DomainBoundaries};
pub use scenario::Scenario;

pub use methods::{ForwardEulerSolver, MultiStageSolver, StageWeights, multistage_update};

// =================================================================================================
// Helper Functions
// =================================================================================================

use nalgebra::DVector;

use crate::error::{AdrsError, Result};

/// Validate a field for numerical issues
///
/// NaN arises from 0/0 or Inf - Inf, Inf from overflow; either one means the
/// march has become unstable. The first non-finite node is reported.
pub(crate) fn validate_field(field: &DVector<f64>, iteration: usize) -> Result<()> {
    match field.iter().position(|v| !v.is_finite()) {
        Some(j) if field[j].is_nan() => Err(AdrsError::NumericalInstability {
            iteration,
            reason: format!("NaN detected at node {j}; try a smaller CFL safety factor"),
        }),
        Some(j) => Err(AdrsError::NumericalInstability {
            iteration,
            reason: format!("Infinity detected at node {j}; the march overflowed"),
        }),
        None => Ok(()),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_field_passes() {
        let field = DVector::from_vec(vec![0.0, 1.0, -2.0]);
        assert!(validate_field(&field, 3).is_ok());
    }

    #[test]
    fn test_nan_detected() {
        let field = DVector::from_vec(vec![0.0, f64::NAN, 0.0]);
        let error = validate_field(&field, 7).unwrap_err();

        assert!(matches!(error, AdrsError::NumericalInstability { iteration: 7, .. }));
        assert!(error.to_string().contains("NaN"));
    }

    #[test]
    fn test_infinity_detected() {
        let field = DVector::from_vec(vec![0.0, 0.0, f64::NEG_INFINITY]);
        let error = validate_field(&field, 2).unwrap_err();
        assert!(error.to_string().contains("Infinity"));
    }

    #[test]
    fn test_first_non_finite_node_reported() {
        // overflow at node 1, Inf - Inf already produced a NaN further right
        let field = DVector::from_vec(vec![0.0, f64::INFINITY, f64::NAN]);
        let error = validate_field(&field, 4).unwrap_err();

        assert!(matches!(error, AdrsError::NumericalInstability { iteration: 4, .. }));
        assert!(error.to_string().contains("Infinity detected at node 1"));
    }
}
