//! adrs-rs: explicit solvers for the 1D advection-diffusion-reaction equation
//!
//! Solves
//!
//! ```text
//! ∂T/∂t + V ∂T/∂x = K ∂²T/∂x² - λ T + F(x, t)        on [0, L]
//! ```
//!
//! to steady state or up to a time horizon, and builds numerical experiments
//! on top of the solvers: inverse design of the forcing, mesh-refinement
//! studies, quadrature and ODE error studies.
//!
//! # Architecture
//!
//! adrs-rs is built on the separation of physics and numerics:
//!
//! - Physical models define the equation (what to solve): coefficients and
//!   forcing, see [`physics`] and [`models`]
//! - Numerical solvers provide methods (how to solve), see [`solver`]
//! - Drivers call the solvers repeatedly, see [`inverse`] and [`analysis`]
//!
//! # Quick Start
//!
//! ```rust
//! use adrs_rs::models::GaussianControl;
//! use adrs_rs::physics::Grid;
//! use adrs_rs::solver::{MultiStageSolver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> adrs_rs::Result<()> {
//! // 1. Model and grid
//! let model = GaussianControl::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! let scenario = Scenario::new(Box::new(model), Grid::unit(30)?);
//!
//! // 2. Stopping rule: res ≤ 1e-4 · res0 or 1000 iterations
//! let config = SolverConfiguration::iterative(1e-4, 1000);
//!
//! // 3. Run
//! let result = MultiStageSolver::new().solve(&scenario, &config)?;
//!
//! println!("{} after {} iterations", result.status, result.iterations());
//! assert_eq!(result.field[0], 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grid, coefficients, model trait, finite-difference operators
//! - [`models`]: control forcing and manufactured solutions
//! - [`solver`]: multi-stage and forward-Euler solvers
//! - [`inverse`]: forward entry point and inverse design
//! - [`analysis`]: norms, refinement studies, quadrature, Euler ODE study
//! - [`output`]: CSV export
//!
//! # Features
//!
//! - `parallel`: computes the independent unit responses of the inverse
//!   design on the rayon thread pool

pub mod error;

// Core modules
pub mod physics;

pub mod models;
pub mod solver;

// Drivers and experiments
pub mod analysis;
pub mod inverse;

pub mod output;

pub use error::{AdrsError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use adrs_rs::prelude::*;
    //!
    //! let grid = Grid::unit(10).unwrap();
    //! assert_eq!(grid.points(), 10);
    //! ```
    pub use crate::error::{AdrsError, Result};
    pub use crate::inverse::{ControlProblem, InverseDesign, Minimizer, NelderMead};
    pub use crate::models::{GaussianControl, GaussianManufactured, OscillatingManufactured};
    pub use crate::physics::{AdrsCoefficients, Grid, PhysicalModel};
    pub use crate::solver::{
        BoundaryCondition, ConvergenceStatus, DomainBoundaries, ForwardEulerSolver,
        MultiStageSolver, Scenario, SimulationResult, Solver, SolverConfiguration, SolverType,
    };
}
