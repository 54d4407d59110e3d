//! Physical models
//!
//! This module provides the building blocks shared by every model:
//! the uniform grid, the equation coefficients, the `PhysicalModel` trait
//! and the finite-difference operators.
//!
//! # Core Concepts
//!
//! - **Grid**: uniform 1D mesh over [0, L]
//! - **AdrsCoefficients**: diffusion K, velocity V, reaction λ
//! - **PhysicalModel**: coefficients + forcing + initial profile
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equation** (physics)
//! - The solver provides the **method** to march it (numerics)
//!
//! # Implementing a New Physical Model
//!
//! ```rust
//! use adrs_rs::physics::{AdrsCoefficients, Grid, PhysicalModel};
//! use nalgebra::DVector;
//!
//! struct UniformHeating;
//!
//! impl PhysicalModel for UniformHeating {
//!     fn coefficients(&self) -> AdrsCoefficients {
//!         AdrsCoefficients::new(0.1, 0.0, 0.0)
//!     }
//!
//!     fn source(&self, grid: &Grid, _time: f64) -> DVector<f64> {
//!         DVector::from_element(grid.points(), 1.0)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Uniform heating"
//!     }
//! }
//!
//! let grid = Grid::unit(11).unwrap();
//! assert_eq!(UniformHeating.source(&grid, 0.0).len(), 11);
//! ```

pub mod grid;
pub mod operators;
pub mod traits;

pub use grid::{Grid, MIN_GRID_POINTS};
pub use traits::{AdrsCoefficients, PhysicalModel};
