//! Numerical methods for the ADRS equation
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`MultiStageSolver`]**: centered advection and diffusion with
//!   artificial viscosity, R relaxation stages per iteration, time step
//!   recomputed from the forcing at every iteration
//!   - Cost: R stencil sweeps per iteration
//!   - Use: control problems, inverse design, unsteady verification
//!
//! - **[`ForwardEulerSolver`]**: first-order upwind advection, centered
//!   diffusion, single explicit stage with a fixed time step
//!   - Cost: 1 stencil sweep per iteration
//!   - Use: steady verification with general boundary conditions
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Stateless**: a unit struct, reusable across simulations
//! - **Self-contained**: every call allocates its own field and history

pub mod euler;
mod multistage;

pub use euler::ForwardEulerSolver;
pub use multistage::{MultiStageSolver, StageWeights, multistage_update};
