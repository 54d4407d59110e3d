//! Error analysis and numerical experiments
//!
//! - **`norms`**: discrete L2 and H1-seminorm errors, observed order
//! - **`refinement`**: steady and unsteady mesh-refinement studies
//! - **`quadrature`**: Riemann, Lebesgue and adaptive Lebesgue integration
//! - **`euler_ode`**: explicit Euler error study on the decay equation

pub mod euler_ode;
pub mod norms;
pub mod quadrature;
pub mod refinement;

pub use euler_ode::{DecayProblem, EulerError, Trajectory, log_spaced};
pub use norms::{convergence_order, h1_seminorm, l2_norm, normalized_l2_error};
pub use quadrature::{
    AdaptiveLebesgue, AdaptiveOptions, LebesguePass, RiemannRule, adaptive_lebesgue, lebesgue,
    riemann,
};
pub use refinement::{RefinementSample, SteadyRefinement, UnsteadyRefinement, UnsteadySample};
