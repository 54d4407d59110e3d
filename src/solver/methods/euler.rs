//! Forward Euler upwind solver
//!
//! # Mathematical Background
//!
//! Semi-discrete ADRS equation with a one-sided advection stencil:
//!
//! ```text
//! du_j/dt = -v (D⁺u)_j + ν (D²u)_j - λ u_j + f_j
//!
//! (D⁺u)_j = (u_j - u_{j-1}) / h          v ≥ 0
//!         = (u_{j+1} - u_j) / h          v < 0
//! (D²u)_j = (u_{j-1} - 2u_j + u_{j+1}) / h²
//! ```
//!
//! marched with the explicit Euler scheme
//!
//! ```text
//! u^{n+1} = u^n + dt · rhs(u^n),     dt = safety / (|v|/h + 2ν/h² + λ)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: first order in space (upwind) and in time
//! - **Stability**: guaranteed for safety ≤ 1 (monotone scheme)
//! - **Boundaries**: any [`BoundaryCondition`](crate::solver::BoundaryCondition)
//!   combination, re-applied after every step
//!
//! # Convergence Control
//!
//! The residual is the discrete L2 norm of the interior RHS,
//! `sqrt(h · Σ rhs_j²)`, evaluated before each update. It is normalised by
//! the residual of the INITIAL field (1 when that is zero).
//!
//! # Example
//!
//! ```rust
//! use adrs_rs::models::GaussianManufactured;
//! use adrs_rs::physics::Grid;
//! use adrs_rs::solver::{ForwardEulerSolver, Scenario, Solver, SolverConfiguration};
//!
//! let model = GaussianManufactured::default();
//! let grid = Grid::unit(25).unwrap();
//! let boundaries = model.boundaries(&grid);
//! let scenario = Scenario::new(Box::new(model), grid).with_boundaries(boundaries);
//!
//! let result = ForwardEulerSolver::new()
//!     .solve(&scenario, &SolverConfiguration::iterative(1e-6, 100_000))
//!     .unwrap();
//! assert!(result.is_converged());
//! ```

use log::{debug, info, warn};
use nalgebra::DVector;

use crate::error::{AdrsError, Result};
use crate::physics::AdrsCoefficients;
use crate::physics::operators::{laplacian, upwind_gradient};
use crate::solver::stability::explicit_euler_time_step;
use crate::solver::{
    ConvergenceStatus, Scenario, SimulationResult, Solver, SolverConfiguration, SolverType,
    validate_field,
};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler time-stepping solver with upwind advection
///
/// # Algorithm
///
/// 1. Start from the scenario initial field (boundaries applied)
/// 2. For each iteration n = 1, 2, ...:
///    - rhs = -v D⁺u + ν D²u - λu + f on interior nodes
///    - residual = sqrt(h Σ rhs²)
///    - u ← u + dt · rhs, then re-apply the boundary conditions
/// 3. Stop on `res/res0 ≤ tolerance`, on the time horizon, or on the cap
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEulerSolver;

impl ForwardEulerSolver {
    /// Safety factor applied to the time step when the configuration sets none
    pub const DEFAULT_SAFETY: f64 = 0.9;

    /// Create a new Forward Euler solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use adrs_rs::solver::{ForwardEulerSolver, Solver};
    ///
    /// let solver = ForwardEulerSolver::new();
    /// assert_eq!(solver.name(), "Forward Euler upwind");
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Interior right-hand side; boundary entries are zero
    pub fn rhs(
        field: &DVector<f64>,
        source: &DVector<f64>,
        coefficients: &AdrsCoefficients,
        step: f64,
    ) -> DVector<f64> {
        let n = field.len();
        let gradient = upwind_gradient(field, step, coefficients.velocity);
        let curvature = laplacian(field, step);

        let mut rhs = DVector::zeros(n);
        for j in 1..n.saturating_sub(1) {
            rhs[j] = -coefficients.velocity * gradient[j] + coefficients.diffusion * curvature[j]
                - coefficients.reaction * field[j]
                + source[j];
        }
        rhs
    }
}

impl Solver for ForwardEulerSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let max_iterations = config.solver_type.max_iterations();

        // ====== Step 2: Setup ======

        let grid = &scenario.grid;
        let step = grid.step();
        let coefficients = scenario.model.coefficients();
        let safety = config.safety_or(Self::DEFAULT_SAFETY);

        // Fixed for the whole run
        let dt = explicit_euler_time_step(step, &coefficients, safety);
        if !(dt.is_finite() && dt > 0.0) {
            return Err(AdrsError::parameter(
                "time step",
                format!("stability limit gives dt = {dt}; at least one of v, ν, λ must be non-zero"),
            ));
        }

        let mut field = scenario.initial_field()?;
        let mut source = scenario.source(0.0)?;

        let initial = Self::rhs(&field, &source, &coefficients, step);
        let initial_residual = (step * initial.norm_squared()).sqrt();
        let reference = if initial_residual > 0.0 {
            initial_residual
        } else {
            1.0
        };

        let mut residual = initial_residual;
        let mut residual_history = Vec::new();
        let mut time_points = Vec::new();
        let mut iteration = 0;

        info!(
            "{}: {} on {} points, dt = {dt:.3e}, {}",
            self.name(),
            scenario.get_model_name(),
            grid.points(),
            config.solver_type.name()
        );

        // ====== Step 3: Time Integration ======

        loop {
            // Time from the index, not accumulated, so t_n = n·dt exactly
            let time = iteration as f64 * dt;
            let keep_going = match config.solver_type {
                SolverType::Iterative { tolerance, .. } => residual / reference > tolerance,
                SolverType::TimeEvolution { total_time, .. } => time < total_time,
            };
            if iteration >= max_iterations || !keep_going {
                break;
            }

            if scenario.is_time_dependent() {
                source = scenario.source(time)?;
            }

            let rhs = Self::rhs(&field, &source, &coefficients, step);
            residual = (step * rhs.norm_squared()).sqrt();

            field.axpy(dt, &rhs, 1.0);
            scenario.conditions.apply(&mut field, step);

            iteration += 1;
            validate_field(&field, iteration)?;

            residual_history.push(residual);
            time_points.push(iteration as f64 * dt);

            if config.report_every > 0 && iteration % config.report_every == 0 {
                debug!(
                    "iteration {iteration}: res/res0 = {:.6e}",
                    residual / reference
                );
            }
        }

        // ====== Step 4: Build Result ======

        let final_time = iteration as f64 * dt;
        let status = match config.solver_type {
            SolverType::Iterative { tolerance, .. } if residual / reference <= tolerance => {
                ConvergenceStatus::Converged
            }
            SolverType::TimeEvolution { total_time, .. } if final_time >= total_time => {
                ConvergenceStatus::TimeHorizonReached
            }
            _ => ConvergenceStatus::MaxIterationsReached,
        };

        match status {
            ConvergenceStatus::MaxIterationsReached => warn!(
                "{}: stopped after {iteration} iterations, res/res0 = {:.3e}",
                self.name(),
                residual / reference
            ),
            _ => info!("{}: {status} after {iteration} iterations", self.name()),
        }

        let mut result = SimulationResult::new(
            field,
            grid.coordinates().clone(),
            residual_history,
            time_points,
            reference,
            status,
        );

        // Add metadata for diagnostics and reproducibility
        result.add_metadata("solver", self.name());
        result.add_metadata("model", scenario.get_model_name());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("iterations", &iteration.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler upwind"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
