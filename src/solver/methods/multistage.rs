//! Multi-stage explicit relaxation solver
//!
//! # Mathematical Background
//!
//! The solver marches the semi-discrete ADRS equation
//!
//! ```text
//! dT_j/dt = -V Tx_j + ν Txx_j - λ T_j + F_j            j = 1, …, N-2
//!
//! Tx_j  = (T_{j+1} - T_{j-1}) / (2h)
//! Txx_j = (T_{j-1} - 2T_j + T_{j+1}) / h²
//! ν     = K + 0.5·h·|V|                                 (artificial viscosity)
//! ```
//!
//! with R sub-stages per outer iteration, every stage restarting from the
//! snapshot T⁰ taken at the beginning of the iteration:
//!
//! ```text
//! α_r   = 1 / (R - r),                      r = 0, …, R-1
//! RHS_j = dt · (-V Tx_j + ν Txx_j - λ T_j + F_j)
//! T_j   = T⁰_j + α_r · RHS_j
//! ```
//!
//! Each stage is a single in-place sweep from left to right: node j is
//! written as soon as its RHS is known, so the stencil of node j+1 already
//! sees the new value of T_j.
//!
//! When the nodes are decoupled (ν = 0 and V = 0) four stages give the
//! stability polynomial of the classical fourth-order Runge-Kutta method.
//!
//! # Time Step
//!
//! Recomputed every outer iteration from the current forcing:
//!
//! ```text
//! dt = safety · h² / (|V|h + 2K + max|F|·h²)
//! ```
//!
//! # Convergence Control
//!
//! The residual of an iteration is the L1 norm Σ|RHS_j| of its last stage.
//! The reference residual res0 is the residual of the FIRST iteration, and
//! an iterative run stops as soon as `res ≤ tolerance · res0`.
//!
//! # Example
//!
//! ```rust
//! use adrs_rs::models::GaussianControl;
//! use adrs_rs::physics::Grid;
//! use adrs_rs::solver::{MultiStageSolver, Scenario, Solver, SolverConfiguration};
//!
//! let grid = Grid::unit(30).unwrap();
//! let scenario = Scenario::new(Box::new(GaussianControl::new(vec![1.0, 2.0])), grid);
//! let config = SolverConfiguration::iterative(1e-4, 1000);
//!
//! let result = MultiStageSolver::new().solve(&scenario, &config).unwrap();
//! assert_eq!(result.field[0], 0.0);
//! assert!(result.field[15] > 0.0);
//! ```

use log::{debug, info, warn};
use nalgebra::DVector;

use crate::error::{AdrsError, Result};
use crate::physics::AdrsCoefficients;
use crate::physics::operators::{centered_curvature, centered_gradient, max_abs};
use crate::solver::stability::multistage_time_step;
use crate::solver::{
    ConvergenceStatus, Scenario, SimulationResult, Solver, SolverConfiguration, SolverType,
    validate_field,
};

// =================================================================================================
// Stage weights
// =================================================================================================

/// Relaxation weights α_r = 1/(R - r)
///
/// # Example
///
/// ```rust
/// use adrs_rs::solver::StageWeights;
///
/// let weights = StageWeights::new(4).unwrap();
/// assert_eq!(weights.as_slice(), &[0.25, 1.0 / 3.0, 0.5, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StageWeights {
    alpha: Vec<f64>,
}

impl StageWeights {
    pub fn new(stages: usize) -> Result<Self> {
        if stages == 0 {
            return Err(AdrsError::InvalidConfiguration(
                "at least one stage is required".to_string(),
            ));
        }

        let alpha = (0..stages).map(|r| 1.0 / (stages - r) as f64).collect();
        Ok(Self { alpha })
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.alpha
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.alpha.iter()
    }
}

// =================================================================================================
// One outer iteration
// =================================================================================================

/// Advance `field` by one outer iteration of R sub-stages
///
/// Only interior nodes are written, in place and in increasing order: the
/// stencil of node j reads the value of node j-1 written earlier in the same
/// stage. Returns the L1 norm of the last stage's RHS.
///
/// ```rust
/// use adrs_rs::physics::AdrsCoefficients;
/// use adrs_rs::solver::{StageWeights, multistage_update};
/// use nalgebra::DVector;
///
/// let mut field = DVector::zeros(5);
/// let source = DVector::from_vec(vec![0.0, 1.0, 1.0, 1.0, 0.0]);
/// let weights = StageWeights::new(1).unwrap();
/// let coefficients = AdrsCoefficients::new(0.0, 0.0, 0.0);
///
/// let residual = multistage_update(&mut field, &source, 0.1, &weights, &coefficients, 0.25);
///
/// assert!((residual - 0.3).abs() < 1e-15);
/// assert_eq!(field[0], 0.0);
/// assert!((field[2] - 0.1).abs() < 1e-15);
/// ```
pub fn multistage_update(
    field: &mut DVector<f64>,
    source: &DVector<f64>,
    dt: f64,
    weights: &StageWeights,
    coefficients: &AdrsCoefficients,
    step: f64,
) -> f64 {
    let n = field.len();
    let interior = 1..n.saturating_sub(1);
    let viscosity = coefficients.effective_viscosity(step);
    let velocity = coefficients.velocity;
    let reaction = coefficients.reaction;

    let snapshot = field.clone();
    let mut residual = 0.0;

    for &alpha in weights.iter() {
        residual = 0.0;

        for j in interior.clone() {
            let tx = centered_gradient(field, j, step);
            let txx = centered_curvature(field, j, step);
            let rhs = dt * (-velocity * tx + viscosity * txx - reaction * field[j] + source[j]);
            residual += rhs.abs();
            field[j] = snapshot[j] + alpha * rhs;
        }
    }

    residual
}

// =================================================================================================
// Multi-stage Solver
// =================================================================================================

/// Multi-stage explicit solver with adaptive time step
///
/// Supports both stopping rules:
///
/// - `Iterative`: relax to steady state, `res ≤ tolerance · res0`
/// - `TimeEvolution`: time-accurate march up to `total_time`
///
/// Reaching the iteration cap is reported through
/// [`ConvergenceStatus::MaxIterationsReached`], never as an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiStageSolver;

impl MultiStageSolver {
    /// Safety factor applied to the time step when the configuration sets none
    pub const DEFAULT_SAFETY: f64 = 1.0;

    pub fn new() -> Self {
        Self
    }
}

impl Solver for MultiStageSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (tolerance, total_time) = match config.solver_type {
            SolverType::Iterative { tolerance, .. } => (Some(tolerance), None),
            SolverType::TimeEvolution { total_time, .. } => (None, Some(total_time)),
        };
        let max_iterations = config.solver_type.max_iterations();

        // ====== Step 2: Setup ======

        let grid = &scenario.grid;
        let step = grid.step();
        let coefficients = scenario.model.coefficients();
        let weights = StageWeights::new(config.stages)?;
        let safety = config.safety_or(Self::DEFAULT_SAFETY);
        let time_dependent = scenario.is_time_dependent();

        let mut field = scenario.initial_field()?;
        let mut source = scenario.source(0.0)?;
        let mut max_source = max_abs(&source);

        let mut residual_history = Vec::new();
        let mut time_points = Vec::new();

        let mut residual = 1.0;
        let mut reference = 1.0;
        let mut time = 0.0;
        let mut last_dt = 0.0;
        let mut iteration = 0;

        info!(
            "{}: {} on {} points, {} stage(s), {}",
            self.name(),
            scenario.get_model_name(),
            grid.points(),
            weights.len(),
            config.solver_type.name()
        );

        // ====== Step 3: Outer loop ======

        loop {
            let keep_going = match (tolerance, total_time) {
                (Some(tolerance), _) => residual > tolerance * reference,
                (None, Some(total_time)) => time < total_time,
                (None, None) => false,
            };
            if iteration >= max_iterations || !keep_going {
                break;
            }

            iteration += 1;

            if time_dependent && iteration > 1 {
                source = scenario.source(time)?;
                max_source = max_abs(&source);
            }

            let dt = multistage_time_step(step, &coefficients, max_source, safety);
            if !(dt.is_finite() && dt > 0.0) {
                return Err(AdrsError::parameter(
                    "time step",
                    format!("stability limit gives dt = {dt}; the equation needs K > 0, V ≠ 0 or a forcing"),
                ));
            }

            time += dt;
            last_dt = dt;

            residual =
                multistage_update(&mut field, &source, dt, &weights, &coefficients, step);
            scenario.conditions.apply(&mut field, step);
            validate_field(&field, iteration)?;

            if iteration == 1 {
                reference = residual;
            }

            residual_history.push(residual);
            time_points.push(time);

            if config.report_every > 0 && iteration % config.report_every == 0 {
                debug!(
                    "iteration {iteration}: t = {time:.6e}, dt = {dt:.3e}, res = {residual:.6e}"
                );
            }
        }

        // ====== Step 4: Build Result ======

        let status = match (tolerance, total_time) {
            (Some(tolerance), _) if residual <= tolerance * reference => {
                ConvergenceStatus::Converged
            }
            (None, Some(total_time)) if time >= total_time => ConvergenceStatus::TimeHorizonReached,
            _ => ConvergenceStatus::MaxIterationsReached,
        };

        match status {
            ConvergenceStatus::MaxIterationsReached => warn!(
                "{}: stopped after {iteration} iterations, res/res0 = {:.3e}",
                self.name(),
                if reference > 0.0 { residual / reference } else { residual }
            ),
            _ => info!(
                "{}: {status} after {iteration} iterations (t = {time:.6e})",
                self.name()
            ),
        }

        let mut result = SimulationResult::new(
            field,
            grid.coordinates().clone(),
            residual_history,
            time_points,
            reference,
            status,
        );

        result.add_metadata("solver", self.name());
        result.add_metadata("model", scenario.get_model_name());
        result.add_metadata("stages", &weights.len().to_string());
        result.add_metadata("iterations", &iteration.to_string());
        result.add_metadata("last dt", &last_dt.to_string());
        result.add_metadata("final time", &time.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Multi-stage explicit"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
