//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the stopping rule of a run
//! - `SolverConfiguration` carries the `SolverType` plus method parameters
//! - `SimulationResult` carries the final field and the residual history
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: stable, every method implements it
//! - `SolverType` enum: extensible (new variants can be added)

use std::collections::HashMap;
use std::fmt;

use nalgebra::DVector;

use crate::error::{AdrsError, Result};
use crate::solver::scenario::Scenario;

/// Number of sub-stages used when none is configured
pub const DEFAULT_STAGES: usize = 4;

/// Iterations between two debug log lines
pub const DEFAULT_REPORT_EVERY: usize = 100;

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Stopping rule of a run
///
/// # Examples
///
/// ```rust
/// use adrs_rs::solver::SolverType;
///
/// // Relax to steady state
/// let steady = SolverType::Iterative {
///     tolerance: 1e-4,
///     max_iterations: 1000,
/// };
///
/// // March to t = 1
/// let unsteady = SolverType::TimeEvolution {
///     total_time: 1.0,
///     max_iterations: 100_000,
/// };
///
/// assert_eq!(steady.name(), "Iterative");
/// assert_eq!(unsteady.max_iterations(), 100_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {
    /// Iterate until `res ≤ tolerance · res0` or `max_iterations` is reached
    Iterative {
        tolerance: f64,
        max_iterations: usize,
    },

    /// March until the physical time reaches `total_time`
    ///
    /// `max_iterations` caps the number of steps as a safety limit.
    TimeEvolution {
        total_time: f64,
        max_iterations: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::Iterative { .. } => "Iterative",
            SolverType::TimeEvolution { .. } => "TimeEvolution",
        }
    }

    /// Iteration cap NT
    pub fn max_iterations(&self) -> usize {
        match self {
            SolverType::Iterative { max_iterations, .. }
            | SolverType::TimeEvolution { max_iterations, .. } => *max_iterations,
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> Result<()> {
        match self {
            SolverType::Iterative {
                tolerance,
                max_iterations,
            } => {
                if !(tolerance.is_finite() && *tolerance > 0.0) {
                    return Err(AdrsError::InvalidConfiguration(format!(
                        "tolerance must be positive and finite, got {tolerance}"
                    )));
                }
                if *max_iterations == 0 {
                    return Err(AdrsError::InvalidConfiguration(
                        "maximum iterations must be positive".to_string(),
                    ));
                }
                Ok(())
            }
            SolverType::TimeEvolution {
                total_time,
                max_iterations,
            } => {
                if !(total_time.is_finite() && *total_time > 0.0) {
                    return Err(AdrsError::InvalidConfiguration(format!(
                        "total time must be positive and finite, got {total_time}"
                    )));
                }
                if *max_iterations == 0 {
                    return Err(AdrsError::InvalidConfiguration(
                        "maximum iterations must be positive".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a numerical solver
///
/// # Examples
///
/// ```rust
/// use adrs_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::iterative(1e-4, 1000)
///     .with_stages(1)
///     .with_cfl_safety(0.5);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.stages, 1);
/// assert_eq!(config.safety_or(1.0), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Stopping rule and its parameters
    pub solver_type: SolverType,

    /// Sub-stages per outer iteration (multi-stage solver only)
    pub stages: usize,

    /// Factor applied to the stability-limited time step
    ///
    /// `None` lets each solver use its own default.
    pub cfl_safety: Option<f64>,

    /// Iterations between two debug log lines (0 disables them)
    pub report_every: usize,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self {
            solver_type,
            stages: DEFAULT_STAGES,
            cfl_safety: None,
            report_every: DEFAULT_REPORT_EVERY,
        }
    }

    /// Create an iterative (steady-state) configuration
    pub fn iterative(tolerance: f64, max_iterations: usize) -> Self {
        Self::new(SolverType::Iterative {
            tolerance,
            max_iterations,
        })
    }

    /// Create a time-accurate configuration
    pub fn time_evolution(total_time: f64, max_iterations: usize) -> Self {
        Self::new(SolverType::TimeEvolution {
            total_time,
            max_iterations,
        })
    }

    pub fn with_stages(mut self, stages: usize) -> Self {
        self.stages = stages;
        self
    }

    pub fn with_cfl_safety(mut self, safety: f64) -> Self {
        self.cfl_safety = Some(safety);
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    /// Configured safety factor, or `default` when none was set
    pub fn safety_or(&self, default: f64) -> f64 {
        self.cfl_safety.unwrap_or(default)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.solver_type.validate()?;

        if self.stages == 0 {
            return Err(AdrsError::InvalidConfiguration(
                "at least one stage is required".to_string(),
            ));
        }

        if let Some(safety) = self.cfl_safety
            && !(safety.is_finite() && safety > 0.0)
        {
            return Err(AdrsError::InvalidConfiguration(format!(
                "CFL safety factor must be positive and finite, got {safety}"
            )));
        }

        Ok(())
    }
}

impl Default for SolverConfiguration {
    /// eps = 1e-4, NT = 1000, four stages
    fn default() -> Self {
        Self::iterative(1e-4, 1000)
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// `res ≤ tolerance · res0`
    Converged,

    /// Iteration cap reached first (not an error)
    MaxIterationsReached,

    /// Physical time reached `total_time`
    TimeHorizonReached,
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConvergenceStatus::Converged => write!(f, "converged"),
            ConvergenceStatus::MaxIterationsReached => write!(f, "maximum iterations reached"),
            ConvergenceStatus::TimeHorizonReached => write!(f, "time horizon reached"),
        }
    }
}

/// Outcome of a solver run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Field at the end of the run
    pub field: DVector<f64>,

    /// Node coordinates
    pub coordinates: DVector<f64>,

    /// One residual per outer iteration
    pub residual_history: Vec<f64>,

    /// Physical time after each outer iteration
    pub time_points: Vec<f64>,

    /// Reference residual res0 used for the relative stopping test
    pub reference_residual: f64,

    pub status: ConvergenceStatus,

    /// Free-form diagnostics (solver name, dt, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(
        field: DVector<f64>,
        coordinates: DVector<f64>,
        residual_history: Vec<f64>,
        time_points: Vec<f64>,
        reference_residual: f64,
        status: ConvergenceStatus,
    ) -> Self {
        Self {
            field,
            coordinates,
            residual_history,
            time_points,
            reference_residual,
            status,
            metadata: HashMap::new(),
        }
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of outer iterations performed
    pub fn iterations(&self) -> usize {
        self.residual_history.len()
    }

    /// Residual of the last iteration (0 when no iteration ran)
    pub fn final_residual(&self) -> f64 {
        self.residual_history.last().copied().unwrap_or(0.0)
    }

    /// `res / res0` of the last iteration
    pub fn relative_residual(&self) -> f64 {
        if self.reference_residual > 0.0 {
            self.final_residual() / self.reference_residual
        } else {
            self.final_residual()
        }
    }

    /// Residual history divided by res0
    pub fn normalized_history(&self) -> Vec<f64> {
        let scale = if self.reference_residual > 0.0 {
            self.reference_residual
        } else {
            1.0
        };
        self.residual_history.iter().map(|r| r / scale).collect()
    }

    /// Physical time at the end of the run
    pub fn final_time(&self) -> f64 {
        self.time_points.last().copied().unwrap_or(0.0)
    }

    pub fn is_converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method applied to a [`Scenario`]
pub trait Solver {
    /// Run the method on `scenario` with the stopping rule of `config`
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult>;

    /// Name used in logs and metadata
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterative_configuration() {
        let config = SolverConfiguration::iterative(1e-6, 50);

        assert_eq!(config.solver_type.name(), "Iterative");
        assert_eq!(config.solver_type.max_iterations(), 50);
        assert_eq!(config.stages, DEFAULT_STAGES);
        assert!(config.cfl_safety.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_configuration() {
        let config = SolverConfiguration::default();
        assert_eq!(
            config.solver_type,
            SolverType::Iterative {
                tolerance: 1e-4,
                max_iterations: 1000
            }
        );
        assert_eq!(config.safety_or(1.0), 1.0);
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(SolverConfiguration::iterative(0.0, 10).validate().is_err());
        assert!(SolverConfiguration::iterative(-1.0, 10).validate().is_err());
        assert!(SolverConfiguration::iterative(1e-3, 0).validate().is_err());
        assert!(SolverConfiguration::time_evolution(0.0, 10).validate().is_err());
        assert!(SolverConfiguration::time_evolution(1.0, 0).validate().is_err());
        assert!(
            SolverConfiguration::iterative(1e-3, 10)
                .with_stages(0)
                .validate()
                .is_err()
        );
        assert!(
            SolverConfiguration::iterative(1e-3, 10)
                .with_cfl_safety(0.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_invalid_configuration_error_kind() {
        let error = SolverConfiguration::iterative(f64::NAN, 10)
            .validate()
            .unwrap_err();
        assert!(matches!(error, AdrsError::InvalidConfiguration(_)));
        assert!(error.to_string().contains("tolerance"));
    }

    fn sample_result() -> SimulationResult {
        SimulationResult::new(
            DVector::zeros(3),
            DVector::from_vec(vec![0.0, 0.5, 1.0]),
            vec![4.0, 2.0, 1.0],
            vec![0.1, 0.2, 0.3],
            4.0,
            ConvergenceStatus::MaxIterationsReached,
        )
    }

    #[test]
    fn test_result_accessors() {
        let result = sample_result();

        assert_eq!(result.iterations(), 3);
        assert_eq!(result.final_residual(), 1.0);
        assert_eq!(result.relative_residual(), 0.25);
        assert_eq!(result.normalized_history(), vec![1.0, 0.5, 0.25]);
        assert_eq!(result.final_time(), 0.3);
        assert!(!result.is_converged());
    }

    #[test]
    fn test_result_zero_reference() {
        let mut result = sample_result();
        result.reference_residual = 0.0;

        assert_eq!(result.relative_residual(), 1.0);
        assert_eq!(result.normalized_history(), vec![4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_metadata() {
        let mut result = sample_result();
        result.add_metadata("solver", "test");
        assert_eq!(result.metadata.get("solver"), Some(&"test".to_string()));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ConvergenceStatus::Converged.to_string(), "converged");
        assert_eq!(
            ConvergenceStatus::TimeHorizonReached.to_string(),
            "time horizon reached"
        );
    }
}
