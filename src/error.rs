//! Error type shared by every module of the crate
//!
//! All fallible operations return [`Result<T>`](Result), an alias over
//! [`AdrsError`]. Non-convergence of an iterative solve is *not* an error:
//! it is reported through [`ConvergenceStatus`](crate::solver::ConvergenceStatus)
//! and left to the caller to judge.

use thiserror::Error;

/// Errors raised by grid construction, solvers, inverse design and export
#[derive(Debug, Error)]
pub enum AdrsError {
    /// Grid has fewer nodes than the discretisation needs
    #[error("invalid grid size: {points} points (at least {minimum} required)")]
    InvalidGridSize { points: usize, minimum: usize },

    /// Two vectors that must describe the same grid have different lengths
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// Normal equations of the inverse-design problem cannot be solved
    #[error("singular {size}x{size} system: the control basis responses are linearly dependent")]
    SingularSystem { size: usize },

    /// Physical or numerical parameter outside its admissible range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Solver configuration rejected before any work was done
    #[error("invalid solver configuration: {0}")]
    InvalidConfiguration(String),

    /// NaN or Inf detected in the field while marching
    #[error("numerical instability at iteration {iteration}: {reason}")]
    NumericalInstability { iteration: usize, reason: String },

    /// Data handed to an exporter is empty or inconsistent
    #[error("invalid export data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AdrsError {
    /// Shorthand for [`AdrsError::InvalidParameter`]
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`AdrsError::DimensionMismatch`]
    pub fn mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AdrsError>;
