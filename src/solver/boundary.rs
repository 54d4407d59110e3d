//! Boundary conditions of the 1D domain
//!
//! # Design Philosophy
//!
//! Each end of the segment carries one [`BoundaryCondition`]. The interior
//! stencils never write to nodes 0 and N-1; solvers call
//! [`DomainBoundaries::apply`] after every update to set them.
//!
//! ```text
//! Dirichlet(g)  left: u[0]   = g                 right: u[N-1] = g
//! Neumann(g)    left: u[0]   = u[1] - g·h        right: u[N-1] = u[N-2] + g·h
//! ```
//!
//! `g` is the derivative du/dx at that end.

use std::fmt;

use nalgebra::DVector;

use crate::error::{AdrsError, Result};

// =================================================================================================
// Boundary Condition
// =================================================================================================

/// Condition imposed at one end of the domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Prescribed value
    Dirichlet(f64),

    /// Prescribed derivative du/dx
    Neumann(f64),
}

impl BoundaryCondition {
    /// Prescribed value or derivative
    pub fn value(&self) -> f64 {
        match self {
            BoundaryCondition::Dirichlet(value) | BoundaryCondition::Neumann(value) => *value,
        }
    }

    pub fn is_dirichlet(&self) -> bool {
        matches!(self, BoundaryCondition::Dirichlet(_))
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        BoundaryCondition::Dirichlet(0.0)
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryCondition::Dirichlet(value) => write!(f, "Dirichlet ({})", value),
            BoundaryCondition::Neumann(value) => write!(f, "Neumann ({})", value),
        }
    }
}

// =================================================================================================
// Domain Boundaries
// =================================================================================================

/// Conditions at both ends of the segment
///
/// # Examples
///
/// ```rust
/// use adrs_rs::solver::{BoundaryCondition, DomainBoundaries};
/// use nalgebra::DVector;
///
/// let boundaries = DomainBoundaries::new(
///     BoundaryCondition::Dirichlet(1.0),
///     BoundaryCondition::Neumann(0.0),
/// );
///
/// let mut field = DVector::from_vec(vec![0.0, 2.0, 3.0]);
/// boundaries.apply(&mut field, 0.5);
/// assert_eq!(field.as_slice(), &[1.0, 2.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomainBoundaries {
    /// Condition at x = 0
    pub left: BoundaryCondition,

    /// Condition at x = L
    pub right: BoundaryCondition,
}

impl DomainBoundaries {
    pub fn new(left: BoundaryCondition, right: BoundaryCondition) -> Self {
        Self { left, right }
    }

    /// u = 0 at both ends
    pub fn homogeneous() -> Self {
        Self::default()
    }

    /// Dirichlet values on both ends
    pub fn dirichlet(left: f64, right: f64) -> Self {
        Self::new(
            BoundaryCondition::Dirichlet(left),
            BoundaryCondition::Dirichlet(right),
        )
    }

    /// Both ends homogeneous Dirichlet
    pub fn is_homogeneous(&self) -> bool {
        self.left == BoundaryCondition::Dirichlet(0.0)
            && self.right == BoundaryCondition::Dirichlet(0.0)
    }

    /// Overwrite the two end values of `field`
    ///
    /// Fields with fewer than two nodes are left untouched.
    pub fn apply(&self, field: &mut DVector<f64>, step: f64) {
        let n = field.len();
        if n < 2 {
            return;
        }

        field[0] = match self.left {
            BoundaryCondition::Dirichlet(value) => value,
            BoundaryCondition::Neumann(gradient) => field[1] - gradient * step,
        };

        field[n - 1] = match self.right {
            BoundaryCondition::Dirichlet(value) => value,
            BoundaryCondition::Neumann(gradient) => field[n - 2] + gradient * step,
        };
    }

    /// Validate the object contents
    pub fn validate(&self) -> Result<()> {
        for (side, condition) in [("left", self.left), ("right", self.right)] {
            if !condition.value().is_finite() {
                return Err(AdrsError::parameter(
                    "boundary",
                    format!("{side} condition {condition} is not finite"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for DomainBoundaries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "left: {}, right: {}", self.left, self.right)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_homogeneous() {
        let boundaries = DomainBoundaries::default();
        assert!(boundaries.is_homogeneous());
        assert_eq!(boundaries, DomainBoundaries::homogeneous());
    }

    #[test]
    fn test_homogeneous_apply_zeroes_ends() {
        let mut field = DVector::from_vec(vec![3.0, 1.0, 2.0, -4.0]);
        DomainBoundaries::homogeneous().apply(&mut field, 0.1);

        assert_eq!(field.as_slice(), &[0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let boundaries = DomainBoundaries::new(
            BoundaryCondition::Neumann(2.0),
            BoundaryCondition::Neumann(-1.0),
        );
        let mut field = DVector::from_vec(vec![0.0, 1.0, 1.5, 0.0]);

        boundaries.apply(&mut field, 0.5);
        let once = field.clone();
        boundaries.apply(&mut field, 0.5);

        assert_eq!(field, once);
        assert_relative_eq!(field[0], 0.0);
        assert_relative_eq!(field[3], 1.0);
    }

    #[test]
    fn test_dirichlet_values() {
        let mut field = DVector::zeros(5);
        DomainBoundaries::dirichlet(1.0, 2.0).apply(&mut field, 0.25);

        assert_eq!(field[0], 1.0);
        assert_eq!(field[4], 2.0);
        assert_eq!(field[2], 0.0);
    }

    #[test]
    fn test_tiny_field_untouched() {
        let mut field = DVector::from_vec(vec![7.0]);
        DomainBoundaries::homogeneous().apply(&mut field, 1.0);
        assert_eq!(field[0], 7.0);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let boundaries = DomainBoundaries::new(
            BoundaryCondition::Dirichlet(f64::NAN),
            BoundaryCondition::Neumann(0.0),
        );
        assert!(boundaries.validate().is_err());
        assert!(DomainBoundaries::homogeneous().validate().is_ok());
    }

    #[test]
    fn test_display() {
        let boundaries = DomainBoundaries::new(
            BoundaryCondition::Dirichlet(1.0),
            BoundaryCondition::Neumann(0.0),
        );
        assert_eq!(boundaries.to_string(), "left: Dirichlet (1), right: Neumann (0)");
    }
}
