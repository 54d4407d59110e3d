//! Uniform one-dimensional grid
//!
//! # Mathematical Background
//!
//! The segment [0, L] is split into N nodes with constant spacing:
//!
//! ```text
//! h   = L / (N - 1)
//! x_j = j · h,            j = 0, …, N-1
//! ```
//!
//! Nodes 0 and N-1 carry the boundary conditions, nodes 1..N-2 are the
//! interior nodes updated by the finite-difference stencils. A grid needs at
//! least one interior node, hence N ≥ 3.

use std::ops::Range;

use nalgebra::DVector;

use crate::error::{AdrsError, Result};

/// Smallest admissible number of nodes (two boundaries plus one interior node)
pub const MIN_GRID_POINTS: usize = 3;

/// Uniform 1D grid over [0, L]
///
/// Immutable once built: solvers borrow it and never change its spacing.
///
/// # Example
///
/// ```rust
/// use adrs_rs::physics::Grid;
///
/// let grid = Grid::new(1.0, 11).unwrap();
/// assert_eq!(grid.points(), 11);
/// assert!((grid.step() - 0.1).abs() < 1e-15);
/// assert_eq!(grid.interior(), 1..10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    length: f64,
    step: f64,
    nodes: DVector<f64>,
}

impl Grid {
    /// Build a grid of `points` nodes over [0, `length`]
    ///
    /// # Errors
    ///
    /// - [`AdrsError::InvalidGridSize`] when `points < 3`
    /// - [`AdrsError::InvalidParameter`] when `length` is not strictly positive and finite
    pub fn new(length: f64, points: usize) -> Result<Self> {
        if points < MIN_GRID_POINTS {
            return Err(AdrsError::InvalidGridSize {
                points,
                minimum: MIN_GRID_POINTS,
            });
        }

        if !(length.is_finite() && length > 0.0) {
            return Err(AdrsError::parameter(
                "length",
                format!("domain length must be positive and finite, got {length}"),
            ));
        }

        let step = length / (points - 1) as f64;
        let nodes = DVector::from_fn(points, |j, _| j as f64 * step);

        Ok(Self { length, step, nodes })
    }

    /// Grid over the unit segment
    pub fn unit(points: usize) -> Result<Self> {
        Self::new(1.0, points)
    }

    /// Domain length L
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of nodes N
    pub fn points(&self) -> usize {
        self.nodes.len()
    }

    /// Mesh spacing h
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Node coordinates x_j
    pub fn coordinates(&self) -> &DVector<f64> {
        &self.nodes
    }

    /// Coordinate of node `j`
    pub fn x(&self, j: usize) -> f64 {
        self.nodes[j]
    }

    /// Index range of the interior nodes
    pub fn interior(&self) -> Range<usize> {
        1..self.points() - 1
    }

    /// Zero field sized for this grid
    pub fn zeros(&self) -> DVector<f64> {
        DVector::zeros(self.points())
    }

    /// Evaluate `f` at every node
    pub fn map<F>(&self, f: F) -> DVector<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.nodes.map(f)
    }

    /// Check that `field` has one value per node
    pub fn check_len(&self, context: &str, field: &DVector<f64>) -> Result<()> {
        if field.len() != self.points() {
            return Err(AdrsError::mismatch(context, self.points(), field.len()));
        }
        Ok(())
    }
}
