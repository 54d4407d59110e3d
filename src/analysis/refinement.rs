//! Mesh-refinement error studies
//!
//! Both studies solve a manufactured problem on a sequence of grids and
//! measure the distance to the exact solution:
//!
//! - [`SteadyRefinement`]: [`GaussianManufactured`] relaxed to steady state
//!   with the [`ForwardEulerSolver`]; L2 and H1-seminorm errors.
//! - [`UnsteadyRefinement`]: [`OscillatingManufactured`] marched in time
//!   with the [`MultiStageSolver`]; normalised L2 error at each horizon.

use log::{debug, info};

use crate::analysis::norms::{h1_seminorm, l2_norm, normalized_l2_error};
use crate::error::{AdrsError, Result};
use crate::models::{GaussianManufactured, OscillatingManufactured};
use crate::physics::{Grid, PhysicalModel};
use crate::solver::{
    ForwardEulerSolver, MultiStageSolver, Scenario, Solver, SolverConfiguration,
};

/// Error of one steady solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementSample {
    pub points: usize,
    pub step: f64,
    pub l2_error: f64,
    pub h1_error: f64,
    /// Outer iterations spent reaching steady state
    pub iterations: usize,
}

/// Steady refinement study on the Gaussian manufactured solution
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyRefinement {
    pub points: Vec<usize>,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub model: GaussianManufactured,
}

impl Default for SteadyRefinement {
    /// N = 3, 6, 12, 24, 48 relaxed to `res/res0 ≤ 1e-8`
    fn default() -> Self {
        Self {
            points: vec![3, 6, 12, 24, 48],
            tolerance: 1e-8,
            max_iterations: 2_000_000,
            model: GaussianManufactured::default(),
        }
    }
}

impl SteadyRefinement {
    pub fn with_points(mut self, points: Vec<usize>) -> Self {
        self.points = points;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Solve on every grid and collect the errors
    pub fn run(&self) -> Result<Vec<RefinementSample>> {
        let config = SolverConfiguration::iterative(self.tolerance, self.max_iterations)
            .with_report_every(0);
        let solver = ForwardEulerSolver::new();

        self.points
            .iter()
            .map(|&points| {
                let grid = Grid::unit(points)?;
                let exact = grid.map(|s| GaussianManufactured::exact_at(grid.length(), s));
                let step = grid.step();
                let boundaries = self.model.boundaries(&grid);
                let scenario =
                    Scenario::new(Box::new(self.model), grid).with_boundaries(boundaries);

                let result = solver.solve(&scenario, &config)?;
                let sample = RefinementSample {
                    points,
                    step,
                    l2_error: l2_norm(&(&result.field - &exact), step),
                    h1_error: h1_seminorm(&result.field, &exact, step)?,
                    iterations: result.iterations(),
                };

                debug!(
                    "N = {points}: h = {step:.4e}, L2 = {:.4e}, H1 = {:.4e}",
                    sample.l2_error, sample.h1_error
                );
                Ok(sample)
            })
            .collect()
    }
}

/// Errors of one grid at every horizon of an unsteady study
#[derive(Debug, Clone, PartialEq)]
pub struct UnsteadySample {
    pub points: usize,
    pub step: f64,
    /// `(reached time, normalised L2 error)` per horizon
    pub errors: Vec<(f64, f64)>,
}

/// Unsteady refinement study on the oscillating manufactured solution
#[derive(Debug, Clone, PartialEq)]
pub struct UnsteadyRefinement {
    pub start_points: usize,
    pub increment: usize,
    pub runs: usize,
    pub horizons: Vec<f64>,
    pub max_iterations: usize,
    pub stages: usize,
    pub model: OscillatingManufactured,
}

impl Default for UnsteadyRefinement {
    /// 20 grids from N = 5 in steps of 3, horizons t = 0.5 and t = 1
    fn default() -> Self {
        Self {
            start_points: 5,
            increment: 3,
            runs: 20,
            horizons: vec![0.5, 1.0],
            max_iterations: 1_000_000,
            stages: 4,
            model: OscillatingManufactured::default(),
        }
    }
}

impl UnsteadyRefinement {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_horizons(mut self, horizons: Vec<f64>) -> Self {
        self.horizons = horizons;
        self
    }

    /// Grid sizes visited by the study
    pub fn grid_sizes(&self) -> Vec<usize> {
        (0..self.runs)
            .map(|run| self.start_points + run * self.increment)
            .collect()
    }

    /// March every grid to every horizon and compare with the exact solution
    /// at the time actually reached
    pub fn run(&self) -> Result<Vec<UnsteadySample>> {
        if self.horizons.is_empty() {
            return Err(AdrsError::parameter("horizons", "no horizon to reach"));
        }

        let solver = MultiStageSolver::new();
        let mut samples = Vec::with_capacity(self.runs);

        for points in self.grid_sizes() {
            let grid = Grid::unit(points)?;
            let step = grid.step();
            let mut errors = Vec::with_capacity(self.horizons.len());

            for &horizon in &self.horizons {
                let config = SolverConfiguration::time_evolution(horizon, self.max_iterations)
                    .with_stages(self.stages)
                    .with_report_every(0);
                let scenario = Scenario::new(Box::new(self.model), grid.clone());
                let result = solver.solve(&scenario, &config)?;

                let time = result.final_time();
                let exact = self
                    .model
                    .exact_solution(&grid, time)
                    .unwrap_or_else(|| grid.zeros());
                errors.push((time, normalized_l2_error(&result.field, &exact, step)?));
            }

            debug!("N = {points}: errors {errors:?}");
            samples.push(UnsteadySample {
                points,
                step,
                errors,
            });
        }

        info!(
            "Unsteady refinement: {} grids, horizons {:?}",
            samples.len(),
            self.horizons
        );
        Ok(samples)
    }
}
