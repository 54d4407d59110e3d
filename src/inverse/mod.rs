//! Inverse design of the control forcing
//!
//! Given a target profile, find the control vector `x` whose steady response
//! `T(x)` is closest to it in the discrete L2 sense:
//!
//! ```text
//! cost(x) = Σ_j (T_j(x) - Target_j)² · h
//! ```
//!
//! Two routes are offered:
//!
//! - [`InverseDesign::solve_linear`]: the forward map is affine in `x`, so the
//!   optimum solves a small normal-equation system built from the unit
//!   responses `T(e_c)`.
//! - [`InverseDesign::minimize`]: the forward solver is handed to a
//!   [`Minimizer`] as a black-box cost.
//!
//! Every forward solve is independent; with the `parallel` feature the unit
//! responses run on the rayon thread pool.

pub mod minimizer;

pub use minimizer::{MinimizeOptions, Minimizer, MinimizerOutcome, NelderMead};

use log::{debug, info, trace, warn};
use nalgebra::{DMatrix, DVector};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{AdrsError, Result};
use crate::models::GaussianControl;
use crate::physics::{AdrsCoefficients, Grid};
use crate::solver::{MultiStageSolver, Scenario, SimulationResult, Solver, SolverConfiguration};

/// Forward problem: control vector in, steady field out
///
/// # Example
///
/// ```rust
/// use adrs_rs::inverse::ControlProblem;
///
/// let problem = ControlProblem::default();
/// let result = problem.forward(30, &[1.0, 2.0, 3.0]).unwrap();
///
/// assert_eq!(result.field.len(), 30);
/// assert_eq!(result.field[0], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ControlProblem {
    /// Domain length L
    pub length: f64,
    pub coefficients: AdrsCoefficients,
    pub config: SolverConfiguration,
}

impl Default for ControlProblem {
    /// L = 1, K = 0.1, V = 1, λ = 1, eps = 1e-4, NT = 1000
    fn default() -> Self {
        Self {
            length: 1.0,
            coefficients: AdrsCoefficients::default(),
            config: SolverConfiguration::default(),
        }
    }
}

/// Field and cost of one forward solve
#[derive(Debug, Clone)]
pub struct ForwardSolution {
    pub cost: f64,
    pub field: DVector<f64>,
    pub result: SimulationResult,
}

impl ControlProblem {
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_coefficients(mut self, coefficients: AdrsCoefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_config(mut self, config: SolverConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Steady response to `control` on a grid of `points` nodes
    pub fn forward(&self, points: usize, control: &[f64]) -> Result<SimulationResult> {
        let grid = Grid::new(self.length, points)?;
        let model =
            GaussianControl::new(control.to_vec()).with_coefficients(self.coefficients);
        let scenario = Scenario::new(Box::new(model), grid);

        MultiStageSolver.solve(&scenario, &self.config)
    }

    /// Forward solve followed by the cost against `target`
    pub fn solve(
        &self,
        points: usize,
        control: &[f64],
        target: &DVector<f64>,
    ) -> Result<ForwardSolution> {
        // Checked before the solve so a bad target costs nothing
        if points >= 2 && target.len() != points {
            return Err(AdrsError::mismatch("target", points, target.len()));
        }

        let result = self.forward(points, control)?;
        let step = self.length / (points - 1) as f64;
        let cost = cost(step, &result.field, target)?;

        Ok(ForwardSolution {
            cost,
            field: result.field.clone(),
            result,
        })
    }
}

/// Discrete L2 misfit `Σ (field - target)² · h`
pub fn cost(step: f64, field: &DVector<f64>, target: &DVector<f64>) -> Result<f64> {
    if field.len() != target.len() {
        return Err(AdrsError::mismatch("target", field.len(), target.len()));
    }
    Ok((field - target).norm_squared() * step)
}

/// Forward entry point with the default problem: `(cost, field)`
///
/// # Errors
///
/// - [`AdrsError::InvalidGridSize`] when `points` is too small
/// - [`AdrsError::DimensionMismatch`] when `target.len() != points`
pub fn solve(points: usize, control: &[f64], target: &DVector<f64>) -> Result<(f64, DVector<f64>)> {
    let solution = ControlProblem::default().solve(points, control, target)?;
    Ok((solution.cost, solution.field))
}

/// Solve the symmetric normal equations `A x = b` by LU
///
/// # Errors
///
/// [`AdrsError::SingularSystem`] when `A` is singular or the solution is not
/// finite.
pub fn solve_normal_equations(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    let size = b.len();
    if a.nrows() != size || a.ncols() != size {
        return Err(AdrsError::mismatch("normal matrix", size, a.nrows()));
    }

    let solution = a
        .clone()
        .lu()
        .solve(b)
        .ok_or(AdrsError::SingularSystem { size })?;

    if solution.iter().any(|v| !v.is_finite()) {
        return Err(AdrsError::SingularSystem { size });
    }
    Ok(solution)
}

// =================================================================================================
// Least-squares driver
// =================================================================================================

/// Optimal control and its steady response
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub control: DVector<f64>,
    pub cost: f64,
    pub field: DVector<f64>,
}

/// Inverse-design driver over `basis_count` Gaussian bumps
#[derive(Debug, Clone, PartialEq)]
pub struct InverseDesign {
    pub problem: ControlProblem,
    pub basis_count: usize,
}

impl InverseDesign {
    pub fn new(problem: ControlProblem, basis_count: usize) -> Self {
        Self {
            problem,
            basis_count,
        }
    }

    /// Responses `T(e_c)` for every basis `c`
    pub fn unit_responses(&self, points: usize) -> Result<Vec<DVector<f64>>> {
        let unit = |c: usize| -> Result<DVector<f64>> {
            let control = GaussianControl::unit(self.basis_count, c);
            let result = self.problem.forward(points, control.amplitudes())?;
            trace!(
                "unit response {c}: {} iterations, res/res0 = {:.3e}",
                result.iterations(),
                result.relative_residual()
            );
            Ok(result.field)
        };

        #[cfg(feature = "parallel")]
        let responses = (0..self.basis_count).into_par_iter().map(unit).collect();

        #[cfg(not(feature = "parallel"))]
        let responses = (0..self.basis_count).map(unit).collect();

        responses
    }

    /// Normal equations `(A, B)` of the least-squares fit to `target`
    ///
    /// ```text
    /// B[c]   = (Target - T0) · T_c / (N-1)
    /// A[c,d] = T_c · T_d / (N-1)
    /// ```
    ///
    /// `T0` is the zero-control response. The inner products are normalised
    /// by N-1 rather than weighted by h; the solution is the same.
    pub fn normal_equations(
        &self,
        points: usize,
        target: &DVector<f64>,
    ) -> Result<(DMatrix<f64>, DVector<f64>)> {
        if points >= 2 && target.len() != points {
            return Err(AdrsError::mismatch("target", points, target.len()));
        }

        let baseline = self.problem.forward(points, &vec![0.0; self.basis_count])?;
        let responses = self.unit_responses(points)?;
        let scale = (points - 1) as f64;
        let misfit = target - &baseline.field;

        let n = self.basis_count;
        let mut a = DMatrix::zeros(n, n);
        let mut b = DVector::zeros(n);

        for c in 0..n {
            b[c] = misfit.dot(&responses[c]) / scale;
            for d in 0..=c {
                let value = responses[c].dot(&responses[d]) / scale;
                a[(c, d)] = value;
                a[(d, c)] = value;
            }
        }

        Ok((a, b))
    }

    /// Least-squares optimal control, checked by one more forward solve
    pub fn solve_linear(&self, points: usize, target: &DVector<f64>) -> Result<DesignOutcome> {
        let (a, b) = self.normal_equations(points, target)?;
        let control = solve_normal_equations(&a, &b)?;
        debug!("normal-equation control: {:?}", control.as_slice());

        let check = self.problem.solve(points, control.as_slice(), target)?;
        info!(
            "Inverse design ({} bases, N = {points}): cost = {:.6e}",
            self.basis_count, check.cost
        );

        Ok(DesignOutcome {
            control,
            cost: check.cost,
            field: check.field,
        })
    }

    /// Hand the forward cost to `minimizer`, starting from `x0`
    ///
    /// A forward solve that fails counts as an infinite cost.
    pub fn minimize<M: Minimizer>(
        &self,
        points: usize,
        target: &DVector<f64>,
        minimizer: &M,
        x0: &[f64],
    ) -> Result<(MinimizerOutcome, DesignOutcome)> {
        if x0.len() != self.basis_count {
            return Err(AdrsError::mismatch("initial control", self.basis_count, x0.len()));
        }
        if points >= 2 && target.len() != points {
            return Err(AdrsError::mismatch("target", points, target.len()));
        }

        let objective = |x: &[f64]| match self.problem.solve(points, x, target) {
            Ok(solution) => solution.cost,
            Err(error) => {
                warn!("forward solve failed during minimization: {error}");
                f64::INFINITY
            }
        };

        let outcome = minimizer.minimize(&objective, x0)?;
        info!(
            "{}: cost {:.6e} after {} iterations ({} evaluations, converged: {})",
            minimizer.name(),
            outcome.fun,
            outcome.iterations,
            outcome.nfev,
            outcome.converged
        );

        let check = self.problem.solve(points, &outcome.x, target)?;
        let design = DesignOutcome {
            control: DVector::from_column_slice(&outcome.x),
            cost: check.cost,
            field: check.field,
        };
        Ok((outcome, design))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tight_problem() -> ControlProblem {
        ControlProblem::default().with_config(SolverConfiguration::iterative(1e-10, 50_000))
    }

    #[test]
    fn test_cost_is_weighted_squared_misfit() {
        let field = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let target = DVector::from_vec(vec![0.0, 0.0, 0.0]);
        assert_relative_eq!(cost(0.5, &field, &target).unwrap(), 2.5);
    }

    #[test]
    fn test_cost_length_mismatch() {
        let field = DVector::zeros(3);
        let target = DVector::zeros(4);
        assert!(matches!(
            cost(0.1, &field, &target),
            Err(AdrsError::DimensionMismatch { expected: 3, found: 4, .. })
        ));
    }

    #[test]
    fn test_solve_rejects_short_target() {
        let target = DVector::zeros(10);
        let error = solve(12, &[1.0], &target).unwrap_err();
        assert!(matches!(error, AdrsError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_solve_rejects_tiny_grid() {
        let target = DVector::zeros(2);
        assert!(matches!(
            solve(2, &[1.0], &target),
            Err(AdrsError::InvalidGridSize { .. })
        ));
    }

    #[test]
    fn test_empty_control_is_zero_forcing() {
        let target = DVector::zeros(20);
        let (cost, field) = solve(20, &[], &target).unwrap();
        assert_eq!(cost, 0.0);
        assert!(field.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normal_matrix_is_symmetric() {
        let design = InverseDesign::new(tight_problem(), 3);
        let target = DVector::from_element(25, 0.1);
        let (a, b) = design.normal_equations(25, &target).unwrap();

        assert_eq!(a.shape(), (3, 3));
        assert_eq!(b.len(), 3);
        for c in 0..3 {
            assert!(a[(c, c)] > 0.0);
            for d in 0..3 {
                assert_eq!(a[(c, d)], a[(d, c)]);
            }
        }
    }

    #[test]
    fn test_linear_design_recovers_reachable_target() {
        let problem = tight_problem();
        let target = problem.forward(30, &[1.0, 2.0, 3.0]).unwrap().field;
        let design = InverseDesign::new(problem, 3);

        let outcome = design.solve_linear(30, &target).unwrap();

        assert!(outcome.cost < 1e-10, "cost = {}", outcome.cost);
        assert_eq!(outcome.control.len(), 3);
    }

    #[test]
    fn test_singular_system() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        assert!(matches!(
            solve_normal_equations(&a, &b),
            Err(AdrsError::SingularSystem { size: 2 })
        ));
    }

    #[test]
    fn test_normal_equation_solution() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![3.0, 5.0]);
        let x = solve_normal_equations(&a, &b).unwrap();

        assert_relative_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_minimize_rejects_wrong_guess_length() {
        let design = InverseDesign::new(ControlProblem::default(), 2);
        let target = DVector::zeros(10);
        let result = design.minimize(10, &target, &NelderMead::default(), &[0.0]);
        assert!(matches!(result, Err(AdrsError::DimensionMismatch { .. })));
    }
}
