//! Derivative-free minimization of a black-box cost
//!
//! The inverse-design driver hands its forward solve to a [`Minimizer`] as a
//! plain `Fn(&[f64]) -> f64`. Any method fits behind the trait; the crate
//! ships the Nelder–Mead simplex.

// Indexed loops are clearer for simplex operations
#![allow(clippy::needless_range_loop)]

use log::debug;

use crate::error::{AdrsError, Result};

/// Options for multivariate minimization
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOptions {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Tolerance on the spread of cost values across the simplex
    pub f_tol: f64,
    /// Tolerance on the simplex diameter
    pub x_tol: f64,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            f_tol: 1e-8,
            x_tol: 1e-8,
        }
    }
}

/// Result of a minimization
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOutcome {
    /// Best point found
    pub x: Vec<f64>,
    /// Cost at `x`
    pub fun: f64,
    /// Number of iterations used
    pub iterations: usize,
    /// Number of cost evaluations
    pub nfev: usize,
    /// Whether the stopping tolerances were met
    pub converged: bool,
}

/// Minimizes a scalar cost over R^n
pub trait Minimizer {
    fn minimize(&self, cost: &dyn Fn(&[f64]) -> f64, x0: &[f64]) -> Result<MinimizerOutcome>;

    fn name(&self) -> &str;
}

// =================================================================================================
// Nelder–Mead
// =================================================================================================

/// Nelder–Mead simplex
///
/// Reflection 1, expansion 2, contraction 0.5, shrink 0.5. The initial
/// simplex perturbs each coordinate by 5% (or 0.00025 for zero entries).
///
/// # Example
///
/// ```rust
/// use adrs_rs::inverse::{Minimizer, NelderMead};
///
/// let bowl = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2);
/// let outcome = NelderMead::default().minimize(&bowl, &[0.0, 0.0]).unwrap();
///
/// assert!(outcome.converged);
/// assert!((outcome.x[0] - 1.0).abs() < 1e-3);
/// assert!((outcome.x[1] + 2.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NelderMead {
    pub options: MinimizeOptions,
}

impl NelderMead {
    const REFLECTION: f64 = 1.0;
    const EXPANSION: f64 = 2.0;
    const CONTRACTION: f64 = 0.5;
    const SHRINK: f64 = 0.5;

    pub fn new(options: MinimizeOptions) -> Self {
        Self { options }
    }

    fn sort(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
        *values = order.iter().map(|&i| values[i]).collect();
    }

    /// Point `centroid + coefficient · (target - centroid)`
    fn blend(centroid: &[f64], target: &[f64], coefficient: f64) -> Vec<f64> {
        centroid
            .iter()
            .zip(target)
            .map(|(c, t)| c + coefficient * (t - c))
            .collect()
    }
}

impl Minimizer for NelderMead {
    fn minimize(&self, cost: &dyn Fn(&[f64]) -> f64, x0: &[f64]) -> Result<MinimizerOutcome> {
        let n = x0.len();
        if n == 0 {
            return Err(AdrsError::parameter("x0", "empty initial guess"));
        }

        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        simplex.push(x0.to_vec());
        for i in 0..n {
            let mut vertex = x0.to_vec();
            vertex[i] += if x0[i].abs() < 1e-12 {
                0.00025
            } else {
                0.05 * x0[i].abs()
            };
            simplex.push(vertex);
        }

        let mut values: Vec<f64> = simplex.iter().map(|v| cost(v)).collect();
        let mut nfev = n + 1;

        for iteration in 0..self.options.max_iter {
            Self::sort(&mut simplex, &mut values);

            let spread = (values[n] - values[0]).abs();
            let diameter = simplex[1..]
                .iter()
                .map(|vertex| {
                    vertex
                        .iter()
                        .zip(&simplex[0])
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum::<f64>()
                        .sqrt()
                })
                .fold(0.0_f64, f64::max);

            if spread < self.options.f_tol && diameter < self.options.x_tol {
                debug!("{}: converged after {} iterations", self.name(), iteration + 1);
                return Ok(MinimizerOutcome {
                    x: simplex[0].clone(),
                    fun: values[0],
                    iterations: iteration + 1,
                    nfev,
                    converged: true,
                });
            }

            // Centroid of every vertex except the worst
            let mut centroid = vec![0.0; n];
            for vertex in &simplex[..n] {
                for j in 0..n {
                    centroid[j] += vertex[j] / n as f64;
                }
            }

            let reflected = Self::blend(&centroid, &simplex[n], -Self::REFLECTION);
            let f_reflected = cost(&reflected);
            nfev += 1;

            if f_reflected < values[0] {
                let expanded = Self::blend(&centroid, &reflected, Self::EXPANSION);
                let f_expanded = cost(&expanded);
                nfev += 1;

                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    values[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    values[n] = f_reflected;
                }
            } else if f_reflected < values[n - 1] {
                simplex[n] = reflected;
                values[n] = f_reflected;
            } else {
                let contracted = if f_reflected < values[n] {
                    Self::blend(&centroid, &reflected, Self::CONTRACTION)
                } else {
                    Self::blend(&centroid, &simplex[n], Self::CONTRACTION)
                };
                let f_contracted = cost(&contracted);
                nfev += 1;

                if f_contracted < values[n].min(f_reflected) {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    for i in 1..=n {
                        for j in 0..n {
                            simplex[i][j] =
                                simplex[0][j] + Self::SHRINK * (simplex[i][j] - simplex[0][j]);
                        }
                        values[i] = cost(&simplex[i]);
                        nfev += 1;
                    }
                }
            }
        }

        // Best point even if not converged
        Self::sort(&mut simplex, &mut values);
        Ok(MinimizerOutcome {
            x: simplex[0].clone(),
            fun: values[0],
            iterations: self.options.max_iter,
            nfev,
            converged: false,
        })
    }

    fn name(&self) -> &str {
        "Nelder-Mead"
    }
}
