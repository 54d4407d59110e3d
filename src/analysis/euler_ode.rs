//! Explicit Euler on the decay equation `u' = -λu`
//!
//! The scheme `u_{n+1} = (1 - λ dt) u_n` is first order: halving dt halves
//! the L2 error of both the solution and its difference quotient, until dt
//! approaches the stability limit 2/λ.

use crate::error::{AdrsError, Result};

/// `u' = -rate · u`, `u(0) = initial`, on `[0, horizon]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayProblem {
    pub rate: f64,
    pub initial: f64,
    pub horizon: f64,
}

impl Default for DecayProblem {
    /// λ = 1, u0 = 1, one minute
    fn default() -> Self {
        Self {
            rate: 1.0,
            initial: 1.0,
            horizon: 60.0,
        }
    }
}

/// Explicit Euler trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

/// L2 errors of one time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerError {
    pub dt: f64,
    pub l2_error: f64,
    pub derivative_l2_error: f64,
}

impl DecayProblem {
    pub fn exact(&self, time: f64) -> f64 {
        self.initial * (-self.rate * time).exp()
    }

    /// March `floor(horizon / dt)` explicit Euler steps
    pub fn euler_explicit(&self, dt: f64) -> Result<Trajectory> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(AdrsError::parameter("dt", format!("must be positive, got {dt}")));
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(AdrsError::parameter("horizon", "must be positive and finite"));
        }

        let steps = (self.horizon / dt).floor() as usize;
        let factor = 1.0 - dt * self.rate;

        let times = (0..=steps).map(|n| n as f64 * dt).collect();
        let mut values = Vec::with_capacity(steps + 1);
        let mut u = self.initial;
        values.push(u);
        for _ in 0..steps {
            u *= factor;
            values.push(u);
        }

        Ok(Trajectory { times, values })
    }

    /// Errors of the solution and of its forward difference quotient
    ///
    /// ```text
    /// L2 = sqrt(Σ e_n² · dt / T)
    /// e'_n = (u_{n+1} - u_n)/dt + λ u_ex(t_n)
    /// ```
    pub fn errors(&self, dt: f64) -> Result<EulerError> {
        let trajectory = self.euler_explicit(dt)?;
        let weight = dt / self.horizon;

        let l2 = trajectory
            .times
            .iter()
            .zip(&trajectory.values)
            .map(|(&t, &u)| (u - self.exact(t)).powi(2))
            .sum::<f64>();

        let derivative = trajectory
            .values
            .windows(2)
            .zip(&trajectory.times)
            .map(|(pair, &t)| {
                let quotient = (pair[1] - pair[0]) / dt;
                (quotient + self.rate * self.exact(t)).powi(2)
            })
            .sum::<f64>();

        Ok(EulerError {
            dt,
            l2_error: (l2 * weight).sqrt(),
            derivative_l2_error: (derivative * weight).sqrt(),
        })
    }

    /// [`errors`](Self::errors) for every step in `dts`
    pub fn error_study(&self, dts: &[f64]) -> Result<Vec<EulerError>> {
        dts.iter().map(|&dt| self.errors(dt)).collect()
    }
}

/// `count` values from `10^start_exp` to `10^end_exp`, evenly spaced in log
///
/// ```rust
/// use adrs_rs::analysis::log_spaced;
///
/// let dts = log_spaced(0.0, -3.0, 4);
/// assert_eq!(dts.len(), 4);
/// assert!((dts[1] - 0.1).abs() < 1e-12);
/// ```
pub fn log_spaced(start_exp: f64, end_exp: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_exp)],
        _ => {
            let stride = (end_exp - start_exp) / (count - 1) as f64;
            (0..count)
                .map(|i| 10f64.powf(start_exp + stride * i as f64))
                .collect()
        }
    }
}
