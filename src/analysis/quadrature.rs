//! Riemann and Lebesgue quadrature
//!
//! Three ways to integrate `f` over `[a, b]`:
//!
//! - [`riemann`]: uniform partition of the domain (left, right, midpoint or
//!   trapezoid sums)
//! - [`lebesgue`]: uniform partition of the range, each level weighted by the
//!   measure of its level set
//! - [`adaptive_lebesgue`]: trapezoid sums on a partition whose local step
//!   follows the metric `|f''| / ε`, refined pass after pass

use std::fmt;

use log::debug;

use crate::error::{AdrsError, Result};

/// Sampling rule of a Riemann sum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiemannRule {
    Left,
    Right,
    Midpoint,
    Trapezoid,
}

impl fmt::Display for RiemannRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RiemannRule::Left => "left",
            RiemannRule::Right => "right",
            RiemannRule::Midpoint => "midpoint",
            RiemannRule::Trapezoid => "trapezoid",
        };
        write!(f, "{name}")
    }
}

fn check_interval(a: f64, b: f64) -> Result<()> {
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(AdrsError::parameter(
            "interval",
            format!("expected finite a < b, got [{a}, {b}]"),
        ));
    }
    Ok(())
}

/// Riemann sum of `f` on `intervals` equal sub-intervals of `[a, b]`
///
/// # Example
///
/// ```rust
/// use adrs_rs::analysis::{RiemannRule, riemann};
///
/// let integral = riemann(|x| x * x, 0.0, 1.0, 100, RiemannRule::Midpoint).unwrap();
/// assert!((integral - 1.0 / 3.0).abs() < 1e-4);
/// ```
pub fn riemann<F>(f: F, a: f64, b: f64, intervals: usize, rule: RiemannRule) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if intervals == 0 {
        return Err(AdrsError::parameter("intervals", "at least one sub-interval is needed"));
    }
    check_interval(a, b)?;

    let dx = (b - a) / intervals as f64;
    let node = |i: usize| a + dx * i as f64;

    let sum: f64 = match rule {
        RiemannRule::Left => (0..intervals).map(|i| f(node(i))).sum(),
        RiemannRule::Right => (1..=intervals).map(|i| f(node(i))).sum(),
        RiemannRule::Midpoint => (0..intervals).map(|i| f(node(i) + 0.5 * dx)).sum(),
        RiemannRule::Trapezoid => {
            let inner: f64 = (1..intervals).map(|i| f(node(i))).sum();
            inner + 0.5 * (f(a) + f(b))
        }
    };

    Ok(sum * dx)
}

/// Lebesgue sum with `levels` uniform levels over the range of `f`
///
/// `f` is sampled at `samples` equidistant points; the measure of
/// `{x : y_i ≤ f(x) < y_{i+1}}` is the number of samples in that band times
/// the sample spacing, and the band contributes `y_i` times its measure.
pub fn lebesgue<F>(f: F, a: f64, b: f64, levels: usize, samples: usize) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if levels == 0 {
        return Err(AdrsError::parameter("levels", "at least one level is needed"));
    }
    if samples < 2 {
        return Err(AdrsError::parameter("samples", "at least two samples are needed"));
    }
    check_interval(a, b)?;

    let spacing = (b - a) / (samples - 1) as f64;
    let values: Vec<f64> = (0..samples).map(|i| f(a + spacing * i as f64)).collect();
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(AdrsError::parameter("f", format!("non-finite sample {bad}")));
    }

    let y_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let band = (y_max - y_min) / levels as f64;
    if band == 0.0 {
        return Ok(y_min * (b - a));
    }

    let mut counts = vec![0_usize; levels];
    for &y in &values {
        // y_max itself falls outside every half-open band
        let index = ((y - y_min) / band).floor() as usize;
        if let Some(count) = counts.get_mut(index) {
            *count += 1;
        }
    }

    Ok(counts
        .iter()
        .enumerate()
        .map(|(i, &count)| (y_min + band * i as f64) * count as f64 * spacing)
        .sum())
}

// =================================================================================================
// Adaptive Lebesgue
// =================================================================================================

/// Parameters of [`adaptive_lebesgue`]
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveOptions {
    /// Metric scale ε of the first pass
    pub epsilon: f64,
    /// Factor applied to ε after every pass
    pub reduction: f64,
    /// Stop when two successive passes differ by less than this
    pub tolerance: f64,
    pub max_passes: usize,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            epsilon: 0.9,
            reduction: 0.5,
            tolerance: 1e-3,
            max_passes: 10,
        }
    }
}

/// One pass of the adaptive integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LebesguePass {
    pub integral: f64,
    /// Number of sub-intervals of the adapted partition
    pub intervals: usize,
    pub epsilon: f64,
}

/// History of an adaptive integration
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveLebesgue {
    pub passes: Vec<LebesguePass>,
    pub converged: bool,
}

impl AdaptiveLebesgue {
    /// Integral of the last pass
    pub fn integral(&self) -> f64 {
        self.passes.last().map_or(0.0, |pass| pass.integral)
    }
}

/// Metric-driven trapezoid integration
///
/// The local step is `h = min(1/sqrt(m), b - x)` with
///
/// ```text
/// m = min(max(|f''(x)| / ε, 1/h_max²), 1/h_min²)
/// h_min = (b - a)/100,    h_max = (b - a)/3
/// ```
///
/// so steps shrink where `f` curves. Each pass multiplies ε by
/// `options.reduction`.
pub fn adaptive_lebesgue<F, G>(
    f: F,
    f_xx: G,
    a: f64,
    b: f64,
    options: &AdaptiveOptions,
) -> Result<AdaptiveLebesgue>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    check_interval(a, b)?;
    if !(options.epsilon.is_finite() && options.epsilon > 0.0) {
        return Err(AdrsError::parameter("epsilon", "must be positive and finite"));
    }
    if !(options.reduction > 0.0 && options.reduction <= 1.0) {
        return Err(AdrsError::parameter("reduction", "must lie in (0, 1]"));
    }
    if options.max_passes == 0 {
        return Err(AdrsError::parameter("max_passes", "at least one pass is needed"));
    }

    let h_min = (b - a) / 100.0;
    let h_max = (b - a) / 3.0;
    let mut epsilon = options.epsilon;
    let mut passes: Vec<LebesguePass> = Vec::with_capacity(options.max_passes);

    for _ in 0..options.max_passes {
        let mut x = a;
        let mut y = f(x);
        let mut integral = 0.0;
        let mut intervals = 0;

        while x < b {
            let metric = (f_xx(x).abs() / epsilon)
                .max(1.0 / (h_max * h_max))
                .min(1.0 / (h_min * h_min));
            let h = (1.0 / metric.sqrt()).min(b - x);
            let next = if h >= b - x { b } else { x + h };

            let y_next = f(next);
            integral += (next - x) * 0.5 * (y + y_next);
            intervals += 1;
            x = next;
            y = y_next;
        }

        let pass = LebesguePass {
            integral,
            intervals,
            epsilon,
        };
        debug!(
            "adaptive pass: ε = {epsilon:.3e}, {intervals} intervals, integral = {integral:.8}"
        );

        let settled = passes
            .last()
            .is_some_and(|previous| (previous.integral - integral).abs() < options.tolerance);
        passes.push(pass);
        if settled {
            return Ok(AdaptiveLebesgue {
                passes,
                converged: true,
            });
        }

        epsilon *= options.reduction;
    }

    Ok(AdaptiveLebesgue {
        passes,
        converged: false,
    })
}
