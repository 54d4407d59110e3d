//! Riemann, Lebesgue and adaptive Lebesgue integration
//!
//! Integrates a smooth function with a narrow Gaussian bump on [0, 1]:
//!
//! ```text
//! f(x) = x²/2 + 10x + 3 sin(4πx) + 10 exp(-100 (x - 1/2)²)
//! ```

use adrs_rs::analysis::{AdaptiveOptions, RiemannRule, adaptive_lebesgue, lebesgue, riemann};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::f64::consts::PI;

fn f(x: f64) -> f64 {
    0.5 * x * x + 10.0 * x + 3.0 * (4.0 * PI * x).sin() + 10.0 * (-100.0 * (x - 0.5).powi(2)).exp()
}

fn f_xx(x: f64) -> f64 {
    let r = x - 0.5;
    1.0 - 48.0 * PI * PI * (4.0 * PI * x).sin() + (400_000.0 * r * r - 2000.0) * (-100.0 * r * r).exp()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    // erf(5) = 1 to double precision
    let exact = 1.0 / 6.0 + 5.0 + PI.sqrt();
    println!("Exact integral: {exact:.10}\n");

    println!("Riemann sums");
    for intervals in [10, 100, 1000] {
        for rule in [RiemannRule::Left, RiemannRule::Midpoint, RiemannRule::Trapezoid] {
            let value = riemann(f, 0.0, 1.0, intervals, rule)?;
            println!("  n = {intervals:>5} {rule:>10}: error {:.3e}", (value - exact).abs());
        }
    }

    println!("\nLebesgue sums (10 000 samples)");
    for levels in [10, 100, 1000] {
        let value = lebesgue(f, 0.0, 1.0, levels, 10_000)?;
        println!("  {levels:>5} levels: error {:.3e}", (value - exact).abs());
    }

    println!("\nAdaptive Lebesgue");
    let adaptive = adaptive_lebesgue(f, f_xx, 0.0, 1.0, &AdaptiveOptions::default())?;
    for (pass, result) in adaptive.passes.iter().enumerate() {
        println!(
            "  pass {pass}: ε = {:.4}, {:>4} intervals, error {:.3e}",
            result.epsilon,
            result.intervals,
            (result.integral - exact).abs()
        );
    }
    println!("  converged: {}", adaptive.converged);

    Ok(())
}
