//! Explicit Euler on u' = -λu: error against the time step
//!
//! Prints the L2 error of the solution and of its derivative for twenty
//! log-spaced steps between 1 and 1e-3, and the observed order.

use adrs_rs::analysis::{DecayProblem, convergence_order, log_spaced};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let problem = DecayProblem::default();
    println!(
        "u' = -{} u, u(0) = {}, t in [0, {}]\n",
        problem.rate, problem.initial, problem.horizon
    );

    let study = problem.error_study(&log_spaced(0.0, -3.0, 20))?;

    println!("{:>12} {:>14} {:>14}", "dt", "||u - u_h||", "||u' - u_h'||");
    for error in &study {
        println!(
            "{:>12.4e} {:>14.6e} {:>14.6e}",
            error.dt, error.l2_error, error.derivative_l2_error
        );
    }

    let dts: Vec<f64> = study.iter().map(|e| e.dt).collect();
    let errors: Vec<f64> = study.iter().map(|e| e.l2_error).collect();
    println!("\nObserved order: {:.3}", convergence_order(&dts, &errors)?);

    Ok(())
}
