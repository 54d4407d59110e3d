//! Unsteady ADRS: time-accurate multi-stage stepping
//!
//! Marches the oscillating manufactured problem to t = 0.5 and t = 1 on
//! refined grids and prints the normalised L2 error against the exact
//! solution.

use adrs_rs::analysis::UnsteadyRefinement;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    println!("═══════════════════════════════════════════════════════");
    println!("  Unsteady ADRS - Mesh Refinement in Time");
    println!("═══════════════════════════════════════════════════════\n");

    let study = UnsteadyRefinement::default().with_runs(10);

    println!("Grids:    {:?}", study.grid_sizes());
    println!("Horizons: {:?}", study.horizons);
    println!("Stages:   {}\n", study.stages);

    let samples = study.run()?;

    println!("{:>6} {:>10} {:>14} {:>14}", "N", "h", "err(t=0.5)", "err(t=1)");
    for sample in &samples {
        let errors: Vec<String> = sample
            .errors
            .iter()
            .map(|(_, error)| format!("{error:>14.6e}"))
            .collect();
        println!("{:>6} {:>10.5} {}", sample.points, sample.step, errors.join(" "));
    }

    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        for (horizon, (coarse, fine)) in first.errors.iter().zip(&last.errors).enumerate() {
            println!(
                "\nHorizon {}: error reduced by {:.1}x (reached t = {:.4})",
                study.horizons[horizon],
                coarse.1 / fine.1,
                fine.0
            );
        }
    }

    Ok(())
}
