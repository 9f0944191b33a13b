use symsim::{load_scenarios, RunConfig, SimulationDriver, TextFileSink};
use symsim::{bench_forces, bench_orders};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Integrate every scenario in INPUT_FILE with symplectic integrators of
/// orders 1 to 4 and write conservation diagnostics per run
#[derive(Parser, Debug)]
#[command(version, allow_negative_numbers = true)]
struct Args {
    /// Number of output intervals to simulate
    num_output_samples: usize,

    /// Integration time step
    dt: f64,

    /// Scenario description file
    input_file: PathBuf,

    /// YAML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory for the diagnostic files (overrides the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Time each order instead of writing diagnostic files
    #[arg(long)]
    bench: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help / --version land here too and are not failures
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let start = Instant::now();

    let mut run_cfg = match &args.config {
        Some(path) => RunConfig::from_yaml_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = args.output_dir {
        run_cfg.output_dir = dir;
    }

    // reject a bad dt before touching the input file
    let config = run_cfg.simulation_config(args.num_output_samples, args.dt)?;
    let scenarios = load_scenarios(&args.input_file)?;

    println!("Found {} scenarios in {}", scenarios.len(), args.input_file.display());
    println!("Will simulate for {} time units", config.total_time);
    println!("Using {} integration steps with dt={}", config.num_integration_steps, config.dt);

    if args.bench {
        for scenario in &scenarios {
            bench_orders(scenario, &config, &run_cfg.orders)?;
        }
        bench_forces()?;
        println!("\nTotal run time: {:.2} seconds", start.elapsed().as_secs_f64());
        return Ok(());
    }

    for scenario in &scenarios {
        for &order in &run_cfg.orders {
            println!("\nProcessing scenario: {} with order {order}", scenario.name);

            let mut driver = SimulationDriver::new(config.clone(), order, scenario.bodies.clone())
                .with_context(|| format!("failed to set up scenario `{}`", scenario.name))?;
            let mut sink = TextFileSink::create(&run_cfg.output_dir, order, &scenario.name)?;
            let outcome = driver.run(&mut sink)?;
            let path = sink.finish()?;

            if outcome.terminated_early {
                println!(
                    "Terminated early at t = {:.6} (step {}): separation exceeded {}",
                    outcome.elapsed_time, outcome.steps_taken, config.proximity_threshold
                );
            }

            let stats = &outcome.statistics;
            let spread = stats.momentum_spread();
            println!("Energy deviation: {:.6e}", stats.energy_deviation());
            println!(
                "Momentum spread (x, y, z): {:.6e} {:.6e} {:.6e}",
                spread.x, spread.y, spread.z
            );
            println!("Data saved to {} ({} samples)", path.display(), outcome.records_emitted);
        }
    }

    println!("\nTotal run time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
