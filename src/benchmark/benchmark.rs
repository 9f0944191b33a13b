use std::time::Instant;

use anyhow::Result;

use crate::simulation::diagnostics::{DiagnosticRecord, DiagnosticSink};
use crate::simulation::engine::SimulationDriver;
use crate::simulation::forces::{compute_forces_and_potential, compute_separations};
use crate::simulation::params::SimulationConfig;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec3};

/// Keeps only the most recent record
#[derive(Default)]
struct LatestRecord(Option<DiagnosticRecord>);

impl DiagnosticSink for LatestRecord {
    fn record(&mut self, record: &DiagnosticRecord) -> Result<()> {
        self.0 = Some(record.clone());
        Ok(())
    }
}

/// Run `scenario` once per order, timing each run without writing output
pub fn bench_orders(scenario: &Scenario, config: &SimulationConfig, orders: &[usize]) -> Result<()> {
    for &order in orders {
        let mut driver = SimulationDriver::new(config.clone(), order, scenario.bodies.clone())?;
        let mut latest = LatestRecord::default();

        let t0 = Instant::now();
        let outcome = driver.run(&mut latest)?;
        let seconds = t0.elapsed().as_secs_f64();

        let (final_d_energy, final_d_momentum) = latest
            .0
            .map(|r| (r.d_energy, r.d_momentum))
            .unwrap_or((0.0, NVec3::zeros()));

        println!(
            "{:>24} order {order}: {:8.4} s, {:7} steps, dE = {:+.3e}, |dP| = {:.3e}{}",
            scenario.name,
            seconds,
            outcome.steps_taken,
            final_d_energy,
            final_d_momentum.norm(),
            if outcome.terminated_early { " (terminated early)" } else { "" }
        );
    }

    Ok(())
}

/// Time one separation + force evaluation for growing N
pub fn bench_forces() -> Result<()> {
    let ns = [25, 50, 100, 200, 400, 800];

    for n in ns {
        // deterministic positions, no rand needed
        let bodies = (0..n)
            .map(|i| {
                let i_f = i as f64;
                let x = NVec3::new(
                    (i_f * 0.37).sin() * 5.0 + i_f * 1.0e-3,
                    (i_f * 0.13).cos() * 5.0,
                    (i_f * 0.07).sin() * 5.0,
                );
                Body::new(i.to_string(), 1.0, x, NVec3::zeros())
            })
            .collect::<Result<Vec<_>>>()?;

        // Warm up
        let seps = compute_separations(&bodies);
        compute_forces_and_potential(&bodies, &seps);

        let t0 = Instant::now();
        let seps = compute_separations(&bodies);
        let field = compute_forces_and_potential(&bodies, &seps);
        let elapsed = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, forces = {elapsed:10.6} s, potential = {:+.6e}", field.potential);
    }

    Ok(())
}
