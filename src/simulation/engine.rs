//! Simulation driver: one scenario, one integrator order
//!
//! Owns the body list for the whole run. Moves it into the center-of-mass
//! frame, freezes the conservation baseline, steps the integrator, stops
//! when any pair separates beyond the threshold and samples diagnostics
//! every `output_interval`.

use anyhow::{ensure, Result};

use crate::simulation::diagnostics::{
    BodySnapshot, ConservationBaseline, DiagnosticRecord, DiagnosticSink, DriftStatistics,
};
use crate::simulation::forces::{compute_separations, total_energy, NewtonianGravity};
use crate::simulation::integrator::SymplecticIntegrator;
use crate::simulation::params::SimulationConfig;
use crate::simulation::states::{remove_com_drift, Body};

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub order: usize,
    pub steps_taken: usize, // includes the terminating step
    pub elapsed_time: f64,
    pub terminated_early: bool,
    pub records_emitted: usize,
    pub statistics: DriftStatistics,
}

#[derive(Debug, Clone)]
pub struct SimulationDriver {
    config: SimulationConfig,
    integrator: SymplecticIntegrator,
    gravity: NewtonianGravity,
    bodies: Vec<Body>,
    baseline: ConservationBaseline,
    time: f64,
    next_output_time: f64,
    finished: bool, // set once `run` has started
}

impl SimulationDriver {
    /// Validate the configuration and order, then prepare the bodies:
    /// subtract the COM velocity and capture the baseline
    pub fn new(config: SimulationConfig, order: usize, mut bodies: Vec<Body>) -> Result<Self> {
        config.validate()?;
        let integrator = SymplecticIntegrator::new(order)?;

        remove_com_drift(&mut bodies);
        let baseline = ConservationBaseline::capture(&bodies);

        Ok(Self {
            config,
            integrator,
            gravity: NewtonianGravity,
            bodies,
            baseline,
            time: 0.0,
            next_output_time: 0.0,
            finished: false,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn baseline(&self) -> &ConservationBaseline {
        &self.baseline
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Run every integration step (or until the separation guard trips),
    /// sending diagnostics to `sink`. A sink error aborts the run.
    ///
    /// A driver runs once; calling `run` again is an error and leaves the
    /// final state untouched.
    pub fn run(&mut self, sink: &mut dyn DiagnosticSink) -> Result<RunOutcome> {
        ensure!(!self.finished, "simulation already ran to t = {}", self.time);
        self.finished = true;

        let mut statistics = DriftStatistics::new(self.baseline.energy);
        let mut records_emitted = 0;
        let mut steps_taken = 0;
        let mut terminated_early = false;

        // t = 0 sample
        self.emit(sink, &mut statistics)?;
        records_emitted += 1;

        for _ in 0..self.config.num_integration_steps {
            self.time += self.config.dt;
            self.integrator.step(&mut self.bodies, self.config.dt, &self.gravity);
            steps_taken += 1;

            let separations = compute_separations(&self.bodies);
            if separations.any_pair_beyond(self.config.proximity_threshold) {
                terminated_early = true;
                break;
            }

            if self.time >= self.next_output_time {
                self.emit(sink, &mut statistics)?;
                records_emitted += 1;
            }
        }

        Ok(RunOutcome {
            order: self.integrator.order(),
            steps_taken,
            elapsed_time: self.time,
            terminated_early,
            records_emitted,
            statistics,
        })
    }

    /// Build and send one record, then schedule the next sample one
    /// interval after the current time
    fn emit(&mut self, sink: &mut dyn DiagnosticSink, statistics: &mut DriftStatistics) -> Result<()> {
        let energy = total_energy(&self.bodies);
        statistics.observe(&self.bodies, energy);

        let record = DiagnosticRecord {
            time: self.time,
            d_momentum: self.baseline.momentum_drift(&self.bodies),
            d_energy: self.baseline.energy_drift(energy),
            bodies: self.bodies.iter().map(BodySnapshot::from).collect(),
        };
        sink.record(&record)?;

        self.next_output_time = self.time + self.config.output_interval;
        Ok(())
    }
}
