//! Run-length and sampling parameters for one simulation
//!
//! `SimulationConfig` holds:
//! - the number of output samples and the output interval (which together
//!   fix the simulated duration),
//! - the integration step `dt`,
//! - the separation bound that stops a diverging run,
//! - the derived total time and number of integration steps

use anyhow::{ensure, Result};

pub const DEFAULT_OUTPUT_INTERVAL: f64 = 0.05;
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_output_samples: usize, // output intervals to simulate
    pub dt: f64, // integration step
    pub proximity_threshold: f64, // max pair separation before stopping
    pub output_interval: f64, // diagnostic cadence
    pub total_time: f64, // num_output_samples * output_interval
    pub num_integration_steps: usize, // floor(total_time / dt)
}

impl SimulationConfig {
    pub fn new(num_output_samples: usize, dt: f64) -> Self {
        Self::build(num_output_samples, dt, DEFAULT_PROXIMITY_THRESHOLD, DEFAULT_OUTPUT_INTERVAL)
    }

    pub fn with_output_interval(self, output_interval: f64) -> Self {
        Self::build(self.num_output_samples, self.dt, self.proximity_threshold, output_interval)
    }

    pub fn with_proximity_threshold(self, proximity_threshold: f64) -> Self {
        Self::build(self.num_output_samples, self.dt, proximity_threshold, self.output_interval)
    }

    fn build(num_output_samples: usize, dt: f64, proximity_threshold: f64, output_interval: f64) -> Self {
        let total_time = num_output_samples as f64 * output_interval;
        // float -> usize casts saturate, so a bad dt cannot wrap
        let num_integration_steps = (total_time / dt).floor() as usize;
        Self {
            num_output_samples,
            dt,
            proximity_threshold,
            output_interval,
            total_time,
            num_integration_steps,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.dt.is_finite() && self.dt > 0.0, "time step must be positive, got {}", self.dt);
        ensure!(
            self.output_interval.is_finite() && self.output_interval > 0.0,
            "output interval must be positive, got {}",
            self.output_interval
        );
        ensure!(
            self.proximity_threshold > 0.0,
            "proximity threshold must be positive, got {}",
            self.proximity_threshold
        );
        Ok(())
    }
}
