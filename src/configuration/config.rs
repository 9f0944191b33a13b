//! Run configuration loaded from YAML.
//!
//! Every field is optional; anything missing falls back to the defaults the
//! command-line tool has always used. The number of output samples, the
//! time step and the scenario file come from the command line, so a
//! `RunConfig` only carries the knobs around them.
//!
//! # YAML format
//!
//! ```yaml
//! output_interval: 0.05       # time between diagnostic samples
//! proximity_threshold: 100.0  # stop a run once any pair is farther apart
//! max_dt: 0.05                # largest accepted time step
//! orders: [1, 2, 3, 4]        # integrator orders to run per scenario
//! output_dir: position_files  # root directory for the text output
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::simulation::integrator::SUPPORTED_ORDERS;
use crate::simulation::params::{SimulationConfig, DEFAULT_OUTPUT_INTERVAL, DEFAULT_PROXIMITY_THRESHOLD};

/// Largest time step accepted unless the config raises it
pub const DEFAULT_MAX_DT: f64 = 0.05;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub output_interval: f64, // diagnostic cadence in time units
    pub proximity_threshold: f64, // separation bound that ends a run
    pub max_dt: f64, // cap on the command-line time step
    pub orders: Vec<usize>, // integrator orders, each in 1..=4
    pub output_dir: PathBuf, // <output_dir>/<order>/<scenario>.txt
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_interval: DEFAULT_OUTPUT_INTERVAL,
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            max_dt: DEFAULT_MAX_DT,
            orders: SUPPORTED_ORDERS.collect(),
            output_dir: PathBuf::from("position_files"),
        }
    }
}

impl RunConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let cfg: RunConfig = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.orders.is_empty(), "at least one integrator order is required");
        for &order in &self.orders {
            ensure!(
                SUPPORTED_ORDERS.contains(&order),
                "unsupported integrator order {order}; expected {}..={}",
                SUPPORTED_ORDERS.start(),
                SUPPORTED_ORDERS.end()
            );
        }
        ensure!(self.output_interval > 0.0, "output_interval must be positive");
        ensure!(self.proximity_threshold > 0.0, "proximity_threshold must be positive");
        ensure!(self.max_dt > 0.0, "max_dt must be positive");
        Ok(())
    }

    /// Combine with the command-line sample count and time step
    pub fn simulation_config(&self, num_output_samples: usize, dt: f64) -> Result<SimulationConfig> {
        ensure!(dt <= self.max_dt, "maximum dt is {}, got {dt}", self.max_dt);
        let config = SimulationConfig::new(num_output_samples, dt)
            .with_output_interval(self.output_interval)
            .with_proximity_threshold(self.proximity_threshold);
        config.validate()?;
        Ok(config)
    }
}
