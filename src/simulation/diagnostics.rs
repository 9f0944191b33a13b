//! Conservation diagnostics emitted while a run advances
//!
//! The driver compares the live system against a `ConservationBaseline`
//! captured once in the center-of-mass frame and hands each sample to a
//! `DiagnosticSink`. Formatting and storage belong to the sink.

use anyhow::Result;

use crate::simulation::forces::total_energy;
use crate::simulation::states::{total_momentum, Body, NVec3};

/// Label, position and velocity of one body at a sampled time
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub label: String,
    pub x: NVec3,
    pub v: NVec3,
}

impl From<&Body> for BodySnapshot {
    fn from(b: &Body) -> Self {
        Self {
            label: b.label.clone(),
            x: b.x,
            v: b.v,
        }
    }
}

/// One diagnostic sample
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticRecord {
    pub time: f64, // elapsed simulation time
    pub d_momentum: NVec3, // sum over bodies of (p - p0)
    pub d_energy: f64, // E - E0
    pub bodies: Vec<BodySnapshot>,
}

/// Destination for diagnostic records
pub trait DiagnosticSink {
    fn record(&mut self, record: &DiagnosticRecord) -> Result<()>;
}

/// Collect records in memory
impl DiagnosticSink for Vec<DiagnosticRecord> {
    fn record(&mut self, record: &DiagnosticRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Per-body momentum and total energy at the start of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ConservationBaseline {
    pub momentum: Vec<NVec3>,
    pub energy: f64,
}

impl ConservationBaseline {
    pub fn capture(bodies: &[Body]) -> Self {
        Self {
            momentum: bodies.iter().map(|b| b.momentum()).collect(),
            energy: total_energy(bodies),
        }
    }

    /// Componentwise sum of (current - initial) momentum over all bodies
    pub fn momentum_drift(&self, bodies: &[Body]) -> NVec3 {
        bodies
            .iter()
            .zip(self.momentum.iter())
            .fold(NVec3::zeros(), |acc, (b, p0)| acc + (b.momentum() - p0))
    }

    pub fn energy_drift(&self, energy: f64) -> f64 {
        energy - self.energy
    }
}

/// End-of-run summary over all sampled times
#[derive(Debug, Clone, PartialEq)]
pub struct DriftStatistics {
    pub initial_energy: f64,
    min_energy: f64,
    max_energy: f64,
    min_momentum: NVec3,
    max_momentum: NVec3,
    pub samples: usize,
}

impl DriftStatistics {
    pub fn new(initial_energy: f64) -> Self {
        Self {
            initial_energy,
            min_energy: f64::INFINITY,
            max_energy: f64::NEG_INFINITY,
            min_momentum: NVec3::repeat(f64::INFINITY),
            max_momentum: NVec3::repeat(f64::NEG_INFINITY),
            samples: 0,
        }
    }

    pub fn observe(&mut self, bodies: &[Body], energy: f64) {
        let p = total_momentum(bodies);
        self.min_energy = self.min_energy.min(energy);
        self.max_energy = self.max_energy.max(energy);
        self.min_momentum = self.min_momentum.inf(&p);
        self.max_momentum = self.max_momentum.sup(&p);
        self.samples += 1;
    }

    /// |(max E - min E) / E0|, zero before any sample.
    /// Falls back to the absolute spread max E - min E when E0 is exactly zero.
    pub fn energy_deviation(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        let spread = self.max_energy - self.min_energy;
        if self.initial_energy == 0.0 {
            return spread;
        }
        (spread / self.initial_energy).abs()
    }

    /// Per-axis max - min of the total momentum
    pub fn momentum_spread(&self) -> NVec3 {
        if self.samples == 0 {
            return NVec3::zeros();
        }
        self.max_momentum - self.min_momentum
    }
}
