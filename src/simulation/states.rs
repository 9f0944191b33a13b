//! Core state types for the N-body simulation.
//!
//! Defines the 3D `Body` (label, mass, position, velocity) and the
//! collection-level quantities the driver needs: total mass, total momentum,
//! kinetic energy and the center-of-mass velocity.

use anyhow::{ensure, Result};
use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub label: String, // identifier from the scenario file
    pub m: f64, // mass
    pub x: NVec3, // position
    pub v: NVec3, // velocity
}

impl Body {
    /// Build a body, rejecting masses that are zero, negative or not finite
    /// (velocity updates divide by the mass)
    pub fn new(label: impl Into<String>, m: f64, x: NVec3, v: NVec3) -> Result<Self> {
        let label = label.into();
        ensure!(
            m.is_finite() && m > 0.0,
            "body `{label}` has invalid mass {m}; mass must be positive"
        );
        Ok(Self { label, m, x, v })
    }

    /// 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn momentum(&self) -> NVec3 {
        self.v * self.m
    }

    /// Kick: v += coeff * dt * F / m
    pub fn kick(&mut self, dt: f64, force: &NVec3, coeff: f64) {
        self.v += coeff * dt * *force / self.m;
    }

    /// Drift: x += coeff * dt * v
    pub fn drift(&mut self, dt: f64, coeff: f64) {
        self.x += coeff * dt * self.v;
    }
}

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.m).sum()
}

pub fn total_momentum(bodies: &[Body]) -> NVec3 {
    bodies
        .iter()
        .map(|b| b.momentum())
        .fold(NVec3::zeros(), |acc, p| acc + p)
}

pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Mass-weighted mean velocity (total momentum / total mass).
/// Zero for an empty list.
pub fn com_velocity(bodies: &[Body]) -> NVec3 {
    let m = total_mass(bodies);
    if m == 0.0 {
        return NVec3::zeros();
    }
    total_momentum(bodies) / m
}

/// Shift every velocity into the center-of-mass frame
pub fn remove_com_drift(bodies: &mut [Body]) {
    let v_com = com_velocity(bodies);
    for b in bodies.iter_mut() {
        b.v -= v_com;
    }
}
