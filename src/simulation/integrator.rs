//! Fixed-step symplectic integrators of orders 1 to 4
//!
//! Every order is the same kick-drift loop driven by a different
//! coefficient table:
//! - 1: symplectic Euler
//! - 2: Stormer-Verlet (kick-drift-kick)
//! - 3: Ruth's third-order scheme
//! - 4: Forest-Ruth, built from the cube root of two
//!
//! Forces are re-evaluated before every kick, so stage `k` always sees the
//! positions left behind by stage `k - 1`.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use anyhow::{bail, Result};

use super::forces::ForceEvaluator;
use super::states::Body;

/// Integrator orders with a coefficient table
pub const SUPPORTED_ORDERS: RangeInclusive<usize> = 1..=4;

/// Per-stage kick (velocity) and drift (position) weights.
/// Both sequences have one entry per stage and each sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    pub kick: Vec<f64>,
    pub drift: Vec<f64>,
}

impl Coefficients {
    pub fn stages(&self) -> usize {
        self.kick.len()
    }
}

static COEFFICIENTS: LazyLock<[Coefficients; 4]> = LazyLock::new(|| {
    let w = 2.0_f64.cbrt();
    let c_outer = 1.0 / (2.0 * (2.0 - w));
    let c_inner = (1.0 - w) / (2.0 * (2.0 - w));
    let d_outer = 1.0 / (2.0 - w);
    let d_inner = -w / (2.0 - w);

    [
        Coefficients {
            kick: vec![1.0],
            drift: vec![1.0],
        },
        Coefficients {
            kick: vec![0.5, 0.5],
            drift: vec![1.0, 0.0],
        },
        Coefficients {
            kick: vec![7.0 / 24.0, 3.0 / 4.0, -1.0 / 24.0],
            drift: vec![2.0 / 3.0, -2.0 / 3.0, 1.0],
        },
        Coefficients {
            kick: vec![c_outer, c_inner, c_inner, c_outer],
            drift: vec![d_outer, d_inner, d_outer, 0.0],
        },
    ]
});

/// Look up the coefficient table for `order`
pub fn coefficients(order: usize) -> Result<&'static Coefficients> {
    if !SUPPORTED_ORDERS.contains(&order) {
        bail!(
            "unsupported integrator order {order}; expected {}..={}",
            SUPPORTED_ORDERS.start(),
            SUPPORTED_ORDERS.end()
        );
    }
    Ok(&COEFFICIENTS[order - 1])
}

/// Advance `bodies` by one full step of length `dt`.
///
/// For each stage: evaluate forces at the current positions, kick every
/// velocity, then drift every position with the updated velocity.
pub fn symplectic_step(bodies: &mut [Body], dt: f64, coeffs: &Coefficients, forces: &dyn ForceEvaluator) {
    if bodies.is_empty() { // no bodies, return
        return;
    }

    for (&c, &d) in coeffs.kick.iter().zip(coeffs.drift.iter()) {
        let field = forces.evaluate(bodies);

        // Kick: v += c dt F / m
        for (b, f) in bodies.iter_mut().zip(field.forces.iter()) {
            b.kick(dt, f, c);
        }

        // Drift: x += d dt v
        for b in bodies.iter_mut() {
            b.drift(dt, d);
        }
    }
}

/// Stateless integrator bound to one order's coefficient table
#[derive(Debug, Clone, Copy)]
pub struct SymplecticIntegrator {
    order: usize,
    coeffs: &'static Coefficients,
}

impl SymplecticIntegrator {
    pub fn new(order: usize) -> Result<Self> {
        Ok(Self {
            order,
            coeffs: coefficients(order)?,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn coefficients(&self) -> &'static Coefficients {
        self.coeffs
    }

    /// One full step (`order` kick-drift stages)
    pub fn step(&self, bodies: &mut [Body], dt: f64, forces: &dyn ForceEvaluator) {
        symplectic_step(bodies, dt, self.coeffs, forces);
    }

    /// `n_steps` consecutive steps
    pub fn integrate(&self, bodies: &mut [Body], dt: f64, n_steps: usize, forces: &dyn ForceEvaluator) {
        for _ in 0..n_steps {
            self.step(bodies, dt, forces);
        }
    }
}
