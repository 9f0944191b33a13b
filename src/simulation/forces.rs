//! Pairwise separations, gravitational forces and potential energy
//!
//! Direct O(N^2) evaluation over unordered pairs (i < j). No softening:
//! two bodies at exactly the same position divide by zero.

use crate::simulation::states::{total_kinetic_energy, Body, NVec3};

/// Gravitational constant in simulation units
pub const G: f64 = 1.0;

/// Dense N x N matrix of displacement vectors, entry (i, j) = x_j - x_i.
/// Antisymmetric by construction with a zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationMatrix {
    n: usize,
    data: Vec<NVec3>, // row-major, n * n entries
}

impl SeparationMatrix {
    /// Number of bodies (rows)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Displacement from body `i` to body `j`
    pub fn get(&self, i: usize, j: usize) -> &NVec3 {
        &self.data[i * self.n + j]
    }

    /// |x_j - x_i|
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.get(i, j).norm()
    }

    /// True if any pair is strictly farther apart than `threshold`
    pub fn any_pair_beyond(&self, threshold: f64) -> bool {
        (0..self.n).any(|i| ((i + 1)..self.n).any(|j| self.distance(i, j) > threshold))
    }
}

/// Net force on every body plus the total potential energy of the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    pub forces: Vec<NVec3>,
    pub potential: f64,
}

/// Something that turns body positions into forces (the integrator's seam)
pub trait ForceEvaluator {
    fn evaluate(&self, bodies: &[Body]) -> ForceField;
}

/// Direct-summation Newtonian gravity with G = 1
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonianGravity;

impl ForceEvaluator for NewtonianGravity {
    fn evaluate(&self, bodies: &[Body]) -> ForceField {
        let separations = compute_separations(bodies);
        compute_forces_and_potential(bodies, &separations)
    }
}

/// Build the separation matrix. Only the upper triangle is computed, the
/// lower triangle is its exact negation.
pub fn compute_separations(bodies: &[Body]) -> SeparationMatrix {
    let n = bodies.len();
    let mut data = vec![NVec3::zeros(); n * n];

    for i in 0..n {
        for j in (i + 1)..n {
            let r = bodies[j].x - bodies[i].x;
            data[i * n + j] = r;
            data[j * n + i] = -r;
        }
    }

    SeparationMatrix { n, data }
}

/// Accumulate inverse-square forces and pairwise potential energy.
///
/// Each unordered pair is visited once: the force on `i` points along
/// `separations[i][j]` (toward `j`) and `j` receives the negation.
pub fn compute_forces_and_potential(bodies: &[Body], separations: &SeparationMatrix) -> ForceField {
    let n = bodies.len();
    let mut forces = vec![NVec3::zeros(); n];
    let mut potential = 0.0;

    for i in 0..n {
        let mi = bodies[i].m;

        for j in (i + 1)..n {
            let mj = bodies[j].m;

            // r points from i to j
            let r = *separations.get(i, j);
            let dist = r.norm();

            // F_ij = G m_i m_j r / |r|^3
            let f = (G * mi * mj / (dist * dist * dist)) * r;
            forces[i] += f;
            forces[j] -= f;

            potential += -G * mi * mj / dist;
        }
    }

    ForceField { forces, potential }
}

/// Kinetic plus potential energy of the current configuration
pub fn total_energy(bodies: &[Body]) -> f64 {
    let separations = compute_separations(bodies);
    let field = compute_forces_and_potential(bodies, &separations);
    total_kinetic_energy(bodies) + field.potential
}
