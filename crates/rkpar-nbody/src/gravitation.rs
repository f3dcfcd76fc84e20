//! Newtonian point-mass gravitation.
//!
//! State layout for `n` bodies is flat and body-major:
//!
//! ```text
//! [x0, y0, z0, x1, y1, z1, ..., vx0, vy0, vz0, vx1, ...]
//!  \___________ 3n positions ___________/ \__ 3n velocities __/
//! ```
//!
//! The derivative of the positions is the velocities; the derivative of the
//! velocities is the pairwise acceleration
//! `a_i = sum_{j != i} G m_j (r_j - r_i) / |r_j - r_i|^3`. Pairs closer
//! than the softening cutoff contribute nothing, so coincident bodies do
//! not produce infinities.
//!
//! This is the physical inverse-square law. The reference scenario tool
//! scaled `G m_j (r_j - r_i)` by `1 / r^2` instead, so its trajectories for
//! the same scenario file differ from these.

use rkpar_core::Derivative;

/// Pair separations at or below this distance are skipped.
pub const DEFAULT_SOFTENING: f64 = 1e-5;

/// Gravitational dynamics of a fixed set of point masses.
#[derive(Clone, Debug, PartialEq)]
pub struct Gravitation {
    masses: Vec<f64>,
    g: f64,
    softening: f64,
}

impl Gravitation {
    /// Bodies with the given masses under gravitational constant `g`.
    pub fn new(masses: Vec<f64>, g: f64) -> Self {
        Self {
            masses,
            g,
            softening: DEFAULT_SOFTENING,
        }
    }

    /// Replace the close-approach cutoff.
    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    /// Body masses, in input order.
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Gravitational constant.
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Close-approach cutoff.
    pub fn softening(&self) -> f64 {
        self.softening
    }

    /// Number of bodies.
    pub fn bodies(&self) -> usize {
        self.masses.len()
    }

    /// Length of a state vector: three positions and three velocities per
    /// body.
    pub fn state_dimension(&self) -> usize {
        6 * self.bodies()
    }

    /// Pack per-body positions and velocities into a state vector.
    ///
    /// # Panics
    ///
    /// Panics if either slice does not hold one entry per body.
    pub fn initial_state(&self, positions: &[[f64; 3]], velocities: &[[f64; 3]]) -> Vec<f64> {
        assert_eq!(positions.len(), self.bodies(), "one position per body");
        assert_eq!(velocities.len(), self.bodies(), "one velocity per body");
        positions
            .iter()
            .chain(velocities)
            .flat_map(|v| v.iter().copied())
            .collect()
    }

    /// Split a state vector into its flat position and velocity halves.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not [`state_dimension()`](Self::state_dimension)
    /// long.
    pub fn split_state<'s>(&self, state: &'s [f64]) -> (&'s [f64], &'s [f64]) {
        assert_eq!(
            state.len(),
            self.state_dimension(),
            "state length does not match body count"
        );
        state.split_at(3 * self.bodies())
    }

    /// Position of body `i` in `state`.
    pub fn position(&self, state: &[f64], i: usize) -> [f64; 3] {
        let (positions, _) = self.split_state(state);
        vec3(positions, i)
    }

    /// Velocity of body `i` in `state`.
    pub fn velocity(&self, state: &[f64], i: usize) -> [f64; 3] {
        let (_, velocities) = self.split_state(state);
        vec3(velocities, i)
    }

    /// Write the acceleration of every body into `acc` (flat, 3 per body).
    pub fn accelerations(&self, positions: &[f64], acc: &mut [f64]) {
        acc.fill(0.0);
        let n = self.bodies();
        for i in 0..n {
            let ri = vec3(positions, i);
            let mut a = [0.0; 3];
            for (j, &mj) in self.masses.iter().enumerate() {
                if i == j {
                    continue;
                }
                let rj = vec3(positions, j);
                let d = [rj[0] - ri[0], rj[1] - ri[1], rj[2] - ri[2]];
                let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
                if r <= self.softening {
                    continue;
                }
                let s = self.g * mj / (r * r * r);
                a[0] += s * d[0];
                a[1] += s * d[1];
                a[2] += s * d[2];
            }
            acc[3 * i..3 * i + 3].copy_from_slice(&a);
        }
    }

    /// Kinetic plus potential energy. Pairs inside the softening cutoff
    /// contribute no potential, matching [`accelerations()`](Self::accelerations).
    pub fn total_energy(&self, state: &[f64]) -> f64 {
        let (positions, velocities) = self.split_state(state);
        let n = self.bodies();
        let mut kinetic = 0.0;
        let mut potential = 0.0;
        for i in 0..n {
            let v = vec3(velocities, i);
            kinetic += 0.5 * self.masses[i] * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
            for j in i + 1..n {
                let r = distance(vec3(positions, i), vec3(positions, j));
                if r > self.softening {
                    potential -= self.g * self.masses[i] * self.masses[j] / r;
                }
            }
        }
        kinetic + potential
    }

    /// Total linear momentum.
    pub fn momentum(&self, state: &[f64]) -> [f64; 3] {
        let (_, velocities) = self.split_state(state);
        let mut p = [0.0; 3];
        for (i, &m) in self.masses.iter().enumerate() {
            let v = vec3(velocities, i);
            for k in 0..3 {
                p[k] += m * v[k];
            }
        }
        p
    }
}

impl Derivative for Gravitation {
    fn eval(&self, _t: f64, y: &[f64], dy: &mut [f64]) {
        let half = 3 * self.bodies();
        let (positions, velocities) = y.split_at(half);
        let (dpos, dvel) = dy.split_at_mut(half);
        dpos.copy_from_slice(velocities);
        self.accelerations(positions, dvel);
    }
}

fn vec3(flat: &[f64], i: usize) -> [f64; 3] {
    [flat[3 * i], flat[3 * i + 1], flat[3 * i + 2]]
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}
