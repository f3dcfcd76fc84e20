//! Benchmark profiles for the rkpar integration drivers.
//!
//! Provides pre-built N-body problems for benchmarks and profiling:
//!
//! - [`figure_eight_profile`]: the periodic three-body figure-eight orbit,
//!   many cheap steps
//! - [`cluster_profile`]: a seeded random cluster, fewer but costlier steps
//! - [`random_bodies`]: deterministic body placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rkpar_core::IntegrationConfig;
use rkpar_nbody::Gravitation;

/// A ready-to-run gravitational problem.
#[derive(Clone, Debug)]
pub struct BenchProfile {
    /// Dynamics.
    pub gravitation: Gravitation,
    /// Packed initial state.
    pub initial: Vec<f64>,
    /// Interval and fine step.
    pub config: IntegrationConfig,
}

/// Period of the figure-eight choreography with unit masses and `G = 1`.
pub const FIGURE_EIGHT_PERIOD: f64 = 6.325_913_98;

/// Three equal masses on the figure-eight orbit, integrated for one period
/// with `steps` fine steps.
pub fn figure_eight_profile(steps: usize) -> BenchProfile {
    let gravitation = Gravitation::new(vec![1.0; 3], 1.0);
    let initial = gravitation.initial_state(
        &[
            [-0.970_004_36, 0.243_087_53, 0.0],
            [0.970_004_36, -0.243_087_53, 0.0],
            [0.0, 0.0, 0.0],
        ],
        &[
            [0.466_203_685, 0.432_365_73, 0.0],
            [0.466_203_685, 0.432_365_73, 0.0],
            [-0.932_407_37, -0.864_731_46, 0.0],
        ],
    );
    let step = FIGURE_EIGHT_PERIOD / steps.max(1) as f64;
    BenchProfile {
        gravitation,
        initial,
        config: valid_config(step, 0.0, FIGURE_EIGHT_PERIOD),
    }
}

/// `bodies` random masses in a unit sphere, integrated over `[0, 1]` with
/// `steps` fine steps.
pub fn cluster_profile(bodies: usize, steps: usize, seed: u64) -> BenchProfile {
    let (masses, positions, velocities) = random_bodies(bodies, seed);
    let gravitation = Gravitation::new(masses, 1.0).with_softening(1e-3);
    let initial = gravitation.initial_state(&positions, &velocities);
    BenchProfile {
        gravitation,
        initial,
        config: valid_config(1.0 / steps.max(1) as f64, 0.0, 1.0),
    }
}

/// Generate deterministic masses, positions and velocities.
///
/// Positions are uniform in the unit ball, velocities small and random,
/// masses in `[0.5, 1.5) / n`.
pub fn random_bodies(n: usize, seed: u64) -> (Vec<f64>, Vec<[f64; 3]>, Vec<[f64; 3]>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut masses = Vec::with_capacity(n);
    let mut positions = Vec::with_capacity(n);
    let mut velocities = Vec::with_capacity(n);

    for _ in 0..n {
        let theta = rng.random_range(0.0..std::f64::consts::TAU);
        let cos_phi: f64 = rng.random_range(-1.0..=1.0);
        let r = rng.random_range(0.0f64..1.0).cbrt();
        let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
        positions.push([
            r * sin_phi * theta.cos(),
            r * sin_phi * theta.sin(),
            r * cos_phi,
        ]);
        velocities.push([
            rng.random_range(-0.1..0.1),
            rng.random_range(-0.1..0.1),
            rng.random_range(-0.1..0.1),
        ]);
        masses.push(rng.random_range(0.5..1.5) / n as f64);
    }

    (masses, positions, velocities)
}

fn valid_config(step: f64, start: f64, end: f64) -> IntegrationConfig {
    match IntegrationConfig::new(step, start, end) {
        Ok(cfg) => cfg,
        Err(e) => panic!("benchmark profile has invalid interval: {e}"),
    }
}
