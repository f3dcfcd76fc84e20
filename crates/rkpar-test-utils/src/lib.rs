//! Test fixtures and assertion helpers for rkpar development.
//!
//! Provides derivative functions with known closed-form solutions
//! ([`fixtures`]) and comparison helpers for [`Trajectory`] values.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    CountingDerivative, ConstantRate, ExponentialDecay, HarmonicOscillator, LinearRate,
};

use rkpar_core::{IntegrationConfig, Trajectory};

/// Assert that two trajectories sample the same times and that their
/// states agree elementwise within `tol`.
///
/// Panics with the first offending index.
pub fn assert_trajectory_close(actual: &Trajectory, expected: &Trajectory, tol: f64) {
    assert_eq!(actual.len(), expected.len(), "trajectory lengths differ");
    assert_eq!(
        actual.dimension(),
        expected.dimension(),
        "state dimensions differ"
    );
    for k in 0..actual.len() {
        let (ta, te) = (actual.time(k), expected.time(k));
        assert!(
            (ta - te).abs() <= 1e-12 * te.abs().max(1.0),
            "time mismatch at index {k}: {ta} vs {te}"
        );
        for (i, (a, e)) in actual.state(k).iter().zip(expected.state(k)).enumerate() {
            assert!(
                (a - e).abs() <= tol,
                "state mismatch at index {k}, component {i}: {a} vs {e} (tol {tol})"
            );
        }
    }
}

/// Assert that every sample of `trajectory` lies within `tol` of
/// `exact(t)`.
pub fn assert_matches_solution<F>(trajectory: &Trajectory, tol: f64, exact: F)
where
    F: Fn(f64) -> Vec<f64>,
{
    for k in 0..trajectory.len() {
        let t = trajectory.time(k);
        let want = exact(t);
        for (i, (got, want)) in trajectory.state(k).iter().zip(&want).enumerate() {
            assert!(
                (got - want).abs() <= tol,
                "index {k} (t = {t}), component {i}: got {got}, want {want} (tol {tol})"
            );
        }
    }
}

/// Integration config for a known-good interval; panics on invalid input.
pub fn config(step: f64, start: f64, end: f64) -> IntegrationConfig {
    match IntegrationConfig::new(step, start, end) {
        Ok(cfg) => cfg,
        Err(e) => panic!("invalid test config: {e}"),
    }
}
