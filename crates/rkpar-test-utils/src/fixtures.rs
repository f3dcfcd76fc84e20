//! Reusable derivative fixtures.
//!
//! Each fixture has a closed-form solution so drivers can be checked
//! against it:
//!
//! - [`ConstantRate`]: `y' = c`, solution `y0 + c t`. RK4 is exact.
//! - [`LinearRate`]: `y' = 2t`, solution `y0 + t^2`. RK4 is exact.
//! - [`ExponentialDecay`]: `y' = -k y`, solution `y0 e^{-k t}`.
//! - [`HarmonicOscillator`]: `x' = v, v' = -w^2 x`.
//! - [`CountingDerivative`]: wraps another derivative and counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use rkpar_core::Derivative;

/// `y' = rate` in every component.
#[derive(Clone, Copy, Debug)]
pub struct ConstantRate {
    pub rate: f64,
}

impl ConstantRate {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Default for ConstantRate {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Derivative for ConstantRate {
    fn eval(&self, _t: f64, _y: &[f64], dy: &mut [f64]) {
        dy.fill(self.rate);
    }
}

/// `y' = 2t` in every component.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearRate;

impl Derivative for LinearRate {
    fn eval(&self, t: f64, _y: &[f64], dy: &mut [f64]) {
        dy.fill(2.0 * t);
    }
}

/// `y' = -k y`, componentwise.
#[derive(Clone, Copy, Debug)]
pub struct ExponentialDecay {
    pub k: f64,
}

impl ExponentialDecay {
    pub fn new(k: f64) -> Self {
        Self { k }
    }

    /// Exact solution from `y0` at `t0`.
    pub fn solution(&self, y0: f64, t0: f64, t: f64) -> f64 {
        y0 * (-self.k * (t - t0)).exp()
    }
}

impl Derivative for ExponentialDecay {
    fn eval(&self, _t: f64, y: &[f64], dy: &mut [f64]) {
        for (d, v) in dy.iter_mut().zip(y) {
            *d = -self.k * v;
        }
    }
}

/// Unit-mass oscillator with state `[x, v]` and angular frequency `omega`.
#[derive(Clone, Copy, Debug)]
pub struct HarmonicOscillator {
    pub omega: f64,
}

impl HarmonicOscillator {
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Exact `[x, v]` at `t` starting from `[x0, v0]` at time zero.
    pub fn solution(&self, x0: f64, v0: f64, t: f64) -> [f64; 2] {
        let w = self.omega;
        let (s, c) = (w * t).sin_cos();
        [x0 * c + v0 / w * s, -x0 * w * s + v0 * c]
    }

    /// Total energy `(v^2 + w^2 x^2) / 2` of a state.
    pub fn energy(&self, state: &[f64]) -> f64 {
        0.5 * (state[1] * state[1] + self.omega * self.omega * state[0] * state[0])
    }
}

impl Default for HarmonicOscillator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Derivative for HarmonicOscillator {
    fn eval(&self, _t: f64, y: &[f64], dy: &mut [f64]) {
        dy[0] = y[1];
        dy[1] = -self.omega * self.omega * y[0];
    }
}

/// Forwards to an inner derivative and counts evaluations.
///
/// Uses an atomic counter so it stays `Sync` (required by [`Derivative`]).
#[derive(Debug)]
pub struct CountingDerivative<D> {
    inner: D,
    calls: AtomicUsize,
}

impl<D> CountingDerivative<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Evaluations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<D: Derivative> Derivative for CountingDerivative<D> {
    fn eval(&self, t: f64, y: &[f64], dy: &mut [f64]) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.eval(t, y, dy);
    }
}
