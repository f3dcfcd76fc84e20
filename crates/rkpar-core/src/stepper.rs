//! Classic fourth-order Runge-Kutta single step.
//!
//! ```text
//! k1 = f(t,       y)
//! k2 = f(t + h/2, y + h/2 * k1)
//! k3 = f(t + h/2, y + h/2 * k2)
//! k4 = f(t + h,   y + h   * k3)
//! y' = y + h/6 * (k1 + 2 k2 + 2 k3 + k4)
//! ```
//!
//! The step is pure: it reads `y`, writes a fresh output and touches no
//! shared state, so workers may call it concurrently on independent
//! copies. Stage buffers live in a caller-owned [`StepScratch`] so the
//! inner loop of a driver does not allocate.

use smallvec::SmallVec;

use crate::derivative::Derivative;

/// Stage buffers inline up to this many `f64` slots (five stages of a
/// six-dimensional system fit) before spilling to the heap. Must be a size
/// `smallvec` implements `Array` for.
const INLINE_SLOTS: usize = 32;

/// Reusable stage storage for [`rk4_step_into()`].
///
/// Holds `k1..k4` plus one probe vector, `5 * dim` slots in total. Grows
/// on demand and never shrinks. One scratch per worker thread.
#[derive(Clone, Debug, Default)]
pub struct StepScratch {
    buf: SmallVec<[f64; INLINE_SLOTS]>,
}

impl StepScratch {
    /// Create an empty scratch; it sizes itself on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scratch pre-sized for a system of `dim` equations.
    pub fn with_dimension(dim: usize) -> Self {
        let mut scratch = Self::new();
        scratch.stages(dim);
        scratch
    }

    /// Slots currently reserved.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn stages(&mut self, dim: usize) -> &mut [f64] {
        let needed = 5 * dim;
        if self.buf.len() < needed {
            self.buf.resize(needed, 0.0);
        }
        &mut self.buf[..needed]
    }
}

/// Advance `y` by one RK4 step of size `h`, writing the result into `out`.
///
/// `out` must have the same length as `y`.
pub fn rk4_step_into<D: Derivative + ?Sized>(
    f: &D,
    t: f64,
    y: &[f64],
    h: f64,
    out: &mut [f64],
    scratch: &mut StepScratch,
) {
    let dim = y.len();
    assert_eq!(out.len(), dim, "output length must match state length");

    let buf = scratch.stages(dim);
    let (k1, rest) = buf.split_at_mut(dim);
    let (k2, rest) = rest.split_at_mut(dim);
    let (k3, rest) = rest.split_at_mut(dim);
    let (k4, probe) = rest.split_at_mut(dim);

    let half = 0.5 * h;

    f.eval(t, y, k1);
    for ((p, &yi), &k) in probe.iter_mut().zip(y).zip(k1.iter()) {
        *p = yi + half * k;
    }
    f.eval(t + half, probe, k2);
    for ((p, &yi), &k) in probe.iter_mut().zip(y).zip(k2.iter()) {
        *p = yi + half * k;
    }
    f.eval(t + half, probe, k3);
    for ((p, &yi), &k) in probe.iter_mut().zip(y).zip(k3.iter()) {
        *p = yi + h * k;
    }
    f.eval(t + h, probe, k4);

    let sixth = h / 6.0;
    for i in 0..dim {
        out[i] = y[i] + sixth * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
}

/// Allocating convenience wrapper around [`rk4_step_into()`].
pub fn rk4_step<D: Derivative + ?Sized>(f: &D, t: f64, y: &[f64], h: f64) -> Vec<f64> {
    let mut out = vec![0.0; y.len()];
    let mut scratch = StepScratch::with_dimension(y.len());
    rk4_step_into(f, t, y, h, &mut out, &mut scratch);
    out
}
