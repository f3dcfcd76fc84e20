//! The derivative contract consumed by every driver.

/// Right-hand side of an ODE system `dy/dt = f(t, y)`.
///
/// Implementations must be reentrant and free of side effects: parallel
/// drivers call [`eval`](Derivative::eval) concurrently from several
/// workers, each on its own copy of the state. Hence the `Sync` bound.
///
/// Any closure `Fn(f64, &[f64], &mut [f64]) + Sync` implements this trait,
/// so small systems can be written inline:
///
/// ```rust
/// use rkpar_core::{rk4_step, Derivative};
///
/// let decay = |_t: f64, y: &[f64], dy: &mut [f64]| dy[0] = -y[0];
/// let next = rk4_step(&decay, 0.0, &[1.0], 0.1);
/// assert!((next[0] - (-0.1f64).exp()).abs() < 1e-6);
/// ```
pub trait Derivative: Sync {
    /// Write `f(t, y)` into `dy`.
    ///
    /// `dy` has the same length as `y` and holds unspecified values on
    /// entry; implementations must overwrite every element.
    fn eval(&self, t: f64, y: &[f64], dy: &mut [f64]);
}

impl<F> Derivative for F
where
    F: Fn(f64, &[f64], &mut [f64]) + Sync,
{
    fn eval(&self, t: f64, y: &[f64], dy: &mut [f64]) {
        self(t, y, dy)
    }
}
