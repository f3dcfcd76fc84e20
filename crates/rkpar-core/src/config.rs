//! Validated integration interval and fine step size.

use crate::error::ConfigError;

/// Relative tolerance used when converting `span / step` into a step count.
///
/// `(10.0 - 0.0) / 0.1` evaluates to `100.0` but `(0.3 - 0.0) / 0.1`
/// evaluates to `2.9999999999999996`; a plain `floor` would drop the last
/// step of the latter.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Fine step size and integration interval `[start, end]`.
///
/// Validated once by [`new()`](Self::new) and immutable afterwards. Every
/// driver derives its buffer length from [`total_steps()`](Self::total_steps).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationConfig {
    step: f64,
    start: f64,
    end: f64,
    total_steps: usize,
}

impl IntegrationConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidStepSize`] if `step <= 0` or is not finite.
    /// - [`ConfigError::InvalidInterval`] if `start >= end` or either bound
    ///   is not finite.
    /// - [`ConfigError::StepCountOverflow`] if the step count does not fit
    ///   in `usize`.
    pub fn new(step: f64, start: f64, end: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidStepSize { value: step });
        }
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(ConfigError::InvalidInterval { start, end });
        }
        let ratio = (end - start) / step;
        if !ratio.is_finite() || ratio >= usize::MAX as f64 {
            return Err(ConfigError::StepCountOverflow { steps: ratio });
        }
        let nearest = ratio.round();
        let steps = if (ratio - nearest).abs() <= STEP_COUNT_TOLERANCE * nearest.max(1.0) {
            nearest
        } else {
            ratio.floor()
        };
        Ok(Self {
            step,
            start,
            end,
            total_steps: steps as usize,
        })
    }

    /// Fine step size.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Lower bound of the interval.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound of the interval.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Number of fine steps: `floor((end - start) / step)`, except that a
    /// quotient within a 1e-9 relative tolerance of an integer rounds to
    /// it. `[0, 0.3]` with step `0.1` therefore has 3 steps, not the 2 a
    /// plain truncation of `2.9999999999999996` gives, and the last sample
    /// time accumulates to `0.30000000000000004`.
    ///
    /// May be zero when the step is wider than the interval; the
    /// trajectory then holds only the initial condition.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Number of trajectory slots: [`total_steps()`](Self::total_steps) + 1.
    pub fn slots(&self) -> usize {
        self.total_steps + 1
    }
}
