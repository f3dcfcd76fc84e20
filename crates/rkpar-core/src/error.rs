//! Error types for integration configuration.
//!
//! Construction-time validation is the only place the integrator reports
//! errors. Runtime failures of the derivative (non-finite values,
//! divergence) are the caller's concern.

use std::error::Error;
use std::fmt;

/// Errors detected by [`IntegrationConfig::new()`](crate::IntegrationConfig::new).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Step size is zero, negative, NaN or infinite.
    InvalidStepSize {
        /// The rejected step size.
        value: f64,
    },
    /// Interval is inverted, empty, or has a non-finite bound.
    InvalidInterval {
        /// Lower bound of the rejected interval.
        start: f64,
        /// Upper bound of the rejected interval.
        end: f64,
    },
    /// The interval holds more fine steps than fit in `usize`.
    StepCountOverflow {
        /// `(end - start) / step` as computed.
        steps: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStepSize { value } => {
                write!(f, "step size must be finite and greater than 0, got {value}")
            }
            Self::InvalidInterval { start, end } => {
                write!(
                    f,
                    "start must be finite and less than end, got [{start}, {end}]"
                )
            }
            Self::StepCountOverflow { steps } => {
                write!(f, "interval holds {steps} fine steps, exceeding usize::MAX")
            }
        }
    }
}

impl Error for ConfigError {}
