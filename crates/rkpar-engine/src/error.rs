//! Engine configuration errors.

use std::error::Error;
use std::fmt;

use rkpar_core::ConfigError;

/// Errors detected by [`EngineConfig::validate()`](crate::EngineConfig::validate)
/// and by the [`Integrator`](crate::Integrator) constructor.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// The integration interval or step was rejected.
    Integration(ConfigError),
    /// `coarse_ratio` is zero; a coarse step must span at least one fine step.
    InvalidCoarseRatio,
    /// `stream_capacity` is zero; the pipeline needs at least one slot.
    ZeroStreamCapacity,
    /// `workers` is zero.
    ZeroWorkers,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integration(e) => write!(f, "integration config: {e}"),
            Self::InvalidCoarseRatio => write!(f, "coarse_ratio must be at least 1"),
            Self::ZeroStreamCapacity => write!(f, "stream_capacity must be at least 1"),
            Self::ZeroWorkers => write!(f, "workers must be at least 1"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Integration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Integration(e)
    }
}
