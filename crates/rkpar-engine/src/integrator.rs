//! Runtime driver selection.
//!
//! [`Integrator`] bundles a validated [`IntegrationConfig`] with an
//! [`EngineConfig`] and dispatches to one of the three drivers by
//! [`Driver`] value, which is how the CLI and the benches pick a driver
//! from a string.

use std::fmt;
use std::str::FromStr;

use rkpar_core::{Derivative, IntegrationConfig, Trajectory};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::metrics::RunMetrics;
use crate::placement::WeightedRandom;
use crate::{pipeline, sequential, work_stealing};

/// Output of one driver run.
#[derive(Clone, Debug)]
pub struct Run {
    /// The filled trajectory.
    pub trajectory: Trajectory,
    /// Timing and task counts.
    pub metrics: RunMetrics,
}

/// Which driver fills the trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Driver {
    /// One fine step after another on the calling thread.
    Sequential,
    /// Coarse/fine decomposition over a shared bounded task stream.
    Pipelined,
    /// Coarse/fine decomposition over per-worker deques with stealing.
    WorkStealing,
}

impl Driver {
    /// Every driver, in increasing order of machinery.
    pub const ALL: [Driver; 3] = [Driver::Sequential, Driver::Pipelined, Driver::WorkStealing];

    /// Short name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Driver::Sequential => "seq",
            Driver::Pipelined => "par",
            Driver::WorkStealing => "ws",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown driver name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownDriver(pub String);

impl fmt::Display for UnknownDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown driver '{}', expected seq, par or ws", self.0)
    }
}

impl std::error::Error for UnknownDriver {}

impl FromStr for Driver {
    type Err = UnknownDriver;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seq" | "sequential" => Ok(Driver::Sequential),
            "par" | "pipeline" | "pipelined" => Ok(Driver::Pipelined),
            "ws" | "work-stealing" | "workstealing" => Ok(Driver::WorkStealing),
            _ => Err(UnknownDriver(s.to_string())),
        }
    }
}

/// A validated pairing of interval and engine settings.
#[derive(Clone, Debug)]
pub struct Integrator {
    config: IntegrationConfig,
    engine: EngineConfig,
}

impl Integrator {
    /// Validate `engine` and bind it to `config`.
    pub fn new(config: IntegrationConfig, engine: EngineConfig) -> Result<Self, EngineError> {
        engine.validate()?;
        Ok(Self { config, engine })
    }

    /// Build the interval from raw values and use default engine settings.
    pub fn from_parts(step: f64, start: f64, end: f64) -> Result<Self, EngineError> {
        Self::new(IntegrationConfig::new(step, start, end)?, EngineConfig::default())
    }

    /// The integration interval.
    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// The engine settings.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Run `driver` from `initial`.
    pub fn run<D: Derivative + ?Sized>(&self, driver: Driver, f: &D, initial: &[f64]) -> Run {
        match driver {
            Driver::Sequential => sequential::run(&self.config, f, initial),
            Driver::Pipelined => pipeline::run(&self.config, f, initial, &self.engine),
            Driver::WorkStealing => {
                let mut placement = WeightedRandom::new(self.engine.placement_seed);
                work_stealing::run(&self.config, f, initial, &self.engine, &mut placement)
            }
        }
    }

    /// Run `driver` and keep only the trajectory.
    pub fn integrate<D: Derivative + ?Sized>(
        &self,
        driver: Driver,
        f: &D,
        initial: &[f64],
    ) -> Trajectory {
        self.run(driver, f, initial).trajectory
    }
}
