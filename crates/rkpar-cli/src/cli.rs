//! Command line interface for rkpar

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use rkpar_engine::{Driver, EngineConfig, EngineError};
use rkpar_nbody::{ExportError, ScenarioError};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Scenario file could not be loaded
    Scenario(ScenarioError),
    /// Engine settings were rejected
    Engine(EngineError),
    /// Trajectory could not be written
    Export(ExportError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Scenario(e) => write!(f, "Failed to load scenario: {e}"),
            CliError::Engine(e) => write!(f, "Invalid engine settings: {e}"),
            CliError::Export(e) => write!(f, "Failed to export trajectory: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Scenario(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Export(e) => Some(e),
        }
    }
}

impl From<ScenarioError> for CliError {
    fn from(e: ScenarioError) -> Self {
        CliError::Scenario(e)
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Engine(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

/// rkpar - parallel RK4 integration of N-body scenarios
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the scenario file
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Driver: seq (sequential), par (pipeline) or ws (work stealing)
    #[arg(value_name = "DRIVER")]
    pub driver: Driver,

    /// Number of worker threads (defaults to available parallelism; ignored by seq)
    #[arg(short = 'w', long, value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Coarse step as a multiple of the fine step (ignored by seq)
    #[arg(short = 'k', long, value_name = "RATIO", default_value_t = rkpar_engine::config::DEFAULT_COARSE_RATIO)]
    pub coarse_ratio: usize,

    /// Write per-body position and velocity series to this JSON file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for work-stealing task placement
    #[arg(short = 's', long, value_name = "SEED", default_value_t = 0)]
    pub seed: u64,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Engine settings derived from the flags.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            workers: self.workers,
            coarse_ratio: self.coarse_ratio,
            stream_capacity: None,
            placement_seed: self.seed,
        }
    }
}
