//! Worker pool and decomposition settings shared by the parallel drivers.

use crate::error::EngineError;

/// Upper bound applied to explicit worker counts.
pub const MAX_WORKERS: usize = 256;

/// Coarse step as a multiple of the fine step when none is configured.
pub const DEFAULT_COARSE_RATIO: usize = 5;

/// Settings for the pipelined and work-stealing drivers.
///
/// The sequential driver ignores every field.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Number of worker threads. `None` = auto-detect from
    /// `available_parallelism`.
    pub workers: Option<usize>,
    /// Coarse step divided by fine step. Default: 5. A ratio of 1 makes the
    /// parallel drivers reproduce the sequential trajectory.
    pub coarse_ratio: usize,
    /// Capacity of the pipeline's task stream. `None` = one slot per worker.
    pub stream_capacity: Option<usize>,
    /// Seed for the default weighted-random deque placement. Default: 0.
    pub placement_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            coarse_ratio: DEFAULT_COARSE_RATIO,
            stream_capacity: None,
            placement_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Default settings with an explicit worker count.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: Some(workers),
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.coarse_ratio == 0 {
            return Err(EngineError::InvalidCoarseRatio);
        }
        if self.stream_capacity == Some(0) {
            return Err(EngineError::ZeroStreamCapacity);
        }
        if self.workers == Some(0) {
            return Err(EngineError::ZeroWorkers);
        }
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, MAX_WORKERS]`.
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, MAX_WORKERS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, MAX_WORKERS),
        }
    }

    /// Resolve the pipeline stream capacity for `workers` workers.
    pub fn resolved_stream_capacity(&self, workers: usize) -> usize {
        self.stream_capacity.unwrap_or(workers).max(1)
    }
}
