//! Per-run performance metrics for the integration drivers.
//!
//! [`RunMetrics`] captures timing and per-worker task counts for one call
//! of a driver, for profiling and for checking that every task ran once.

use rkpar_core::TaskSpan;

/// Task counts for a single worker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerMetrics {
    /// Tasks this worker executed, stolen or not.
    pub tasks_executed: u64,
    /// Tasks this worker took from a peer's deque.
    pub tasks_stolen: u64,
    /// Fine RK4 steps this worker computed.
    pub fine_steps: u64,
}

impl WorkerMetrics {
    /// Account for one executed task.
    pub fn record(&mut self, span: &TaskSpan, stolen: bool) {
        self.tasks_executed += 1;
        self.fine_steps += span.steps() as u64;
        if stolen {
            self.tasks_stolen += 1;
        }
    }
}

/// Timing and task metrics collected during a single driver run.
///
/// Durations are in microseconds. Worker entries are indexed by worker id;
/// the sequential driver reports a single entry for the calling thread.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Name of the driver that produced the run.
    pub driver: &'static str,
    /// Wall-clock time for the entire run, in microseconds.
    pub total_us: u64,
    /// Number of tasks the generator emitted.
    pub tasks: u64,
    /// Per-worker counts.
    pub workers: Vec<WorkerMetrics>,
}

impl RunMetrics {
    /// Tasks executed across all workers.
    pub fn tasks_executed(&self) -> u64 {
        self.workers.iter().map(|w| w.tasks_executed).sum()
    }

    /// Tasks that changed hands through stealing.
    pub fn tasks_stolen(&self) -> u64 {
        self.workers.iter().map(|w| w.tasks_stolen).sum()
    }

    /// Fine steps computed across all workers.
    pub fn fine_steps(&self) -> u64 {
        self.workers.iter().map(|w| w.fine_steps).sum()
    }
}
