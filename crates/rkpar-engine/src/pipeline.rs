//! Two-stage pipeline: a generator on the calling thread feeding a pool of
//! workers through one bounded task stream.
//!
//! ```text
//!   caller thread                         worker threads (N)
//!   --------------                        ------------------
//!   Decomposer::next()                    task_rx.recv()
//!     coarse RK4 step  --[bounded(cap)]-->  Task::execute()
//!   drop(task_tx)                           writes its own slots
//! ```
//!
//! The stream applies backpressure: once `cap` tasks are queued the
//! generator blocks until a worker takes one. Dropping the sender closes the
//! stream; each worker exits once it has drained it.

use std::panic;
use std::thread;
use std::time::Instant;

use crossbeam_channel::Receiver;
use rkpar_core::{Derivative, IntegrationConfig, StepScratch, Task, Trajectory};
use tracing::{debug, trace};

use crate::config::{EngineConfig, DEFAULT_COARSE_RATIO};
use crate::decompose::Decomposer;
use crate::error::EngineError;
use crate::integrator::Run;
use crate::metrics::{RunMetrics, WorkerMetrics};

/// Integrate with `workers` pipeline workers and the default coarse ratio.
///
/// A worker count of zero is treated as one.
pub fn integrate<D: Derivative + ?Sized>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
    workers: usize,
) -> Trajectory {
    let engine = EngineConfig {
        workers: Some(workers.max(1)),
        coarse_ratio: DEFAULT_COARSE_RATIO,
        ..EngineConfig::default()
    };
    run(config, f, initial, &engine).trajectory
}

/// Validate `engine`, then integrate with it.
pub fn integrate_with<D: Derivative + ?Sized>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
    engine: &EngineConfig,
) -> Result<Run, EngineError> {
    engine.validate()?;
    Ok(run(config, f, initial, engine))
}

/// Integrate with already validated settings.
pub(crate) fn run<D: Derivative + ?Sized>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
    engine: &EngineConfig,
) -> Run {
    let started = Instant::now();
    let workers = engine.resolved_workers();
    let capacity = engine.resolved_stream_capacity(workers);
    let dimension = initial.len();
    debug!(
        driver = "pipeline",
        workers,
        capacity,
        steps = config.total_steps(),
        coarse_ratio = engine.coarse_ratio,
        "integration started"
    );

    let mut trajectory = Trajectory::new(config, initial);
    let tasks = Decomposer::new(f, config, initial, engine.coarse_ratio, trajectory.carver());

    let (emitted, worker_metrics) = thread::scope(|scope| {
        let (task_tx, task_rx) = crossbeam_channel::bounded::<Task<'_>>(capacity);

        let handles: Vec<_> = (0..workers)
            .map(|id| {
                let rx = task_rx.clone();
                thread::Builder::new()
                    .name(format!("rkpar-pipeline-{id}"))
                    .spawn_scoped(scope, move || worker_loop(id, f, &rx, dimension))
                    .expect("failed to spawn pipeline worker")
            })
            .collect();
        // Only the workers hold receivers: if they all die, send() fails
        // instead of blocking forever.
        drop(task_rx);

        let mut emitted = 0u64;
        for task in tasks {
            if task_tx.send(task).is_err() {
                break;
            }
            emitted += 1;
        }
        drop(task_tx);

        let metrics: Vec<WorkerMetrics> = handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(m) => m,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect();
        (emitted, metrics)
    });

    let total_us = started.elapsed().as_micros() as u64;
    debug!(
        driver = "pipeline",
        elapsed_us = total_us,
        tasks = emitted,
        "integration finished"
    );
    Run {
        trajectory,
        metrics: RunMetrics {
            driver: "pipeline",
            total_us,
            tasks: emitted,
            workers: worker_metrics,
        },
    }
}

/// Worker main loop: execute tasks until the stream is closed and empty.
fn worker_loop<D: Derivative + ?Sized>(
    id: usize,
    f: &D,
    task_rx: &Receiver<Task<'_>>,
    dimension: usize,
) -> WorkerMetrics {
    let mut scratch = StepScratch::with_dimension(dimension);
    let mut metrics = WorkerMetrics::default();
    while let Ok(task) = task_rx.recv() {
        let span = task.execute(f, &mut scratch);
        trace!(
            worker = id,
            start_index = span.start_index,
            end_index = span.end_index,
            "executed task"
        );
        metrics.record(&span, false);
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential;

    fn oscillator(_t: f64, y: &[f64], dy: &mut [f64]) {
        dy[0] = y[1];
        dy[1] = -y[0];
    }

    #[test]
    fn coarse_ratio_one_reproduces_sequential_exactly() {
        let cfg = IntegrationConfig::new(0.05, 0.0, 3.0).unwrap();
        let engine = EngineConfig {
            workers: Some(4),
            coarse_ratio: 1,
            ..EngineConfig::default()
        };
        let par = integrate_with(&cfg, &oscillator, &[1.0, 0.0], &engine).unwrap();
        let seq = sequential::integrate(&cfg, &oscillator, &[1.0, 0.0]);
        assert_eq!(par.trajectory, seq);
    }

    #[test]
    fn every_task_runs_once() {
        let cfg = IntegrationConfig::new(0.01, 0.0, 1.0).unwrap();
        let engine = EngineConfig {
            workers: Some(3),
            coarse_ratio: 7,
            stream_capacity: Some(1),
            ..EngineConfig::default()
        };
        let run = integrate_with(&cfg, &oscillator, &[1.0, 0.0], &engine).unwrap();
        assert_eq!(run.metrics.tasks, 15);
        assert_eq!(run.metrics.tasks_executed(), 15);
        assert_eq!(run.metrics.fine_steps(), 100);
        assert_eq!(run.metrics.workers.len(), 3);
        assert_eq!(run.metrics.tasks_stolen(), 0);
    }

    #[test]
    fn zero_workers_means_one() {
        let cfg = IntegrationConfig::new(0.1, 0.0, 1.0).unwrap();
        let traj = integrate(&cfg, &oscillator, &[1.0, 0.0], 0);
        assert_eq!(traj.len(), 11);
    }

    #[test]
    fn invalid_engine_config_is_rejected() {
        let cfg = IntegrationConfig::new(0.1, 0.0, 1.0).unwrap();
        let engine = EngineConfig {
            stream_capacity: Some(0),
            ..EngineConfig::default()
        };
        assert_eq!(
            integrate_with(&cfg, &oscillator, &[1.0, 0.0], &engine).unwrap_err(),
            EngineError::ZeroStreamCapacity
        );
    }

    #[test]
    fn empty_interval_runs_no_tasks() {
        let cfg = IntegrationConfig::new(2.0, 0.0, 1.0).unwrap();
        let run = integrate_with(&cfg, &oscillator, &[1.0, 0.0], &EngineConfig::with_workers(2))
            .unwrap();
        assert_eq!(run.trajectory.len(), 1);
        assert_eq!(run.metrics.tasks, 0);
    }
}
