//! Work-stealing driver: per-worker deques filled by a placement policy,
//! with idle workers stealing from their peers.
//!
//! ```text
//!   caller thread                     worker i
//!   -------------                     --------
//!   Decomposer::next()                loop:
//!   deques[place(span)].push(task)      done = finished.load(Acquire)
//!   ...                                 own.pop()          -> execute
//!   finished.store(true, Release)       peers[j].steal()   -> execute
//!                                       nothing and done   -> exit
//! ```
//!
//! Workers never block. An empty sweep before production completes spins
//! and retries; an empty sweep that started after completion proves every
//! deque is drained for good, since nothing is pushed once the flag is set.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use rkpar_core::{Derivative, IntegrationConfig, StepScratch, Task, Trajectory};
use tracing::{debug, trace};

use crate::config::{EngineConfig, DEFAULT_COARSE_RATIO};
use crate::decompose::Decomposer;
use crate::deque::TaskDeque;
use crate::error::EngineError;
use crate::integrator::Run;
use crate::metrics::{RunMetrics, WorkerMetrics};
use crate::placement::{Placement, WeightedRandom};

/// Integrate with `workers` stealing workers, the default coarse ratio and
/// the default weighted-random placement.
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
    let mut placement = WeightedRandom::new(engine.placement_seed);
    run(config, f, initial, &engine, &mut placement).trajectory
}

/// Validate `engine`, then integrate with weighted-random placement seeded
/// from `engine.placement_seed`.
pub fn integrate_with<D: Derivative + ?Sized>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
    engine: &EngineConfig,
) -> Result<Run, EngineError> {
    let mut placement = WeightedRandom::new(engine.placement_seed);
    integrate_placed(config, f, initial, engine, &mut placement)
}

/// Validate `engine`, then integrate with a caller-supplied placement.
///
/// # Panics
///
/// Panics if `placement` returns a deque index outside `0..workers`.
pub fn integrate_placed<D, P>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
    engine: &EngineConfig,
    placement: &mut P,
) -> Result<Run, EngineError>
where
    D: Derivative + ?Sized,
    P: Placement + ?Sized,
{
    engine.validate()?;
    Ok(run(config, f, initial, engine, placement))
}

/// Sets the production-complete flag when dropped, including on unwind, so
/// workers can always terminate.
struct ProductionGuard<'a>(&'a AtomicBool);

impl Drop for ProductionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Integrate with already validated settings.
pub(crate) fn run<D, P>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
    engine: &EngineConfig,
    placement: &mut P,
) -> Run
where
    D: Derivative + ?Sized,
    P: Placement + ?Sized,
{
    let started = Instant::now();
    let workers = engine.resolved_workers();
    let dimension = initial.len();
    debug!(
        driver = "work-stealing",
        workers,
        steps = config.total_steps(),
        coarse_ratio = engine.coarse_ratio,
        "integration started"
    );

    let mut trajectory = Trajectory::new(config, initial);
    let tasks = Decomposer::new(f, config, initial, engine.coarse_ratio, trajectory.carver());
    let deques: Vec<TaskDeque<Task<'_>>> = (0..workers).map(|_| TaskDeque::new()).collect();
    let finished = AtomicBool::new(false);

    let (emitted, worker_metrics) = thread::scope(|scope| {
        let deques = deques.as_slice();
        let finished = &finished;

        let handles: Vec<_> = (0..workers)
            .map(|id| {
                thread::Builder::new()
                    .name(format!("rkpar-steal-{id}"))
                    .spawn_scoped(scope, move || {
                        worker_loop(id, f, deques, finished, dimension)
                    })
                    .expect("failed to spawn work-stealing worker")
            })
            .collect();

        let guard = ProductionGuard(finished);
        let mut emitted = 0u64;
        for task in tasks {
            let target = placement.place(&task.span(), workers);
            assert!(
                target < workers,
                "placement chose deque {target} but only {workers} exist"
            );
            deques[target].push(task);
            emitted += 1;
        }
        drop(guard);

        let metrics: Vec<WorkerMetrics> = handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(m) => m,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect();
        (emitted, metrics)
    });
    drop(deques);

    let total_us = started.elapsed().as_micros() as u64;
    debug!(
        driver = "work-stealing",
        elapsed_us = total_us,
        tasks = emitted,
        stolen = worker_metrics.iter().map(|w| w.tasks_stolen).sum::<u64>(),
        "integration finished"
    );
    Run {
        trajectory,
        metrics: RunMetrics {
            driver: "work-stealing",
            total_us,
            tasks: emitted,
            workers: worker_metrics,
        },
    }
}

/// Worker main loop: drain the own deque, then steal, until production is
/// complete and a full sweep finds nothing.
fn worker_loop<D: Derivative + ?Sized>(
    id: usize,
    f: &D,
    deques: &[TaskDeque<Task<'_>>],
    finished: &AtomicBool,
    dimension: usize,
) -> WorkerMetrics {
    let mut scratch = StepScratch::with_dimension(dimension);
    let mut metrics = WorkerMetrics::default();
    let own = &deques[id];

    loop {
        // Read before looking: an empty sweep only proves termination if
        // production had already completed when it began.
        let production_done = finished.load(Ordering::Acquire);

        if let Some(task) = own.pop() {
            let span = task.execute(f, &mut scratch);
            trace!(
                worker = id,
                start_index = span.start_index,
                end_index = span.end_index,
                "executed task"
            );
            metrics.record(&span, false);
            continue;
        }

        match steal(id, deques) {
            Some((victim, task)) => {
                let span = task.execute(f, &mut scratch);
                trace!(
                    worker = id,
                    victim,
                    start_index = span.start_index,
                    end_index = span.end_index,
                    "executed stolen task"
                );
                metrics.record(&span, true);
            }
            None if production_done => break,
            None => {
                std::hint::spin_loop();
                thread::yield_now();
            }
        }
    }
    metrics
}

/// One sweep over the peers of worker `id`, starting at `id + 1` and
/// wrapping around. Returns the first stolen task and its victim.
fn steal<'a>(id: usize, deques: &[TaskDeque<Task<'a>>]) -> Option<(usize, Task<'a>)> {
    let n = deques.len();
    (1..n)
        .map(|offset| (id + offset) % n)
        .find_map(|victim| deques[victim].steal().map(|task| (victim, task)))
}
