//! Reference driver: every fine step on the calling thread, in order.
//!
//! The whole interval is one task anchored at the exact initial condition,
//! so the trajectory is the plain RK4 recurrence `y[k+1] = step(t[k], y[k])`.
//! The parallel drivers are measured against this output.

use std::time::Instant;

use rkpar_core::{Derivative, IntegrationConfig, StepScratch, Task, TaskSpan, Trajectory};
use tracing::debug;

use crate::integrator::Run;
use crate::metrics::{RunMetrics, WorkerMetrics};

/// Integrate from `initial` over `config`'s interval, one step at a time.
///
/// Returns a trajectory of `config.total_steps() + 1` samples, slot 0
/// holding `(config.start(), initial)`. Bit-for-bit reproducible.
pub fn integrate<D: Derivative + ?Sized>(
    config: &IntegrationConfig,
    f: &D,
    initial: &[f64],
) -> Trajectory {
    run(config, f, initial).trajectory
}

/// Like [`integrate()`], also reporting run metrics.
pub fn run<D: Derivative + ?Sized>(config: &IntegrationConfig, f: &D, initial: &[f64]) -> Run {
    let started = Instant::now();
    let total = config.total_steps();
    debug!(
        driver = "sequential",
        steps = total,
        dimension = initial.len(),
        "integration started"
    );

    let mut trajectory = Trajectory::new(config, initial);
    let mut worker = WorkerMetrics::default();
    {
        let mut carver = trajectory.carver();
        let span = TaskSpan {
            start_index: 0,
            end_index: total,
            t_start: config.start(),
            t_end: config.end(),
            step: config.step(),
        };
        let task = Task::new(span, initial.to_vec(), carver.take(total));
        let mut scratch = StepScratch::with_dimension(initial.len());
        let span = task.execute(f, &mut scratch);
        worker.record(&span, false);
    }

    let total_us = started.elapsed().as_micros() as u64;
    debug!(driver = "sequential", elapsed_us = total_us, "integration finished");
    Run {
        trajectory,
        metrics: RunMetrics {
            driver: "sequential",
            total_us,
            tasks: 1,
            workers: vec![worker],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(_t: f64, y: &[f64], dy: &mut [f64]) {
        dy[0] = -y[0];
    }

    #[test]
    fn seeds_slot_zero_and_fills_every_step() {
        let cfg = IntegrationConfig::new(0.25, 1.0, 2.0).unwrap();
        let traj = integrate(&cfg, &decay, &[3.0]);
        assert_eq!(traj.len(), 5);
        assert_eq!(traj.time(0), 1.0);
        assert_eq!(traj.state(0), &[3.0]);
        assert_eq!(traj.times(), &[1.0, 1.25, 1.5, 1.75, 2.0]);
    }

    #[test]
    fn matches_the_stepper_recurrence() {
        let cfg = IntegrationConfig::new(0.1, 0.0, 1.0).unwrap();
        let traj = integrate(&cfg, &decay, &[1.0]);
        let mut y = vec![1.0];
        let mut t = 0.0;
        for k in 1..traj.len() {
            y = rkpar_core::rk4_step(&decay, t, &y, 0.1);
            t += 0.1;
            assert_eq!(traj.state(k), y.as_slice());
            assert_eq!(traj.time(k), t);
        }
    }

    #[test]
    fn decay_tracks_the_exponential() {
        let cfg = IntegrationConfig::new(0.01, 0.0, 2.0).unwrap();
        let traj = integrate(&cfg, &decay, &[1.0]);
        let want = (-2.0f64).exp();
        assert!((traj.final_state()[0] - want).abs() < 1e-9);
    }

    #[test]
    fn step_longer_than_interval_keeps_only_the_initial_sample() {
        let cfg = IntegrationConfig::new(5.0, 0.0, 1.0).unwrap();
        let run = run(&cfg, &decay, &[1.0]);
        assert_eq!(run.trajectory.len(), 1);
        assert_eq!(run.metrics.fine_steps(), 0);
    }

    #[test]
    fn reports_one_task() {
        let cfg = IntegrationConfig::new(0.1, 0.0, 1.0).unwrap();
        let run = run(&cfg, &decay, &[1.0]);
        assert_eq!(run.metrics.driver, "sequential");
        assert_eq!(run.metrics.tasks, 1);
        assert_eq!(run.metrics.fine_steps(), 10);
    }
}
