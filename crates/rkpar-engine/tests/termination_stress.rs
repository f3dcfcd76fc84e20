//! Stress test: work-stealing termination under skewed placement.
//!
//! Every task must run exactly once and every worker must exit, whether
//! the work is spread evenly, piled onto one deque, or piled onto the last
//! deque while low-indexed workers are left to steal. Runs many tiny tasks
//! so the workers race the generator.

use rkpar_core::TaskSpan;
use rkpar_engine::decompose::task_count;
use rkpar_engine::{work_stealing, EngineConfig, Pinned, Placement, RoundRobin, WeightedRandom};
use rkpar_test_utils::{config, CountingDerivative, HarmonicOscillator};

fn boxed<P: Placement + 'static>(placement: P) -> Box<dyn Placement> {
    Box::new(placement)
}

fn engine(workers: usize) -> EngineConfig {
    EngineConfig {
        workers: Some(workers),
        coarse_ratio: 1,
        ..EngineConfig::default()
    }
}

#[test]
fn every_task_runs_once_for_every_placement() {
    let cfg = config(0.001, 0.0, 2.0);
    let total = cfg.total_steps();
    for workers in [1, 2, 3, 8] {
        let placements = vec![
            ("pinned-first", boxed(Pinned(0))),
            ("pinned-last", boxed(Pinned(workers - 1))),
            ("round-robin", boxed(RoundRobin::default())),
            ("weighted", boxed(WeightedRandom::new(workers as u64))),
            (
                "alternating-ends",
                boxed(|s: &TaskSpan, n: usize| if s.start_index % 2 == 0 { 0 } else { n - 1 }),
            ),
        ];
        for (name, mut placement) in placements {
            let f = HarmonicOscillator::default();
            let run = work_stealing::integrate_placed(
                &cfg,
                &f,
                &[1.0, 0.0],
                &engine(workers),
                &mut *placement,
            )
            .unwrap();
            assert_eq!(run.metrics.tasks, total as u64, "{name}, {workers} workers");
            assert_eq!(
                run.metrics.tasks_executed(),
                total as u64,
                "{name}, {workers} workers"
            );
            assert_eq!(
                run.metrics.fine_steps(),
                total as u64,
                "{name}, {workers} workers"
            );
            assert_eq!(run.metrics.workers.len(), workers);
        }
    }
}

#[test]
fn derivative_call_count_matches_the_work() {
    // Four evaluations per fine step, plus four per coarse step between
    // segments (none after the last).
    let cfg = config(0.01, 0.0, 10.0);
    let ratio = 7;
    let f = CountingDerivative::new(HarmonicOscillator::default());
    let engine = EngineConfig {
        workers: Some(4),
        coarse_ratio: ratio,
        ..EngineConfig::default()
    };
    let run = work_stealing::integrate_with(&cfg, &f, &[1.0, 0.0], &engine).unwrap();
    let steps = cfg.total_steps();
    let tasks = task_count(steps, ratio);
    assert_eq!(run.metrics.tasks, tasks as u64);
    assert_eq!(f.calls(), 4 * steps + 4 * (tasks - 1));
}

#[test]
fn repeated_runs_always_terminate() {
    let cfg = config(0.01, 0.0, 1.0);
    let f = HarmonicOscillator::default();
    for seed in 0..50u64 {
        let engine = EngineConfig {
            workers: Some(6),
            coarse_ratio: 1 + (seed as usize % 4),
            placement_seed: seed,
            ..EngineConfig::default()
        };
        let run = work_stealing::integrate_with(&cfg, &f, &[1.0, 0.0], &engine).unwrap();
        assert_eq!(run.metrics.tasks_executed(), run.metrics.tasks, "seed {seed}");
        assert_eq!(run.metrics.fine_steps(), 100, "seed {seed}");
    }
}

#[test]
fn more_workers_than_tasks() {
    let cfg = config(1.0, 0.0, 3.0);
    let f = HarmonicOscillator::default();
    let run = work_stealing::integrate_with(&cfg, &f, &[1.0, 0.0], &engine(16)).unwrap();
    assert_eq!(run.metrics.tasks_executed(), 3);
    assert_eq!(run.metrics.workers.len(), 16);
}
