//! Smoke test of the facade: everything a typical caller needs is reachable
//! through the prelude and the module aliases.

use rkpar::prelude::*;
use rkpar_test_utils::{assert_matches_solution, assert_trajectory_close, ExponentialDecay};

#[test]
fn drivers_through_the_facade() {
    let decay = ExponentialDecay::new(0.5);
    let config = IntegrationConfig::new(0.01, 0.0, 4.0).unwrap();
    let integrator = Integrator::new(config, EngineConfig::with_workers(3)).unwrap();

    let seq = integrator.integrate(Driver::Sequential, &decay, &[2.0]);
    assert_matches_solution(&seq, 1e-9, |t| vec![decay.solution(2.0, 0.0, t)]);

    for driver in [Driver::Pipelined, Driver::WorkStealing] {
        let traj = integrator.integrate(driver, &decay, &[2.0]);
        assert_trajectory_close(&traj, &seq, 1e-6);
    }
}

#[test]
fn nbody_scenario_through_the_facade() {
    let scenario: Scenario = "\
1.0, 0.001
0.0, 1.0
0.0, 0.0
0.0, 0.0
0.0, 0.0
0.0, 1.0
0.0, 0.0
1.0
0.0, 1.0
0.01
"
    .parse()
    .unwrap();
    let run = rkpar::engine::work_stealing::integrate_with(
        &scenario.config,
        &scenario.gravitation,
        &scenario.initial_state(),
        &EngineConfig::with_workers(2),
    )
    .unwrap();
    assert_eq!(run.trajectory.len(), 101);
    assert_eq!(run.metrics.driver, "work-stealing");
    let series = rkpar::nbody::body_series(&run.trajectory, scenario.bodies()).unwrap();
    assert_eq!(series.len(), 2);
}
