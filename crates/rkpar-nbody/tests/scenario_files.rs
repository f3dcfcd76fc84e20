//! Integration test: shipped scenario files load, integrate and export.

use std::fs;
use std::path::PathBuf;

use rkpar_engine::{sequential, work_stealing};
use rkpar_nbody::{export_json, BodySeries, ExportError, Scenario};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../scenarios")
        .join(name)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rkpar-{}-{name}", std::process::id()))
}

#[test]
fn shipped_scenarios_load() {
    for (name, bodies) in [
        ("two_body.txt", 2),
        ("figure_eight.txt", 3),
        ("inner_planets.txt", 5),
    ] {
        let s = Scenario::load(scenario_path(name)).unwrap();
        assert_eq!(s.bodies(), bodies, "{name}");
        assert_eq!(s.initial_state().len(), 6 * bodies, "{name}");
        assert!(s.config.total_steps() > 0, "{name}");
    }
}

#[test]
fn inner_planets_keep_their_orbits() {
    let s = Scenario::load(scenario_path("inner_planets.txt")).unwrap();
    let y0 = s.initial_state();
    let traj = work_stealing::integrate(&s.config, &s.gravitation, &y0, 4);
    for body in 1..s.bodies() {
        let r0 = s.positions[body][0];
        let p = s.gravitation.position(traj.final_state(), body);
        let sun = s.gravitation.position(traj.final_state(), 0);
        let r = ((p[0] - sun[0]).powi(2) + (p[1] - sun[1]).powi(2)).sqrt();
        assert!((r - r0).abs() / r0 < 1e-2, "body {body}: r = {r}, r0 = {r0}");
    }
}

#[test]
fn export_writes_per_body_series() {
    let s = Scenario::load(scenario_path("figure_eight.txt")).unwrap();
    let cfg = rkpar_core::IntegrationConfig::new(0.01, 0.0, 0.1).unwrap();
    let traj = sequential::integrate(&cfg, &s.gravitation, &s.initial_state());

    let path = temp_path("figure_eight.json");
    export_json(&path, &traj, s.bodies()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let series: Vec<BodySeries> = serde_json::from_str(&text).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[2].body, 3);
    assert_eq!(series[0].positions.len(), traj.len());
    let close = |a: [f64; 3], b: [f64; 3]| a.iter().zip(&b).all(|(x, y)| (x - y).abs() < 1e-12);
    assert!(close(series[0].positions[0].position, s.positions[0]));
    assert!(close(series[1].velocities[0].velocity, s.velocities[1]));
    let last = traj.len() - 1;
    assert!((series[1].positions[last].time - traj.time(last)).abs() < 1e-12);
}

#[test]
fn export_to_missing_directory_fails() {
    let s = Scenario::load(scenario_path("two_body.txt")).unwrap();
    let cfg = rkpar_core::IntegrationConfig::new(0.1, 0.0, 0.2).unwrap();
    let traj = sequential::integrate(&cfg, &s.gravitation, &s.initial_state());
    let err = export_json("/nonexistent/rkpar/out.json", &traj, s.bodies()).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
}
