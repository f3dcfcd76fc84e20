//! `rkpar` binary: load a scenario, integrate it with the chosen driver and
//! print the elapsed wall-clock seconds.

#![forbid(unsafe_code)]

mod cli;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use rkpar_engine::Integrator;
use rkpar_nbody::{export_json, Scenario};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Args, CliError};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let scenario = Scenario::load(&args.scenario)?;
    let integrator = Integrator::new(scenario.config, args.engine_config())?;
    let initial = scenario.initial_state();
    info!(
        driver = %args.driver,
        bodies = scenario.bodies(),
        steps = scenario.config.total_steps(),
        workers = integrator.engine().resolved_workers(),
        "integrating"
    );

    let started = Instant::now();
    let run = integrator.run(args.driver, &scenario.gravitation, &initial);
    let elapsed = started.elapsed();

    // Stdout carries only the timing, for benchmark scripts.
    println!("{:.6}", elapsed.as_secs_f64());
    info!(
        tasks = run.metrics.tasks,
        stolen = run.metrics.tasks_stolen(),
        "integration complete"
    );

    if let Some(path) = &args.output {
        export_json(path, &run.trajectory, scenario.bodies())?;
        info!(path = %path.display(), "wrote trajectory");
    }
    Ok(())
}
