//! rkpar: parallel fixed-step fourth-order Runge-Kutta integration.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! rkpar sub-crates. For most users, adding `rkpar` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rkpar::prelude::*;
//!
//! // dy/dt = -y, integrated over [0, 1] with h = 0.01.
//! let decay = |_t: f64, y: &[f64], dy: &mut [f64]| dy[0] = -y[0];
//! let config = IntegrationConfig::new(0.01, 0.0, 1.0).unwrap();
//!
//! let reference = rkpar::engine::sequential::integrate(&config, &decay, &[1.0]);
//! assert_eq!(reference.len(), 101);
//! assert!((reference.final_state()[0] - (-1.0f64).exp()).abs() < 1e-9);
//!
//! // The same interval split into coarse tasks across four workers.
//! let integrator = Integrator::new(config, EngineConfig::with_workers(4)).unwrap();
//! let parallel = integrator.integrate(Driver::WorkStealing, &decay, &[1.0]);
//! assert_eq!(parallel.len(), reference.len());
//! assert!((parallel.final_state()[0] - reference.final_state()[0]).abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `rkpar-core` | Interval config, `Derivative`, the RK4 step, trajectories, tasks |
//! | [`engine`] | `rkpar-engine` | Sequential, pipeline and work-stealing drivers |
//! | [`nbody`] | `rkpar-nbody` | Gravitational N-body system, scenario files, JSON export |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Integration primitives (`rkpar-core`).
///
/// The [`core::Derivative`] trait is the extension point for user-defined
/// systems; [`core::rk4_step`] is the single step every driver is built on.
pub use rkpar_core as core;

/// Drivers and their settings (`rkpar-engine`).
///
/// Use [`engine::Integrator`] to pick a driver at runtime, or call
/// [`engine::sequential`], [`engine::pipeline`] and [`engine::work_stealing`]
/// directly.
pub use rkpar_engine as engine;

/// Newtonian N-body collaborator (`rkpar-nbody`).
pub use rkpar_nbody as nbody;

/// Common imports for typical rkpar usage.
///
/// ```rust
/// use rkpar::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use rkpar_core::{ConfigError, Derivative, IntegrationConfig, Trajectory};

    // Engine
    pub use rkpar_engine::{Driver, EngineConfig, EngineError, Integrator, Run, RunMetrics};

    // N-body
    pub use rkpar_nbody::{Gravitation, Scenario};
}
