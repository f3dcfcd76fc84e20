//! Integration drivers for rkpar.
//!
//! Three ways to fill a [`Trajectory`](rkpar_core::Trajectory):
//!
//! - [`sequential`]: the reference driver, one fine step after another on
//!   the calling thread.
//! - [`pipeline`]: the calling thread walks the interval in coarse steps and
//!   streams [`Task`](rkpar_core::Task)s through a bounded channel to a pool
//!   of workers.
//! - [`work_stealing`]: the same decomposition, but tasks are placed on
//!   per-worker [`TaskDeque`]s and idle workers steal from their peers.
//!
//! The [`Integrator`] facade picks a [`Driver`] at runtime.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod decompose;
pub mod deque;
pub mod error;
pub mod integrator;
pub mod metrics;
pub mod pipeline;
pub mod placement;
pub mod sequential;
pub mod work_stealing;

pub use config::EngineConfig;
pub use decompose::Decomposer;
pub use deque::TaskDeque;
pub use error::EngineError;
pub use integrator::{Driver, Integrator, Run, UnknownDriver};
pub use metrics::{RunMetrics, WorkerMetrics};
pub use placement::{Pinned, Placement, RoundRobin, WeightedRandom};
