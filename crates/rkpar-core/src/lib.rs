//! Core types for the rkpar integration framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces every driver shares: the [`Derivative`] contract, the validated
//! [`IntegrationConfig`], the single-step RK4 [`stepper`], the pre-sized
//! [`Trajectory`] arena with its disjoint [`TrajectorySegment`]s, and the
//! [`Task`] unit of parallel work.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod derivative;
pub mod error;
pub mod stepper;
pub mod task;
pub mod trajectory;

pub use config::IntegrationConfig;
pub use derivative::Derivative;
pub use error::ConfigError;
pub use stepper::{rk4_step, rk4_step_into, StepScratch};
pub use task::{Task, TaskSpan};
pub use trajectory::{SegmentCarver, Trajectory, TrajectorySegment};
