//! Gravitational N-body systems for rkpar.
//!
//! - [`Gravitation`]: Newtonian point-mass dynamics as a
//!   [`Derivative`](rkpar_core::Derivative) over a flat
//!   positions-then-velocities state vector.
//! - [`Scenario`]: the fixed ten-line scenario file format.
//! - [`export`]: per-body position and velocity series as JSON.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod gravitation;
pub mod scenario;

pub use error::{ExportError, ScenarioError};
pub use export::{body_series, export_json, write_json, BodySeries, PositionSample, VelocitySample};
pub use gravitation::{Gravitation, DEFAULT_SOFTENING};
pub use scenario::Scenario;
