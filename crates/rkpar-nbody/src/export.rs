//! Per-body time series export.
//!
//! A trajectory of an `n`-body system is regrouped by body: each
//! [`BodySeries`] lists that body's position and velocity at every sampled
//! time. Bodies are numbered from 1. The JSON form is an array of series:
//!
//! ```json
//! [
//!   {
//!     "body": 1,
//!     "positions": [{ "time": 0.0, "position": [0.0, 0.0, 0.0] }],
//!     "velocities": [{ "time": 0.0, "velocity": [0.0, 0.0, 0.0] }]
//!   }
//! ]
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rkpar_core::Trajectory;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExportError;

/// Position of one body at one time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Sample time.
    pub time: f64,
    /// `[x, y, z]`.
    pub position: [f64; 3],
}

/// Velocity of one body at one time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VelocitySample {
    /// Sample time.
    pub time: f64,
    /// `[vx, vy, vz]`.
    pub velocity: [f64; 3],
}

/// Every sample of one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySeries {
    /// 1-based body number.
    pub body: usize,
    /// Positions in time order.
    pub positions: Vec<PositionSample>,
    /// Velocities in time order.
    pub velocities: Vec<VelocitySample>,
}

/// Regroup a trajectory of `bodies` bodies into per-body series.
pub fn body_series(
    trajectory: &Trajectory,
    bodies: usize,
) -> Result<Vec<BodySeries>, ExportError> {
    let expected = 6 * bodies;
    if trajectory.dimension() != expected {
        return Err(ExportError::DimensionMismatch {
            expected,
            found: trajectory.dimension(),
        });
    }

    let half = 3 * bodies;
    let mut series: Vec<BodySeries> = (0..bodies)
        .map(|i| BodySeries {
            body: i + 1,
            positions: Vec::with_capacity(trajectory.len()),
            velocities: Vec::with_capacity(trajectory.len()),
        })
        .collect();

    for (&time, state) in trajectory.times().iter().zip(trajectory.states()) {
        let (positions, velocities) = state.split_at(half);
        for (i, s) in series.iter_mut().enumerate() {
            s.positions.push(PositionSample {
                time,
                position: [positions[3 * i], positions[3 * i + 1], positions[3 * i + 2]],
            });
            s.velocities.push(VelocitySample {
                time,
                velocity: [
                    velocities[3 * i],
                    velocities[3 * i + 1],
                    velocities[3 * i + 2],
                ],
            });
        }
    }
    Ok(series)
}

/// Write `series` as pretty-printed JSON.
pub fn write_json<W: Write>(writer: W, series: &[BodySeries]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, series)?;
    Ok(())
}

/// Regroup `trajectory` and write it to `path` as JSON.
pub fn export_json(
    path: impl AsRef<Path>,
    trajectory: &Trajectory,
    bodies: usize,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let series = body_series(trajectory, bodies)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, &series)?;
    writer.flush()?;
    debug!(path = %path.display(), bodies, samples = trajectory.len(), "exported trajectory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rkpar_core::IntegrationConfig;

    fn two_body_trajectory() -> Trajectory {
        let cfg = IntegrationConfig::new(0.5, 0.0, 1.0).unwrap();
        let initial: Vec<f64> = (0..12).map(f64::from).collect();
        Trajectory::new(&cfg, &initial)
    }

    #[test]
    fn regroups_by_body() {
        let series = body_series(&two_body_trajectory(), 2).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].body, 1);
        assert_eq!(series[1].body, 2);
        assert_eq!(series[1].positions.len(), 3);
        assert_eq!(
            series[1].positions[0],
            PositionSample {
                time: 0.0,
                position: [3.0, 4.0, 5.0]
            }
        );
        assert_eq!(series[0].velocities[0].velocity, [6.0, 7.0, 8.0]);
        assert_eq!(series[1].velocities[0].velocity, [9.0, 10.0, 11.0]);
    }

    #[test]
    fn rejects_mismatched_body_count() {
        let err = body_series(&two_body_trajectory(), 3).unwrap_err();
        assert!(matches!(
            err,
            ExportError::DimensionMismatch {
                expected: 18,
                found: 12
            }
        ));
    }

    #[test]
    fn json_uses_the_documented_field_names() {
        let series = body_series(&two_body_trajectory(), 2).unwrap();
        let mut buf = Vec::new();
        write_json(&mut buf, &series).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["body"], 1);
        assert_eq!(value[1]["positions"][0]["position"][0], 3.0);
        assert_eq!(value[0]["velocities"][0]["time"], 0.0);
        let back: Vec<BodySeries> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, series);
    }
}
