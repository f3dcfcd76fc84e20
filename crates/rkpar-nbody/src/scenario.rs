//! Scenario files: a fixed ten-line textual layout.
//!
//! ```text
//! 1.0, 0.001              <- masses, one per body
//! 0.0, 1.0                <- x positions
//! 0.0, 0.0                <- y positions
//! 0.0, 0.0                <- z positions
//! 0.0, 0.0                <- x velocities
//! 0.0, 1.0                <- y velocities
//! 0.0, 0.0                <- z velocities
//! 1.0                     <- gravitational constant
//! 0.0, 10.0               <- start, end
//! 0.01                    <- fine step size
//! ```
//!
//! Values are comma separated with optional surrounding whitespace.
//! Trailing blank lines are ignored.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rkpar_core::IntegrationConfig;
use tracing::{debug, warn};

use crate::error::ScenarioError;
use crate::gravitation::Gravitation;

const LINES: usize = 10;

/// A gravitational system with its initial conditions and integration
/// interval.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Masses and gravitational constant.
    pub gravitation: Gravitation,
    /// Initial position of each body.
    pub positions: Vec<[f64; 3]>,
    /// Initial velocity of each body.
    pub velocities: Vec<[f64; 3]>,
    /// Interval and fine step.
    pub config: IntegrationConfig,
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            bodies = scenario.bodies(),
            steps = scenario.config.total_steps(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Parse scenario text.
    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() != LINES {
            return Err(ScenarioError::LineCount { found: lines.len() });
        }

        let masses = parse_values(1, lines[0])?;
        let n = masses.len();

        let mut positions = vec![[0.0; 3]; n];
        let mut velocities = vec![[0.0; 3]; n];
        for axis in 0..3 {
            let line = 2 + axis;
            let values = parse_exact(line, lines[line - 1], n)?;
            for (p, v) in positions.iter_mut().zip(values) {
                p[axis] = v;
            }
            let line = 5 + axis;
            let values = parse_exact(line, lines[line - 1], n)?;
            for (p, v) in velocities.iter_mut().zip(values) {
                p[axis] = v;
            }
        }

        let g = parse_exact(8, lines[7], 1)?[0];
        let interval = parse_exact(9, lines[8], 2)?;
        let step = parse_exact(10, lines[9], 1)?[0];
        let (start, end) = (interval[0], interval[1]);
        let config = IntegrationConfig::new(step, start, end)?;

        let exact = (end - start) / step;
        if (exact - config.total_steps() as f64).abs() > 1e-9 * exact.max(1.0) {
            warn!(
                step,
                start,
                end,
                steps = config.total_steps(),
                "step does not divide the interval; integration stops short of end"
            );
        }

        Ok(Self {
            gravitation: Gravitation::new(masses, g),
            positions,
            velocities,
            config,
        })
    }

    /// Number of bodies.
    pub fn bodies(&self) -> usize {
        self.gravitation.bodies()
    }

    /// The packed initial state vector.
    pub fn initial_state(&self) -> Vec<f64> {
        self.gravitation.initial_state(&self.positions, &self.velocities)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_values(line: usize, text: &str) -> Result<Vec<f64>, ScenarioError> {
    text.split(',')
        .map(|raw| {
            let value = raw.trim();
            value.parse::<f64>().map_err(|_| ScenarioError::Parse {
                line,
                value: value.to_string(),
            })
        })
        .collect()
}

fn parse_exact(line: usize, text: &str, expected: usize) -> Result<Vec<f64>, ScenarioError> {
    let values = parse_values(line, text)?;
    if values.len() != expected {
        return Err(ScenarioError::ValueCount {
            line,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BODY: &str = "\
1.0, 0.001
0.0, 1.0
0.0, 0.0
0.0, 0.0
0.0, 0.0
0.0, 1.0
0.0, 0.0
1.0
0.0, 10.0
0.01
";

    #[test]
    fn parses_the_documented_layout() {
        let s = Scenario::parse(TWO_BODY).unwrap();
        assert_eq!(s.bodies(), 2);
        assert_eq!(s.gravitation.masses(), &[1.0, 0.001]);
        assert_eq!(s.gravitation.g(), 1.0);
        assert_eq!(s.positions, vec![[0.0; 3], [1.0, 0.0, 0.0]]);
        assert_eq!(s.velocities, vec![[0.0; 3], [0.0, 1.0, 0.0]]);
        assert_eq!(s.config.start(), 0.0);
        assert_eq!(s.config.end(), 10.0);
        assert_eq!(s.config.total_steps(), 1000);
        assert_eq!(
            s.initial_state(),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let text = format!("{TWO_BODY}\n\n   \n");
        assert!(text.parse::<Scenario>().is_ok());
    }

    #[test]
    fn wrong_line_count_is_rejected() {
        let text: String = TWO_BODY.lines().take(9).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            Scenario::parse(&text),
            Err(ScenarioError::LineCount { found: 9 })
        ));
    }

    #[test]
    fn bad_number_reports_its_line() {
        let text = TWO_BODY.replacen("0.0, 0.0\n", "0.0, zero\n", 1);
        match Scenario::parse(&text) {
            Err(ScenarioError::Parse { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "zero");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn body_count_mismatch_is_rejected() {
        let text = TWO_BODY.replacen("0.0, 1.0\n", "0.0, 1.0, 2.0\n", 1);
        assert!(matches!(
            Scenario::parse(&text),
            Err(ScenarioError::ValueCount {
                line: 2,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn interval_needs_two_values() {
        let text = TWO_BODY.replace("0.0, 10.0", "0.0");
        assert!(matches!(
            Scenario::parse(&text),
            Err(ScenarioError::ValueCount {
                line: 9,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn invalid_interval_is_a_config_error() {
        let text = TWO_BODY.replace("0.0, 10.0", "10.0, 10.0");
        assert!(matches!(
            Scenario::parse(&text),
            Err(ScenarioError::Config(_))
        ));
        let text = TWO_BODY.replace("\n0.01\n", "\n0\n");
        assert!(matches!(
            Scenario::parse(&text),
            Err(ScenarioError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Scenario::load("/nonexistent/rkpar/scenario.txt").unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
        assert!(err.to_string().contains("scenario.txt"));
    }
}
