//! Error types for scenario loading and trajectory export.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use rkpar_core::ConfigError;

/// Errors from [`Scenario::load()`](crate::Scenario::load) and
/// [`Scenario::parse()`](crate::Scenario::parse).
///
/// Line numbers are 1-based.
#[derive(Debug)]
pub enum ScenarioError {
    /// The file could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file does not have exactly ten non-trailing lines.
    LineCount {
        /// Lines found after dropping trailing blank lines.
        found: usize,
    },
    /// A value is not a number.
    Parse {
        /// Line holding the value.
        line: usize,
        /// The offending text, trimmed.
        value: String,
    },
    /// A line holds the wrong number of comma-separated values.
    ValueCount {
        /// Line with the mismatch.
        line: usize,
        /// Values required (the body count, or 2 for the interval).
        expected: usize,
        /// Values present.
        found: usize,
    },
    /// The interval or step size was rejected.
    Config(ConfigError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read scenario {}: {source}", path.display())
            }
            Self::LineCount { found } => {
                write!(f, "scenario must have 10 lines, found {found}")
            }
            Self::Parse { line, value } => {
                write!(f, "line {line}: '{value}' is not a number")
            }
            Self::ValueCount {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} values, found {found}"),
            Self::Config(e) => write!(f, "invalid integration settings: {e}"),
        }
    }
}

impl Error for ScenarioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Errors from the JSON exporter.
#[derive(Debug)]
pub enum ExportError {
    /// The output could not be created or written.
    Io(io::Error),
    /// JSON serialization failed.
    Serialize(serde_json::Error),
    /// The trajectory's state dimension is not `6 * bodies`.
    DimensionMismatch {
        /// `6 * bodies`.
        expected: usize,
        /// The trajectory's dimension.
        found: usize,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot write trajectory: {e}"),
            Self::Serialize(e) => write!(f, "cannot encode trajectory: {e}"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "state dimension {found} does not match {expected} for the given body count"
            ),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::DimensionMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}
