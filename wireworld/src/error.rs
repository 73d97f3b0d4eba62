// error.rs - Error types for the wireworld engine
//
// Every failure the engine reports to the presentation layer lives in
// WireworldError. The two permissive behaviours (paste clipping at grid
// edges, load skipping unknown characters) are not errors.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum WireworldError {
    /// Grid or buffer construction with a zero extent
    #[error("invalid dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: usize, height: usize },

    /// Coordinate outside the grid or buffer extent
    #[error("coordinate ({x}, {y}) is outside {width}x{height}")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Capture with inverted or out-of-range corners
    #[error("invalid region ({x0}, {y0})..=({x1}, {y1}) on {width}x{height}")]
    InvalidRegion {
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        width: usize,
        height: usize,
    },

    /// Persistence record that does not fit the target grid
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Underlying I/O failure on save or load
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Lookup of a preset that does not exist
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A row task of the concurrent stepper panicked or was cancelled
    #[error("step failed: {0}")]
    StepFailed(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, WireworldError>;

impl WireworldError {
    /// Creates a new malformed-record error.
    #[must_use]
    pub fn malformed<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
