//! Error types for the grid engine and the I/O boundary around it.

use thiserror::Error;

/// Failures reported by grid filters and the command layer.
///
/// All of them are synchronous and non-retryable. A filter that returns one
/// of these has left its grid untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Out-of-range, malformed or missing filter argument
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two grids (or two rows) whose shapes cannot be combined
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Degenerate zero-size grid
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Filter name not recognized
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Crate-level error: engine failures plus decode/encode and filesystem errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type GridResult<T> = std::result::Result<T, GridError>;

/// Result type for operations that may touch files
pub type Result<T> = std::result::Result<T, Error>;
