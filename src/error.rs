//! Stroke construction errors

use thiserror::Error;

/// Errors reported when a stroke definition is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrokeError {
    /// The point sequence is empty
    #[error("stroke has no points")]
    EmptyPoints,

    /// Explicit pressures are not parallel to the points
    #[error("pressure count {pressures} does not match point count {points}")]
    PressureMismatch { points: usize, pressures: usize },

    /// Width is zero, negative or NaN
    #[error("stroke width must be positive, got {0}")]
    InvalidWidth(f64),

    /// A point has a NaN or infinite coordinate
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

/// Result type for stroke operations
pub type Result<T> = std::result::Result<T, StrokeError>;
