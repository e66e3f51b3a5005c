//! Error types for color parsing and ramp construction

use std::num::ParseIntError;
use thiserror::Error;

/// A hex color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Must be 3 or 6 hex digits after stripping '#'
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// A color ramp could not be built from its stops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RampError {
    #[error("color ramp needs at least one stop")]
    Empty,

    #[error("invalid ramp stop {index}: {source}")]
    InvalidStop {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}
