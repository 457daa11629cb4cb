//! Error types for canvas operations.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised by the canvas API.
///
/// Operations that have nothing to act on (mouse input or export with no
/// image loaded) are silent no-ops and never produce these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// An HSV shift was given with the wrong number of components
    #[error("HSV shift needs exactly 3 components (hue, saturation, value), got {found}")]
    InvalidHsvDelta {
        /// Number of components supplied
        found: usize,
    },

    /// An HSV shift component is not an integer
    #[error("Invalid HSV shift component: {0}")]
    InvalidHsvComponent(#[from] ParseIntError),
}
