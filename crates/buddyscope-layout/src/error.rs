//! Error types for viewport construction.

use std::fmt;

/// Errors arising from viewport construction or resizing.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportError {
    /// The render width must be positive and finite.
    InvalidWidth {
        /// The offending width.
        width: f64,
    },
    /// The level height must be positive and finite.
    InvalidLevelHeight {
        /// The offending height.
        height: f64,
    },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { width } => {
                write!(f, "render width must be positive and finite, got {width}")
            }
            Self::InvalidLevelHeight { height } => {
                write!(f, "level height must be positive and finite, got {height}")
            }
        }
    }
}

impl std::error::Error for ViewportError {}
