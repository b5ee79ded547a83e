//! Error types for grid rendering.
//!
//! This module provides [`GridError`], the error type returned by the render
//! entry points. Only one condition is fatal to a render call: a cell input
//! whose content cannot be reduced to a string. Every other anomaly (a cell
//! that cannot be placed, a row span whose fixed heights are too small)
//! degrades gracefully and is reported through `tracing` warnings instead.

use std::fmt;

/// Error type for grid layout and rendering operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum GridError {
    /// A cell input had an unsupported shape: an object without a
    /// recognizable `content` field, or a `content` value that is not a
    /// string, number, boolean, or null.
    InvalidCellType(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidCellType(msg) => {
                write!(f, "invalid cell content type: {}", msg)
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_offender() {
        let err = GridError::InvalidCellType("array".to_string());
        assert!(err.to_string().contains("invalid cell content type"));
        assert!(err.to_string().contains("array"));
    }
}
