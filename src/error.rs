//! Error types for the Relab harness.
//!
//! This module provides a unified error type for all operations in the
//! harness, using the `thiserror` crate for ergonomic error handling.
//!
//! All data-shape and I/O errors are fatal to an experiment run: the harness
//! is a single-shot batch pipeline, so failures abort with a diagnostic
//! naming the field, file, or shape check that failed. There is no retry or
//! partial-result recovery.

use thiserror::Error;

/// The main error type for Relab operations.
///
/// This enum represents all possible error conditions that can occur while
/// assembling experiment inputs, exchanging container files with the engine,
/// or reshaping its outputs.
#[derive(Error, Debug)]
pub enum RelabError {
    /// Parallel sequences packaged under one task map differ in length
    #[error("Shape mismatch in field '{field}': expected {expected} samples, got {actual}")]
    ShapeMismatch {
        /// Name of the offending field
        field: String,
        /// Sample count the map was established with
        expected: usize,
        /// Sample count actually supplied
        actual: usize,
    },

    /// Reshape precondition violated (size mismatch, non-square sample count)
    #[error("Shape error: {0}")]
    Shape(String),

    /// Container lacks an expected field
    #[error("Missing field '{field}' in container")]
    MissingField {
        /// Name of the absent field
        field: String,
    },

    /// Field exists in the container but under a different element type
    #[error("Field '{field}' is not of type {expected}")]
    FieldType {
        /// Name of the field
        field: String,
        /// Type the caller asked for
        expected: &'static str,
    },

    /// Edge references a node index outside the topology's range
    #[error("Node index {index} out of range for topology of {num_nodes} nodes")]
    NodeOutOfRange {
        /// The offending node index
        index: u32,
        /// Number of nodes in the topology
        num_nodes: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Index out of bounds
    #[error("Index out of bounds: index {index}, length {length}")]
    IndexOutOfBounds {
        /// The index that was accessed
        index: usize,
        /// The valid length
        length: usize,
    },

    /// The external engine failed to launch, timed out, or exited abnormally
    #[error("Engine process failure: {reason}")]
    Process {
        /// Human-readable description of the failure
        reason: String,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container (de)serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Engine config (de)serialization error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for Relab operations.
///
/// This is a type alias for `Result<T, RelabError>` and is used throughout
/// the crate for consistency.
pub type Result<T> = std::result::Result<T, RelabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelabError::ShapeMismatch {
            field: "F".to_string(),
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch in field 'F': expected 4 samples, got 3"
        );

        let err = RelabError::MissingField {
            field: "responses".to_string(),
        };
        assert_eq!(err.to_string(), "Missing field 'responses' in container");

        let err = RelabError::Process {
            reason: "exited with status 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Engine process failure: exited with status 1"
        );
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
