//! # Error Types
//!
//! Errors in this crate are integration failures: an environment that does
//! not supply the observation fields a puppeteer reads, a field with the
//! wrong shape, or a goal vocabulary that cannot be built. None of them are
//! transient, so none of them are retried.

use thiserror::Error;

use crate::shape::Shape;

/// Core errors for observations, arrays and goals.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// The same name appeared twice in a goal vocabulary.
    #[error("Duplicate goal name: {name}")]
    DuplicateGoal { name: String },

    /// A goal name was looked up that the vocabulary does not contain.
    #[error("Unknown goal: {name}")]
    UnknownGoal { name: String },

    /// A required observation key is absent.
    #[error("Missing observation field: {key}")]
    MissingObservation { key: String },

    /// A path step expected a nested observation block but found an array.
    #[error("Observation field {key} is not a nested block")]
    NotNested { key: String },

    /// A path ended on a nested block where an array was expected.
    #[error("Observation field {key} is not an array")]
    NotAnArray { key: String },

    /// An observation array does not have the shape its reader requires.
    #[error("Shape mismatch for {key}: expected {expected}, got {got}")]
    ShapeMismatch {
        key: String,
        expected: String,
        got: Shape,
    },

    /// Buffer length disagrees with the product of the requested dimensions.
    #[error("Buffer length {got} does not match dimensions (expected {expected} elements)")]
    BufferLength { expected: usize, got: usize },
}
