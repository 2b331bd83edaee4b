//! Errors raised when a mutation would break a field invariant.

use thiserror::Error;

/// Result type for field-level validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Invariant violations detected at the call site of a field assignment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// An element's runtime kind is not in the list's allow-set.
    #[error("kind `{kind}` is not allowed here (allowed: {allowed})")]
    DisallowedKind { kind: String, allowed: String },

    /// A dimension that must be non-negative was negative.
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    /// An insertion index past the end of a list.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
