//! Error types for the value model

use thiserror::Error;

use crate::value::ValueType;

/// Result type for value operations
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors raised when a value is read or converted as the wrong shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The active tag is not the one the caller asked for
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    /// The tag is right but the payload does not fit the target type
    #[error("value {value} is out of range for {target}")]
    OutOfRange {
        value: String,
        target: &'static str,
    },

    /// A compound value is missing one of its fields
    #[error("missing field '{0}'")]
    MissingField(String),

    /// The value has no counterpart in the external representation
    #[error("unrepresentable value: {0}")]
    Unrepresentable(String),
}

impl ValueError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: ValueType, found: ValueType) -> Self {
        ValueError::TypeMismatch { expected, found }
    }

    /// Create an out of range error
    pub fn out_of_range(value: impl ToString, target: &'static str) -> Self {
        ValueError::OutOfRange {
            value: value.to_string(),
            target,
        }
    }
}
