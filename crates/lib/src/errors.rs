//! Error types for record operations.
//!
//! Lookups and deletions are the only fallible core operations: construction,
//! assignment and update accept any input shape. The remaining variants cover
//! typed extraction and the mapping helpers that need a non-empty record.

use thiserror::Error;

/// Structured error types for record operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No entry is stored under the requested key or attribute name
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// A list position past the end of the list was requested
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation needs at least one entry
    #[error("{operation}(): record is empty")]
    Empty { operation: String },

    /// A value did not have the requested shape
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl RecordError {
    pub(crate) fn not_found(key: impl Into<String>) -> Self {
        RecordError::KeyNotFound { key: key.into() }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        RecordError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this error reports a missing key, attribute or list element
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecordError::KeyNotFound { .. } | RecordError::IndexOutOfRange { .. }
        )
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, RecordError::TypeMismatch { .. })
    }

    /// Check if this error was raised by an operation on an empty record
    pub fn is_empty_error(&self) -> bool {
        matches!(self, RecordError::Empty { .. })
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            RecordError::KeyNotFound { key } => Some(key),
            _ => None,
        }
    }
}

impl From<RecordError> for crate::Error {
    fn from(err: RecordError) -> Self {
        crate::Error::Record(err)
    }
}
