//! Error types for the Nullable substrate.
//!
//! Uses `thiserror` for ergonomic error definition. Every failure is
//! surfaced unchanged to the immediate caller; there are no retries and
//! no fallback values. Attribute *absence* is never an error — lookup
//! helpers model it as `Ok(None)`.

use thiserror::Error;

use crate::handle::ObjRef;

/// The main error type for substrate operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a stale handle error.
    #[must_use]
    pub fn stale_handle(handle: ObjRef) -> Self {
        Self::new(ErrorKind::StaleHandle(handle))
    }

    /// Creates a heap exhausted error.
    #[must_use]
    pub fn heap_exhausted(limit: usize) -> Self {
        Self::new(ErrorKind::HeapExhausted { limit })
    }

    /// Creates an unhashable value error.
    #[must_use]
    pub fn unhashable(type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unhashable {
            type_name: type_name.into(),
        })
    }

    /// Creates an attribute lookup error.
    #[must_use]
    pub fn attribute_error(type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::AttributeError {
            type_name: type_name.into(),
            attribute: attribute.into(),
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected,
            actual: actual.into(),
        })
    }

    /// Creates an error for an operation whose semantics are not yet defined.
    #[must_use]
    pub fn unimplemented(operation: &'static str) -> Self {
        Self::new(ErrorKind::Unimplemented(operation))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Handle refers to a slot that has been freed or reused.
    #[error("stale handle: {0:?}")]
    StaleHandle(ObjRef),

    /// Heap cannot allocate another object (configured capacity reached).
    #[error("heap exhausted: live object limit ({limit}) reached")]
    HeapExhausted {
        /// The configured live-object limit.
        limit: usize,
    },

    /// Value kind does not support hashing.
    #[error("unhashable value of type {type_name}")]
    Unhashable {
        /// Internal name of the value's kind.
        type_name: String,
    },

    /// Attribute lookup failed (distinct from the attribute being absent).
    #[error("attribute lookup failed: {attribute} on {type_name}")]
    AttributeError {
        /// Internal name of the value's kind.
        type_name: String,
        /// The attribute whose lookup failed.
        attribute: String,
    },

    /// Value had the wrong kind for an operation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected kind.
        expected: &'static str,
        /// Internal name of the actual kind.
        actual: String,
    },

    /// Operation is present on the surface but its semantics are undefined.
    #[error("operation not implemented: {0}")]
    Unimplemented(&'static str),
}

/// Result type alias for substrate operations.
pub type Result<T> = std::result::Result<T, Error>;
