//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// missing records, uniqueness conflicts). Store/transport failures are
/// wrapped in `Store` at the repository boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Structurally valid input that violates a business rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record does not exist. The message carries the
    /// offending identifier and is surfaced to the caller verbatim.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated on create.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller does not own the requested record.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Persistence-layer failure (connection lost, constraint metadata
    /// unavailable, ...). Not a business outcome.
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// `NotFound` for a missing customer id, with the exact wire message.
    pub fn id_not_found(id: impl core::fmt::Display) -> Self {
        Self::NotFound(format!("Id {id} not found"))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_not_found_message_is_exact() {
        let err = DomainError::id_not_found(42);
        assert_eq!(err.to_string(), "Id 42 not found");
    }
}
