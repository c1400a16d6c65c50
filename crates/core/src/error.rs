//! Domain error model.

use thiserror::Error;

/// Result type used across the storefront crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, contract
/// violations, lookups). Transport concerns are folded into `Source`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input failed validation; the message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// A caller passed a value outside an operation's contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// The catalog source (fetch collaborator) failed.
    #[error("catalog source failed: {0}")]
    Source(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_displayed_verbatim() {
        let err = DomainError::validation("Comment cannot be empty.");
        assert_eq!(err.to_string(), "Comment cannot be empty.");
    }

    #[test]
    fn invalid_argument_is_prefixed() {
        let err = DomainError::invalid_argument("unknown sort order: sideways");
        assert_eq!(err.to_string(), "invalid argument: unknown sort order: sideways");
    }
}
