//! Shared error types for Rolodex.
//!
//! The registry error taxonomy is small and fixed: the two duplicate
//! variants carry the exact messages the HTTP contract promises, so
//! handlers can serialize `err.to_string()` directly into the
//! `{"message": ...}` body.

use std::fmt;

/// Error type for record registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A non-deleted record already uses the candidate's customer name.
    DuplicateName,

    /// A non-deleted record already uses the candidate's email.
    DuplicateEmail,

    /// No record matches the given id.
    NotFound(String),

    /// Malformed or missing required field.
    Validation(String),

    /// Unexpected persistence failure.
    Storage(String),
}

impl RegistryError {
    /// Creates a NotFound error with a message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a Validation error with a message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a Storage error with a message.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName => write!(f, "Name is already in use."),
            RegistryError::DuplicateEmail => write!(f, "Email is already in use."),
            RegistryError::NotFound(msg) => write!(f, "{}", msg),
            RegistryError::Validation(msg) => write!(f, "{}", msg),
            RegistryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Result type alias using RegistryError.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_messages_match_contract() {
        assert_eq!(RegistryError::DuplicateName.to_string(), "Name is already in use.");
        assert_eq!(RegistryError::DuplicateEmail.to_string(), "Email is already in use.");
    }

    #[test]
    fn test_error_creation() {
        let err = RegistryError::not_found("Record not found");
        assert!(matches!(err, RegistryError::NotFound(_)));
        assert_eq!(err.to_string(), "Record not found");

        let err = RegistryError::validation("phone must be 10 digits");
        assert!(matches!(err, RegistryError::Validation(_)));

        let err = RegistryError::storage("disk full");
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
