//! Authentication error types.

use std::fmt;

/// Errors from authentication flows.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// Unknown user or wrong password. Handlers collapse both into one
    /// message to prevent user enumeration.
    InvalidCredentials,

    /// Registration attempted with an existing username.
    UserExists,

    /// Password fails the complexity policy.
    WeakPassword(String),

    /// bcrypt failure.
    HashingError(String),

    /// Token signing or validation failure.
    TokenError(String),

    /// Underlying store failure.
    DatabaseError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::UserExists => write!(f, "User already exists"),
            AuthError::WeakPassword(msg) => write!(f, "{}", msg),
            AuthError::HashingError(msg) => write!(f, "Hashing error: {}", msg),
            AuthError::TokenError(msg) => write!(f, "Token error: {}", msg),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Result type alias using AuthError.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
