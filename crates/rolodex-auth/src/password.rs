// Password hashing and validation module

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Default bcrypt cost factor. Overridable from config (tests use a
/// lower cost to stay fast).
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt has a 72-byte limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool so the CPU-heavy hash does not
/// stall the async runtime.
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash, on the blocking pool.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
pub async fn verify_password(password: &str, hashed: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Validate a password against the complexity policy: length bounds
/// only. Returns `WeakPassword` with the specific reason.
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the tests fast; production uses DEFAULT_COST.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hashed = hash_password("correct horse", Some(TEST_COST)).await.unwrap();
        assert!(verify_password("correct horse", &hashed).await.unwrap());
        assert!(!verify_password("wrong", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same password", Some(TEST_COST)).await.unwrap();
        let b = hash_password("same password", Some(TEST_COST)).await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(73)).is_err());
        assert!(validate_password("long enough").is_ok());
    }
}
