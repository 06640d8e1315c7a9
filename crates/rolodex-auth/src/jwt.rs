//! JWT issuing and validation.
//!
//! Tokens are HS256-signed and embed the user's role; protected
//! handlers trust the role claim only after signature and expiry
//! validation. This is what moves authorization to the service
//! boundary instead of a client-held role string.

use crate::error::{AuthError, AuthResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rolodex_commons::{Role, User};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Username, for logging and responses
    pub username: String,

    /// Verified role of the user
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signs a token for a user.
pub fn create_token(user: &User, secret: &str, expiry_hours: i64) -> AuthResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Validates signature and expiry, returning the claims.
pub fn validate_token(token: &str, secret: &str) -> AuthResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::TokenError(e.to_string()))
}
