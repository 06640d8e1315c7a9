//! Authentication settings shared between the server and the API layer.

/// Runtime settings for token issuing and password hashing.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HMAC secret for JWT signing/validation.
    pub jwt_secret: String,
    /// Access-token lifetime in hours.
    pub jwt_expiry_hours: i64,
    /// bcrypt cost override; `None` uses the library default.
    pub bcrypt_cost: Option<u32>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiry_hours: 24,
            bcrypt_cost: None,
        }
    }
}
