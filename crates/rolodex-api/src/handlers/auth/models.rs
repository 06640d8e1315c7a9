//! Request/response models for the auth endpoints.

use rolodex_commons::Role;
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body: the role for UI gating plus the token the
/// server actually trusts on later requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub role: Role,
    pub token: String,
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Defaults to the non-privileged role when omitted.
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}
