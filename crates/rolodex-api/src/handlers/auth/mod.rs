//! Authentication endpoints.
//!
//! - POST /api/auth/register — create a credential with a hashed secret
//! - POST /api/auth/login    — verify credentials, return role + token

pub mod models;

mod login;
mod register;

pub use login::login_handler;
pub use register::register_handler;

use actix_web::HttpResponse;
use rolodex_auth::AuthError;

use crate::models::MessageResponse;

/// Map authentication errors to HTTP responses.
///
/// Unknown user and wrong password collapse into one 401 message to
/// prevent user enumeration.
pub(crate) fn map_auth_error(err: AuthError) -> HttpResponse {
    match err {
        AuthError::InvalidCredentials => {
            HttpResponse::Unauthorized().json(MessageResponse::new("Invalid credentials"))
        }
        AuthError::UserExists => {
            HttpResponse::BadRequest().json(MessageResponse::new("User already exists"))
        }
        AuthError::WeakPassword(msg) => HttpResponse::BadRequest().json(MessageResponse::new(msg)),
        AuthError::HashingError(_) | AuthError::TokenError(_) | AuthError::DatabaseError(_) => {
            log::error!("auth failure: {}", err);
            HttpResponse::InternalServerError().json(MessageResponse::new("Server error"))
        }
    }
}
