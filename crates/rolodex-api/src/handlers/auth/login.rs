//! Login handler
//!
//! POST /api/auth/login — authenticates a user and returns the role
//! plus a signed JWT.

use actix_web::{web, HttpResponse};
use log::debug;
use rolodex_auth::{create_token, verify_password, AuthSettings, UserRepository};
use std::sync::Arc;

use super::models::{LoginRequest, LoginResponse};
use super::map_auth_error;
use crate::models::MessageResponse;

pub async fn login_handler(
    user_repo: web::Data<Arc<dyn UserRepository>>,
    settings: web::Data<AuthSettings>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let user = match user_repo.get_by_username(&body.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("login attempt for unknown user '{}'", body.username);
            return HttpResponse::Unauthorized().json(MessageResponse::new("Invalid credentials"));
        }
        Err(err) => return map_auth_error(err),
    };

    match verify_password(&body.password, &user.password_hash).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Unauthorized().json(MessageResponse::new("Invalid credentials"));
        }
        Err(err) => return map_auth_error(err),
    }

    match create_token(&user, &settings.jwt_secret, settings.jwt_expiry_hours) {
        Ok(token) => HttpResponse::Ok().json(LoginResponse { role: user.role, token }),
        Err(err) => map_auth_error(err),
    }
}
