//! Registration handler
//!
//! POST /api/auth/register — creates a credential with a bcrypt-hashed
//! secret. The plain password never reaches the store.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use rolodex_auth::{hash_password, validate_password, AuthSettings, UserRepository};
use rolodex_commons::{User, UserId};
use std::sync::Arc;

use super::map_auth_error;
use super::models::RegisterRequest;
use crate::models::MessageResponse;

pub async fn register_handler(
    user_repo: web::Data<Arc<dyn UserRepository>>,
    settings: web::Data<AuthSettings>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    let username = body.username.trim();
    if username.is_empty() {
        return HttpResponse::BadRequest().json(MessageResponse::new("Username is required"));
    }

    if let Err(err) = validate_password(&body.password) {
        return map_auth_error(err);
    }

    let password_hash = match hash_password(&body.password, settings.bcrypt_cost).await {
        Ok(hash) => hash,
        Err(err) => return map_auth_error(err),
    };

    let user = User {
        id: UserId::generate(),
        username: username.to_string(),
        password_hash,
        role: body.role,
        created_at: Utc::now(),
    };

    match user_repo.insert(&user).await {
        Ok(()) => {
            info!("registered user '{}' with role {}", user.username, user.role);
            HttpResponse::Created().json(MessageResponse::new("User registered successfully"))
        }
        Err(err) => map_auth_error(err),
    }
}
