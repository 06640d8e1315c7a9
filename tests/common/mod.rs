//! Shared helpers for integration tests.
//!
//! Every test builds its own in-memory application state so tests can
//! run in parallel without sharing storage.

#![allow(dead_code)]

use actix_web::web;
use chrono::Utc;
use rolodex_auth::{create_token, AuthSettings, StoreUserRepo, UserRepository};
use rolodex_commons::{Role, User, UserId};
use rolodex_registry::RecordRegistry;
use rolodex_store::InMemoryBackend;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Application state for one test: registry and user repository over a
/// fresh in-memory backend, plus the auth settings used to sign tokens.
pub struct TestState {
    pub registry: web::Data<Arc<RecordRegistry>>,
    pub user_repo: web::Data<Arc<dyn UserRepository>>,
    pub settings: AuthSettings,
}

pub fn test_state() -> TestState {
    let backend = Arc::new(InMemoryBackend::new());
    let registry = Arc::new(RecordRegistry::open(backend.clone()).unwrap());
    let user_repo: Arc<dyn UserRepository> = Arc::new(StoreUserRepo::open(backend).unwrap());

    TestState {
        registry: web::Data::new(registry),
        user_repo: web::Data::new(user_repo),
        settings: AuthSettings {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiry_hours: 1,
            // Low cost keeps registration tests fast
            bcrypt_cost: Some(4),
        },
    }
}

/// Signed token for a synthetic user with the given role.
pub fn token_for(role: Role) -> String {
    let user = User {
        id: UserId::generate(),
        username: match role {
            Role::Admin => "test-admin".to_string(),
            Role::User => "test-user".to_string(),
        },
        password_hash: String::new(),
        role,
        created_at: Utc::now(),
    };
    create_token(&user, TEST_SECRET, 1).unwrap()
}

pub fn admin_token() -> String {
    token_for(Role::Admin)
}

pub fn user_token() -> String {
    token_for(Role::User)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// A valid record payload with the given name and email.
pub fn record_payload(customer_name: &str, email: &str) -> Value {
    json!({
        "customerName": customer_name,
        "designation": "Manager",
        "city": "Springfield",
        "segmentation": "MM",
        "email": email,
        "phone": "5551234567",
    })
}
