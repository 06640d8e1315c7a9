//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting previously handled directly
//! in `main.rs`: opening the storage backend, wiring the registry and
//! user repository, and running the HTTP server.

use crate::config::ServerConfig;
use crate::middleware;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};
use rolodex_api::configure_routes;
use rolodex_api::models::MessageResponse;
use rolodex_auth::{hash_password, AuthSettings, StoreUserRepo, UserRepository};
use rolodex_commons::{Role, User, UserId};
use rolodex_registry::RecordRegistry;
use rolodex_store::{InMemoryBackend, RocksDbBackend, StorageBackend};
use std::sync::Arc;

/// Aggregated application components shared across the HTTP workers.
pub struct ApplicationComponents {
    pub registry: Arc<RecordRegistry>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_settings: AuthSettings,
}

/// Open the storage backend, the record registry, and the user
/// repository, and seed the bootstrap admin when configured.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let phase_start = std::time::Instant::now();

    let backend: Arc<dyn StorageBackend> = match config.storage.backend.as_str() {
        "memory" => {
            warn!("Using in-memory storage: data will not survive a restart");
            Arc::new(InMemoryBackend::new())
        }
        _ => {
            std::fs::create_dir_all(&config.storage.data_dir)?;
            let backend = RocksDbBackend::open(&config.storage.data_dir)
                .map_err(|e| anyhow!("Failed to open storage at {}: {}", config.storage.data_dir, e))?;
            info!(
                "Storage opened at {} ({:.2}ms)",
                config.storage.data_dir,
                phase_start.elapsed().as_secs_f64() * 1000.0
            );
            Arc::new(backend)
        }
    };

    // Registry open rebuilds the uniqueness indexes and reseeds the id
    // sequence from what is on disk.
    let phase_start = std::time::Instant::now();
    let registry = Arc::new(
        RecordRegistry::open(backend.clone())
            .map_err(|e| anyhow!("Failed to open record registry: {}", e))?,
    );
    info!(
        "Record registry ready ({:.2}ms)",
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    let user_repo: Arc<dyn UserRepository> = Arc::new(
        StoreUserRepo::open(backend)
            .map_err(|e| anyhow!("Failed to open user repository: {}", e))?,
    );

    let auth_settings = AuthSettings {
        jwt_secret: config.auth.jwt_secret.clone(),
        jwt_expiry_hours: config.auth.jwt_expiry_hours,
        bcrypt_cost: config.auth.bcrypt_cost,
    };

    seed_bootstrap_admin(config, user_repo.as_ref()).await?;

    Ok(ApplicationComponents { registry, user_repo, auth_settings })
}

/// Create the initial admin account when the user store is empty and a
/// bootstrap password is configured. Without it the first registration
/// would have no admin to grant roles.
async fn seed_bootstrap_admin(
    config: &ServerConfig,
    user_repo: &dyn UserRepository,
) -> Result<()> {
    let Some(password) = config.auth.bootstrap_admin_password.as_deref() else {
        return Ok(());
    };

    let existing = user_repo
        .count()
        .await
        .map_err(|e| anyhow!("Failed to count users: {}", e))?;
    if existing > 0 {
        return Ok(());
    }

    let username = config.auth.bootstrap_admin_username.trim();
    let password_hash = hash_password(password, config.auth.bcrypt_cost)
        .await
        .map_err(|e| anyhow!("Failed to hash bootstrap admin password: {}", e))?;

    let admin = User {
        id: UserId::generate(),
        username: username.to_string(),
        password_hash,
        role: Role::Admin,
        created_at: Utc::now(),
    };
    user_repo
        .insert(&admin)
        .await
        .map_err(|e| anyhow!("Failed to seed bootstrap admin: {}", e))?;
    info!("Seeded bootstrap admin '{}'", username);
    Ok(())
}

/// Run the HTTP server until a termination signal is received.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let ApplicationComponents { registry, user_repo, auth_settings } = components;

    let registry_data = web::Data::new(registry);
    let user_repo_data = web::Data::new(user_repo);
    let auth_data = web::Data::new(auth_settings.clone());
    let cors_config = config.cors.clone();

    let bind_addr = (config.server.host.clone(), config.server.port);
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let auth = auth_settings.clone();
        // Malformed JSON bodies get the same {"message": ...} shape as
        // every other client error.
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(MessageResponse::new(message)),
            )
            .into()
        });

        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(registry_data.clone())
            .app_data(user_repo_data.clone())
            .app_data(auth_data.clone())
            .app_data(json_config)
            .configure(|cfg| configure_routes(cfg, &auth))
    })
    .workers(config.server.workers)
    .bind(bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
