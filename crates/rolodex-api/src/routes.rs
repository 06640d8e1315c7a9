//! API routes configuration
//!
//! All endpoints live under the `/api` prefix:
//! - POST   /api/auth/register      — create a credential
//! - POST   /api/auth/login         — authenticate, get role + token
//! - POST   /api/records            — create a record (auth)
//! - GET    /api/records            — list all (auth, admin)
//! - GET    /api/records/search     — filtered search (auth)
//! - GET    /api/records/{id}       — direct lookup (auth)
//! - PUT    /api/records/{id}       — update (auth)
//! - DELETE /api/records/{id}       — soft delete one (auth)
//! - DELETE /api/records            — soft delete all (auth, admin)
//! - GET    /api/healthcheck        — liveness probe (open)

use crate::handlers;
use crate::middleware::AuthMiddleware;
use actix_web::web;
use rolodex_auth::AuthSettings;

/// Configure all API routes. The auth settings feed the bearer-token
/// middleware wrapped around the record endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig, auth: &AuthSettings) {
    cfg.service(
        web::scope("/api")
            .route("/healthcheck", web::get().to(handlers::healthcheck_handler))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::auth::register_handler))
                    .route("/login", web::post().to(handlers::auth::login_handler)),
            )
            .service(
                web::scope("/records")
                    .wrap(AuthMiddleware::new(auth.clone()))
                    // `/search` must be registered before `/{id}`
                    .route("/search", web::get().to(handlers::records::search_handler))
                    .route("", web::post().to(handlers::records::create_handler))
                    .route("", web::get().to(handlers::records::list_handler))
                    .route("", web::delete().to(handlers::records::delete_all_handler))
                    .route("/{id}", web::get().to(handlers::records::get_handler))
                    .route("/{id}", web::put().to(handlers::records::update_handler))
                    .route("/{id}", web::delete().to(handlers::records::delete_handler)),
            ),
    );
}
