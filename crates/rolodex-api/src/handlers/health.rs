//! Health check endpoint handler

use actix_web::HttpResponse;
use serde_json::json;

/// GET /api/healthcheck — unauthenticated liveness probe.
pub async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
