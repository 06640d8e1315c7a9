//! List handler
//!
//! GET /api/records — every non-deleted record. Admin only: listing
//! the whole collection is gated server-side, not by a client flag.

use actix_web::{web, HttpResponse};
use rolodex_registry::RecordRegistry;
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;
use crate::models::MessageResponse;

pub async fn list_handler(
    user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
) -> HttpResponse {
    if !user.is_admin() {
        return HttpResponse::Forbidden().json(MessageResponse::new("Admin role required"));
    }

    let registry = registry.get_ref().clone();
    match web::block(move || registry.list_all()).await {
        Ok(Ok(records)) => HttpResponse::Ok().json(records),
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
