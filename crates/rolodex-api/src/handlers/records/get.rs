//! Direct lookup handler
//!
//! GET /api/records/{id} — returns the record whether or not it has
//! been soft-deleted; deleted records carry `isDeleted: true`.

use actix_web::{web, HttpResponse};
use rolodex_commons::RecordId;
use rolodex_registry::RecordRegistry;
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;

pub async fn get_handler(
    _user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = RecordId::from(path.into_inner());
    let registry = registry.get_ref().clone();

    match web::block(move || registry.get(&id)).await {
        Ok(Ok(record)) => HttpResponse::Ok().json(record),
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
