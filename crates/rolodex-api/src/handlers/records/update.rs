//! Update handler
//!
//! PUT /api/records/{id} — re-validates uniqueness excluding the
//! record itself. `uniqueId`/`isDeleted` in the payload are ignored.

use actix_web::{web, HttpResponse};
use rolodex_commons::RecordId;
use rolodex_registry::{RecordDraft, RecordRegistry};
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;

pub async fn update_handler(
    _user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
    path: web::Path<String>,
    body: web::Json<RecordDraft>,
) -> HttpResponse {
    let id = RecordId::from(path.into_inner());
    let draft = body.into_inner();
    let registry = registry.get_ref().clone();

    match web::block(move || registry.update(&id, &draft)).await {
        Ok(Ok(record)) => HttpResponse::Ok().json(record),
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
