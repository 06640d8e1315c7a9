//! Create handler
//!
//! POST /api/records — validates the candidate, enforces uniqueness,
//! assigns the next uniqueId, and returns the persisted record.

use actix_web::{web, HttpResponse};
use rolodex_registry::{RecordDraft, RecordRegistry};
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;

pub async fn create_handler(
    _user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
    body: web::Json<RecordDraft>,
) -> HttpResponse {
    let registry = registry.get_ref().clone();
    let draft = body.into_inner();

    match web::block(move || registry.create(&draft)).await {
        Ok(Ok(record)) => HttpResponse::Created().json(record),
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
