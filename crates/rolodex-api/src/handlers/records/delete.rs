//! Soft-delete handler
//!
//! DELETE /api/records/{id} — flips the deleted flag. Deleting an
//! already-deleted record reports the same success.

use actix_web::{web, HttpResponse};
use rolodex_commons::RecordId;
use rolodex_registry::RecordRegistry;
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;
use crate::models::MessageResponse;

pub async fn delete_handler(
    _user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = RecordId::from(path.into_inner());
    let registry = registry.get_ref().clone();

    match web::block(move || registry.soft_delete(&id)).await {
        Ok(Ok(())) => HttpResponse::Ok().json(MessageResponse::new("Record deleted successfully")),
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
