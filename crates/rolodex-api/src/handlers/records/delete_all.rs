//! Bulk soft-delete handler
//!
//! DELETE /api/records — marks every record deleted. Admin only; the
//! role comes from the validated token, never from the client payload.

use actix_web::{web, HttpResponse};
use log::info;
use rolodex_registry::RecordRegistry;
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;
use crate::models::MessageResponse;

pub async fn delete_all_handler(
    user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
) -> HttpResponse {
    if !user.is_admin() {
        return HttpResponse::Forbidden().json(MessageResponse::new("Admin role required"));
    }

    let registry = registry.get_ref().clone();
    match web::block(move || registry.soft_delete_all()).await {
        Ok(Ok(count)) => {
            info!("user {} soft-deleted all records ({})", user.username, count);
            HttpResponse::Ok().json(MessageResponse::new("All records deleted successfully"))
        }
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
