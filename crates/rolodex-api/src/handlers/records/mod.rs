//! Record endpoints.
//!
//! - POST   /api/records          — create
//! - GET    /api/records          — list all non-deleted (admin)
//! - GET    /api/records/search   — filtered search
//! - GET    /api/records/{id}     — direct lookup (includes deleted)
//! - PUT    /api/records/{id}     — update
//! - DELETE /api/records/{id}     — soft delete one
//! - DELETE /api/records          — soft delete all (admin)

mod create;
mod delete;
mod delete_all;
mod get;
mod list;
mod search;
mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use delete_all::delete_all_handler;
pub use get::get_handler;
pub use list::list_handler;
pub use search::search_handler;
pub use update::update_handler;

use actix_web::HttpResponse;
use rolodex_commons::RegistryError;

use crate::models::MessageResponse;

/// Map registry errors to HTTP responses.
///
/// Duplicates and validation failures are client errors; the message
/// text is part of the wire contract and comes straight from the error.
pub(crate) fn map_registry_error(err: RegistryError) -> HttpResponse {
    match err {
        RegistryError::DuplicateName
        | RegistryError::DuplicateEmail
        | RegistryError::Validation(_) => {
            HttpResponse::BadRequest().json(MessageResponse::new(err.to_string()))
        }
        RegistryError::NotFound(_) => {
            HttpResponse::NotFound().json(MessageResponse::new(err.to_string()))
        }
        RegistryError::Storage(_) => {
            log::error!("storage failure: {}", err);
            HttpResponse::InternalServerError().json(MessageResponse::new(err.to_string()))
        }
    }
}

/// Fallback for a failed blocking task (cancelled or panicked).
pub(crate) fn blocking_failure(err: actix_web::error::BlockingError) -> HttpResponse {
    log::error!("blocking task failed: {}", err);
    HttpResponse::InternalServerError().json(MessageResponse::new("Internal server error"))
}
