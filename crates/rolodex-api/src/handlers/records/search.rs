//! Search handler
//!
//! GET /api/records/search?field=value… — filtered search over
//! non-deleted records. Unknown query keys are ignored; a criteria-less
//! query returns an empty array.

use actix_web::{web, HttpResponse};
use rolodex_registry::{RecordRegistry, SearchFilter};
use std::collections::HashMap;
use std::sync::Arc;

use super::{blocking_failure, map_registry_error};
use crate::middleware::AuthenticatedUser;

pub async fn search_handler(
    _user: AuthenticatedUser,
    registry: web::Data<Arc<RecordRegistry>>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let filter = SearchFilter::from_query(&query);
    let registry = registry.get_ref().clone();

    match web::block(move || registry.search(&filter)).await {
        Ok(Ok(records)) => HttpResponse::Ok().json(records),
        Ok(Err(err)) => map_registry_error(err),
        Err(err) => blocking_failure(err),
    }
}
