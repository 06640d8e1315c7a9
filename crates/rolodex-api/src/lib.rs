//! HTTP surface of the Rolodex service.
//!
//! Handlers are grouped per endpoint family (`records`, `auth`), with
//! route configuration in [`routes`] and the bearer-token middleware in
//! [`middleware`].

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use routes::configure_routes;
