//! Request handlers, grouped per endpoint family.

pub mod auth;
pub mod health;
pub mod records;

pub use health::healthcheck_handler;
