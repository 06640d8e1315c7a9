//! Shared types for the Rolodex contact record service.
//!
//! This crate holds the pieces every other crate needs: the record and
//! user models, typed identifiers, and the common error taxonomy. It
//! deliberately carries no heavyweight dependencies so that it can be
//! pulled in anywhere without dragging the HTTP or storage stacks along.

pub mod errors;
pub mod ids;
pub mod models;
pub mod storage_key;

pub use errors::{RegistryError, Result};
pub use ids::{RecordId, UserId};
pub use models::{Record, Role, Segmentation, User};
pub use storage_key::StorageKey;
