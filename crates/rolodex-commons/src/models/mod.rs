//! Data models shared across crates.

mod record;
mod user;

pub use record::{Record, Segmentation};
pub use user::{Role, User};
