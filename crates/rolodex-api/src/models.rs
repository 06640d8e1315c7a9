//! Shared response models.

use serde::{Deserialize, Serialize};

/// Generic `{"message": ...}` body used by confirmations and errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
