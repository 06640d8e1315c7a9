//! Candidate record payloads and field validation.

use rolodex_commons::{RegistryError, Result, Segmentation};
use serde::{Deserialize, Serialize};

/// A candidate record as submitted by a client.
///
/// Carries no `uniqueId` and no `isDeleted`: both are owned by the
/// registry. Create and update payloads that include them anyway are
/// deserialized into this shape, which silently drops the fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub customer_name: String,
    pub designation: String,
    pub city: String,
    pub segmentation: String,
    pub email: String,
    pub phone: String,
}

impl RecordDraft {
    /// Validates all fields, returning the parsed segmentation code.
    pub fn validate(&self) -> Result<Segmentation> {
        if self.customer_name.trim().is_empty() {
            return Err(RegistryError::validation("Customer name is required."));
        }
        if self.designation.trim().is_empty() {
            return Err(RegistryError::validation("Designation is required."));
        }
        if self.city.trim().is_empty() {
            return Err(RegistryError::validation("City is required."));
        }

        let segmentation = self
            .segmentation
            .parse::<Segmentation>()
            .map_err(|_| RegistryError::validation("Segmentation must be one of LE, MM, SB, ACQ."))?;

        if !is_plausible_email(&self.email) {
            return Err(RegistryError::validation("Invalid email."));
        }

        if !is_ten_digit_phone(&self.phone) {
            return Err(RegistryError::validation(
                "Invalid phone number. Please enter a 10-digit phone number containing only numbers.",
            ));
        }

        Ok(segmentation)
    }
}

/// Minimal sanity check: one '@', non-empty local part, dotted domain.
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

fn is_ten_digit_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}
