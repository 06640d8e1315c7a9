//! The contact record model.
//!
//! Wire field names are camelCase to preserve the JSON contract of the
//! HTTP API; the canonical schema decisions are documented in DESIGN.md.

use crate::ids::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business-classification code attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segmentation {
    /// Large Enterprise
    LE,
    /// Mid Market
    MM,
    /// Small Business
    SB,
    /// Acquisition
    ACQ,
}

impl Segmentation {
    pub const ALL: [Segmentation; 4] =
        [Segmentation::LE, Segmentation::MM, Segmentation::SB, Segmentation::ACQ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segmentation::LE => "LE",
            Segmentation::MM => "MM",
            Segmentation::SB => "SB",
            Segmentation::ACQ => "ACQ",
        }
    }
}

impl FromStr for Segmentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LE" => Ok(Segmentation::LE),
            "MM" => Ok(Segmentation::MM),
            "SB" => Ok(Segmentation::SB),
            "ACQ" => Ok(Segmentation::ACQ),
            other => Err(format!("unknown segmentation code '{}'", other)),
        }
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A contact record.
///
/// `unique_id` is assigned once at creation (starting at 1234) and is
/// never reassigned or reused, even after soft deletion. `is_deleted`
/// hides the record from list/search results without removing it from
/// storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub unique_id: u64,
    pub customer_name: String,
    pub designation: String,
    pub city: String,
    pub segmentation: Segmentation,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Lowercased identity key used for uniqueness checks.
    pub fn name_key(&self) -> String {
        self.customer_name.trim().to_lowercase()
    }

    /// Lowercased email key used for uniqueness checks.
    pub fn email_key(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmentation_parse() {
        assert_eq!("le".parse::<Segmentation>().unwrap(), Segmentation::LE);
        assert_eq!(" ACQ ".parse::<Segmentation>().unwrap(), Segmentation::ACQ);
        assert!("XX".parse::<Segmentation>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = Record {
            id: RecordId::from("r1"),
            unique_id: 1234,
            customer_name: "Acme".into(),
            designation: "Manager".into(),
            city: "Boston".into(),
            segmentation: Segmentation::LE,
            email: "a@x.com".into(),
            phone: "5551234567".into(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["uniqueId"], 1234);
        assert_eq!(json["customerName"], "Acme");
        assert_eq!(json["isDeleted"], false);
        assert_eq!(json["segmentation"], "LE");
    }

    #[test]
    fn test_identity_keys_are_case_insensitive() {
        let mut record = Record {
            id: RecordId::from("r1"),
            unique_id: 1234,
            customer_name: "  AcMe ".into(),
            designation: String::new(),
            city: String::new(),
            segmentation: Segmentation::MM,
            email: "A@X.Com".into(),
            phone: "5551234567".into(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(record.name_key(), "acme");
        assert_eq!(record.email_key(), "a@x.com");
        record.customer_name = "acme".into();
        assert_eq!(record.name_key(), "acme");
    }
}
