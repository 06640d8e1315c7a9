//! Search filters.
//!
//! Two matching semantics, per field kind: the identity field
//! (`customerName`) matches by case-insensitive substring; every other
//! field matches by exact equality. Criteria are ANDed.

use rolodex_commons::Record;
use serde::Deserialize;
use std::collections::HashMap;

/// Filter criteria for a record search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub customer_name: Option<String>,
    pub designation: Option<String>,
    pub city: Option<String>,
    pub segmentation: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl SearchFilter {
    /// Builds a filter from query parameters; unknown keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let take = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            customer_name: take("customerName"),
            designation: take("designation"),
            city: take("city"),
            segmentation: take("segmentation"),
            email: take("email"),
            phone: take("phone"),
        }
    }

    /// True when no criterion is set. An empty filter matches nothing.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.designation.is_none()
            && self.city.is_none()
            && self.segmentation.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }

    /// Whether a record satisfies every set criterion.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(name) = &self.customer_name {
            if !record
                .customer_name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(designation) = &self.designation {
            if &record.designation != designation {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if &record.city != city {
                return false;
            }
        }
        if let Some(segmentation) = &self.segmentation {
            if record.segmentation.as_str() != segmentation {
                return false;
            }
        }
        if let Some(email) = &self.email {
            if &record.email != email {
                return false;
            }
        }
        if let Some(phone) = &self.phone {
            if &record.phone != phone {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rolodex_commons::{RecordId, Segmentation};

    fn record(name: &str, city: &str) -> Record {
        Record {
            id: RecordId::generate(),
            unique_id: 1234,
            customer_name: name.into(),
            designation: "Manager".into(),
            city: city.into(),
            segmentation: Segmentation::LE,
            email: "a@x.com".into(),
            phone: "5551234567".into(),
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_name_substring_case_insensitive() {
        let filter = SearchFilter {
            customer_name: Some("ac".into()),
            ..Default::default()
        };
        assert!(filter.matches(&record("Acme", "Boston")));
        assert!(filter.matches(&record("MacDonald", "Boston")));
        assert!(!filter.matches(&record("Globex", "Boston")));
    }

    #[test]
    fn test_city_exact_match() {
        let filter = SearchFilter { city: Some("Boston".into()), ..Default::default() };
        assert!(filter.matches(&record("Acme", "Boston")));
        assert!(!filter.matches(&record("Acme", "boston")));
        assert!(!filter.matches(&record("Acme", "Bos")));
    }

    #[test]
    fn test_criteria_are_anded() {
        let filter = SearchFilter {
            customer_name: Some("ac".into()),
            city: Some("Boston".into()),
            ..Default::default()
        };
        assert!(filter.matches(&record("Acme", "Boston")));
        assert!(!filter.matches(&record("Acme", "Denver")));
    }

    #[test]
    fn test_from_query_ignores_unknown_and_empty() {
        let mut params = HashMap::new();
        params.insert("city".to_string(), "Boston".to_string());
        params.insert("customerName".to_string(), String::new());
        params.insert("sort".to_string(), "asc".to_string());

        let filter = SearchFilter::from_query(&params);
        assert_eq!(filter.city.as_deref(), Some("Boston"));
        assert!(filter.customer_name.is_none());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_empty_filter() {
        assert!(SearchFilter::default().is_empty());
        assert!(SearchFilter::from_query(&HashMap::new()).is_empty());
    }
}
