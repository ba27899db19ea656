//! Winner records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::roster::RosterEntry;

/// One successful draw outcome. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub coupon_id: String,
    pub participant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub category_id: String,
    /// Category name at the moment of the draw
    pub category_name: String,
    pub drawn_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

impl WinnerRecord {
    pub fn new(entry: &RosterEntry, category: &Category, drawn_at: DateTime<Utc>) -> Self {
        Self {
            coupon_id: entry.coupon_id.clone(),
            participant_name: entry.name.clone(),
            customer_id: entry.customer_id.clone(),
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            drawn_at,
            district: entry.district.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_copies_entry_and_category() {
        let entry = RosterEntry::new("C42", "Meera")
            .with_customer_id("CU-9")
            .with_district("Kannur");
        let category = Category::new("laptop", "LAPTOP", 2);
        let now = Utc::now();

        let record = WinnerRecord::new(&entry, &category, now);
        assert_eq!(record.coupon_id, "C42");
        assert_eq!(record.participant_name, "Meera");
        assert_eq!(record.customer_id.as_deref(), Some("CU-9"));
        assert_eq!(record.category_id, "laptop");
        assert_eq!(record.category_name, "LAPTOP");
        assert_eq!(record.district.as_deref(), Some("Kannur"));
        assert_eq!(record.drawn_at, now);
    }
}
