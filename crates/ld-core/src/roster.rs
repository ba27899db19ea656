//! Participant roster
//!
//! The roster is fixed for a draw session. Entries are keyed by coupon id;
//! one participant may hold several coupons, so names are not unique.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// One coupon held by a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Unique coupon identifier
    pub coupon_id: String,
    /// Participant name (shared by all coupons of the same participant)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Total coupons the participant holds across the roster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_coupon_count: Option<u32>,
    /// Row in the uploaded sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,
}

impl RosterEntry {
    pub fn new(coupon_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            coupon_id: coupon_id.into(),
            name: name.into(),
            customer_id: None,
            district: None,
            total_coupon_count: None,
            row_number: None,
        }
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_total_coupons(mut self, count: u32) -> Self {
        self.total_coupon_count = Some(count);
        self
    }

    pub fn with_row_number(mut self, row: u32) -> Self {
        self.row_number = Some(row);
        self
    }
}

/// Validated, immutable list of roster entries
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_coupon: HashMap<String, usize>,
}

impl Roster {
    /// Validate and index a list of entries, preserving upload order
    pub fn new(entries: Vec<RosterEntry>) -> Result<Self, RosterError> {
        let mut by_coupon = HashMap::with_capacity(entries.len());

        for (row, entry) in entries.iter().enumerate() {
            if entry.coupon_id.trim().is_empty() {
                return Err(RosterError::MissingCouponId { row: row + 1 });
            }
            if entry.name.trim().is_empty() {
                return Err(RosterError::MissingName {
                    coupon_id: entry.coupon_id.clone(),
                });
            }
            if by_coupon.insert(entry.coupon_id.clone(), row).is_some() {
                return Err(RosterError::DuplicateCoupon {
                    coupon_id: entry.coupon_id.clone(),
                });
            }
        }

        Ok(Self { entries, by_coupon })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Look up an entry by coupon id
    pub fn get(&self, coupon_id: &str) -> Option<&RosterEntry> {
        self.by_coupon.get(coupon_id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct participant names
    pub fn participant_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}
