//! Draw report — per-category summary plus a detailed winner listing
//!
//! Built from the append-only winner list joined with the roster, so it can
//! be produced mid-event as well as after completion.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ld_core::{CategoryCatalog, Roster};

use crate::state::DrawState;

/// Where a category stands in the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    /// Quota met
    Complete,
    /// The active category, quota not yet met
    InProgress,
    /// Cursor moved past it with quota unmet
    Incomplete,
    /// Not reached yet
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category_id: String,
    pub name: String,
    pub winners: u32,
    pub required: u32,
    pub status: CategoryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedWinner {
    /// 1-based position in draw order
    pub serial: usize,
    pub category_id: String,
    pub category_name: String,
    pub coupon_id: String,
    pub participant_name: String,
    pub customer_id: Option<String>,
    pub district: Option<String>,
    pub total_coupon_count: Option<u32>,
    pub row_number: Option<u32>,
    pub drawn_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawReport {
    pub generated_at: DateTime<Utc>,
    pub total_winners: usize,
    pub total_slots: u32,
    pub is_event_complete: bool,
    pub categories: Vec<CategorySummary>,
    pub winners: Vec<DetailedWinner>,
}

impl DrawReport {
    pub fn new(catalog: &CategoryCatalog, roster: &Roster, state: &DrawState) -> Self {
        let active = state.active_category_index();

        let categories = catalog
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let winners = state.winners_in(&category.id) as u32;
                let status = if winners >= category.winner_count {
                    CategoryStatus::Complete
                } else if index < active {
                    CategoryStatus::Incomplete
                } else if index == active {
                    CategoryStatus::InProgress
                } else {
                    CategoryStatus::Pending
                };
                CategorySummary {
                    category_id: category.id.clone(),
                    name: category.name.clone(),
                    winners,
                    required: category.winner_count,
                    status,
                }
            })
            .collect();

        let winners = state
            .winners()
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let entry = roster.get(&w.coupon_id);
                DetailedWinner {
                    serial: i + 1,
                    category_id: w.category_id.clone(),
                    category_name: w.category_name.clone(),
                    coupon_id: w.coupon_id.clone(),
                    participant_name: w.participant_name.clone(),
                    customer_id: w.customer_id.clone(),
                    district: w.district.clone(),
                    total_coupon_count: entry.and_then(|e| e.total_coupon_count),
                    row_number: entry.and_then(|e| e.row_number),
                    drawn_at: w.drawn_at,
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            total_winners: state.winners().len(),
            total_slots: catalog.total_winner_slots(),
            is_event_complete: active >= catalog.len(),
            categories,
            winners,
        }
    }

    pub fn category(&self, category_id: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category_id == category_id)
    }

    /// Categories whose quota was not met
    pub fn shortfalls(&self) -> Vec<&CategorySummary> {
        self.categories
            .iter()
            .filter(|c| c.status == CategoryStatus::Incomplete)
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DrawEngine, ScriptedSource};
    use ld_core::{Category, CategoryCatalog, RosterEntry};

    use super::*;

    fn engine() -> DrawEngine {
        let catalog = CategoryCatalog::new(vec![
            Category::new("buds", "Earbuds", 2),
            Category::new("tv", "Television", 3),
            Category::new("car", "Car", 1),
        ])
        .unwrap();
        let mut engine = DrawEngine::with_source(catalog, ScriptedSource::first());
        engine
            .load_roster(vec![
                RosterEntry::new("C1", "Anu")
                    .with_total_coupons(4)
                    .with_row_number(2),
                RosterEntry::new("C2", "Biju").with_district("Kollam"),
                RosterEntry::new("C3", "Chitra"),
            ])
            .unwrap();
        engine
    }

    #[test]
    fn test_mid_event_report() {
        let mut engine = engine();
        engine.draw().unwrap();

        let report = engine.report();
        assert_eq!(report.total_winners, 1);
        assert_eq!(report.total_slots, 6);
        assert!(!report.is_event_complete);
        assert_eq!(report.category("buds").unwrap().status, CategoryStatus::InProgress);
        assert_eq!(report.category("tv").unwrap().status, CategoryStatus::Pending);

        let first = &report.winners[0];
        assert_eq!(first.serial, 1);
        assert_eq!(first.coupon_id, "C1");
        assert_eq!(first.total_coupon_count, Some(4));
        assert_eq!(first.row_number, Some(2));
    }

    #[test]
    fn test_statuses_after_shortfall() {
        let mut engine = engine();
        engine.draw().unwrap();
        engine.draw().unwrap();
        engine.advance().unwrap();
        engine.draw().unwrap();
        // Roster exhausted: tv stays short
        engine.advance_incomplete().unwrap();

        let report = engine.report();
        assert_eq!(report.category("buds").unwrap().status, CategoryStatus::Complete);
        let tv = report.category("tv").unwrap();
        assert_eq!(tv.status, CategoryStatus::Incomplete);
        assert_eq!((tv.winners, tv.required), (1, 3));
        assert_eq!(report.shortfalls().len(), 1);
        assert_eq!(report.category("car").unwrap().status, CategoryStatus::InProgress);
    }

    #[test]
    fn test_json_output() {
        let mut engine = engine();
        engine.draw().unwrap();
        let json = engine.report().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["categories"][0]["status"], "in_progress");
        assert_eq!(value["winners"][0]["participant_name"], "Anu");
    }
}
