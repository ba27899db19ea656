//! Mutable core of a draw session
//!
//! `DrawState` is only ever mutated by [`crate::DrawEngine`] transitions.
//! It is discarded and rebuilt on reset or roster upload.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ld_core::{Category, CategoryCatalog, RosterEntry, WinnerRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine phase, derived from the state and the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    /// Nothing drawn yet
    Idle,
    /// Current category has unmet quota
    CategoryActive,
    /// A selection is in flight
    Drawing,
    /// Current category's quota is met; waiting for `advance()`
    CategoryComplete,
    /// Cursor is past the last category (terminal)
    EventComplete,
}

impl fmt::Display for DrawPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::CategoryActive => "category-active",
            Self::Drawing => "drawing",
            Self::CategoryComplete => "category-complete",
            Self::EventComplete => "event-complete",
        };
        f.write_str(name)
    }
}

/// Selection fixed when a draw begins, committed on resolve
#[derive(Debug, Clone)]
pub(crate) struct PendingSelection {
    pub draw_id: u64,
    pub category: Category,
    pub entry: RosterEntry,
}

/// Broken state invariant, reported by [`DrawState::check_invariants`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("coupon {coupon_id} was drawn more than once")]
    RepeatedCoupon { coupon_id: String },

    #[error("drawn coupon set ({drawn}) does not match winners ({winners})")]
    CouponSetMismatch { drawn: usize, winners: usize },

    #[error("{participant_name} won category {category_id} more than once")]
    RepeatedCategoryWinner {
        category_id: String,
        participant_name: String,
    },

    #[error("category {category_id} has {winners} winners but allows {allowed}")]
    QuotaExceeded {
        category_id: String,
        winners: usize,
        allowed: u32,
    },

    #[error("winner name index for {category_id} has {names} names for {winners} winners")]
    NameIndexMismatch {
        category_id: String,
        names: usize,
        winners: usize,
    },

    #[error("cursor {index} is beyond the catalog (len {len})")]
    CursorOutOfRange { index: usize, len: usize },
}

/// The engine's mutable core
#[derive(Debug, Clone, Default)]
pub struct DrawState {
    active_category_index: usize,
    winners: Vec<WinnerRecord>,
    drawn_coupons: HashSet<String>,
    category_winner_names: HashMap<String, HashSet<String>>,
    pending: Option<PendingSelection>,
    next_draw_id: u64,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_category_index(&self) -> usize {
        self.active_category_index
    }

    /// Winners in draw order
    pub fn winners(&self) -> &[WinnerRecord] {
        &self.winners
    }

    pub fn drawn_coupons(&self) -> &HashSet<String> {
        &self.drawn_coupons
    }

    pub fn category_winner_names(&self) -> &HashMap<String, HashSet<String>> {
        &self.category_winner_names
    }

    /// Number of winners recorded for a category
    pub fn winners_in(&self, category_id: &str) -> usize {
        self.category_winner_names
            .get(category_id)
            .map_or(0, HashSet::len)
    }

    pub fn is_drawing(&self) -> bool {
        self.pending.is_some()
    }

    /// Derive the phase against a catalog
    pub fn phase(&self, catalog: &CategoryCatalog) -> DrawPhase {
        if self.pending.is_some() {
            return DrawPhase::Drawing;
        }
        let Some(category) = catalog.get(self.active_category_index) else {
            return DrawPhase::EventComplete;
        };
        if self.winners_in(&category.id) >= category.winner_count as usize {
            DrawPhase::CategoryComplete
        } else if self.active_category_index == 0 && self.winners.is_empty() {
            DrawPhase::Idle
        } else {
            DrawPhase::CategoryActive
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSITIONS (engine only)
    // ═══════════════════════════════════════════════════════════════════════════

    pub(crate) fn begin(&mut self, category: Category, entry: RosterEntry) -> u64 {
        let draw_id = self.next_draw_id;
        self.next_draw_id += 1;
        self.pending = Some(PendingSelection {
            draw_id,
            category,
            entry,
        });
        draw_id
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingSelection> {
        self.pending.take()
    }

    pub(crate) fn record(&mut self, winner: WinnerRecord) {
        self.drawn_coupons.insert(winner.coupon_id.clone());
        self.category_winner_names
            .entry(winner.category_id.clone())
            .or_default()
            .insert(winner.participant_name.clone());
        self.winners.push(winner);
    }

    pub(crate) fn advance_cursor(&mut self) -> usize {
        self.active_category_index += 1;
        self.active_category_index
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INVARIANTS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Verify the bookkeeping invariants against a catalog
    pub fn check_invariants(&self, catalog: &CategoryCatalog) -> Result<(), InvariantViolation> {
        if self.active_category_index > catalog.len() {
            return Err(InvariantViolation::CursorOutOfRange {
                index: self.active_category_index,
                len: catalog.len(),
            });
        }

        let mut seen_coupons = HashSet::with_capacity(self.winners.len());
        let mut per_category: HashMap<&str, HashSet<&str>> = HashMap::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for winner in &self.winners {
            if !seen_coupons.insert(winner.coupon_id.as_str()) {
                return Err(InvariantViolation::RepeatedCoupon {
                    coupon_id: winner.coupon_id.clone(),
                });
            }
            if !per_category
                .entry(winner.category_id.as_str())
                .or_default()
                .insert(winner.participant_name.as_str())
            {
                return Err(InvariantViolation::RepeatedCategoryWinner {
                    category_id: winner.category_id.clone(),
                    participant_name: winner.participant_name.clone(),
                });
            }
            *counts.entry(winner.category_id.as_str()).or_default() += 1;
        }

        if seen_coupons.len() != self.drawn_coupons.len()
            || !seen_coupons.iter().all(|c| self.drawn_coupons.contains(*c))
        {
            return Err(InvariantViolation::CouponSetMismatch {
                drawn: self.drawn_coupons.len(),
                winners: self.winners.len(),
            });
        }

        for (category_id, names) in &self.category_winner_names {
            let winners = counts.get(category_id.as_str()).copied().unwrap_or(0);
            if names.len() != winners {
                return Err(InvariantViolation::NameIndexMismatch {
                    category_id: category_id.clone(),
                    names: names.len(),
                    winners,
                });
            }
        }

        for category in catalog.iter() {
            let winners = counts.get(category.id.as_str()).copied().unwrap_or(0);
            if winners > category.winner_count as usize {
                return Err(InvariantViolation::QuotaExceeded {
                    category_id: category.id.clone(),
                    winners,
                    allowed: category.winner_count,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn catalog() -> CategoryCatalog {
        CategoryCatalog::new(vec![
            Category::new("a", "A", 2),
            Category::new("b", "B", 1),
        ])
        .unwrap()
    }

    fn winner(coupon: &str, name: &str, category: &Category) -> WinnerRecord {
        WinnerRecord::new(&RosterEntry::new(coupon, name), category, Utc::now())
    }

    #[test]
    fn test_phase_progression() {
        let catalog = catalog();
        let a = catalog.get(0).unwrap().clone();
        let mut state = DrawState::new();
        assert_eq!(state.phase(&catalog), DrawPhase::Idle);

        state.begin(a.clone(), RosterEntry::new("C1", "Ann"));
        assert_eq!(state.phase(&catalog), DrawPhase::Drawing);
        state.take_pending();

        state.record(winner("C1", "Ann", &a));
        assert_eq!(state.phase(&catalog), DrawPhase::CategoryActive);

        state.record(winner("C2", "Ben", &a));
        assert_eq!(state.phase(&catalog), DrawPhase::CategoryComplete);

        state.advance_cursor();
        assert_eq!(state.phase(&catalog), DrawPhase::CategoryActive);
        state.advance_cursor();
        assert_eq!(state.phase(&catalog), DrawPhase::EventComplete);
    }

    #[test]
    fn test_empty_catalog_is_complete() {
        let state = DrawState::new();
        assert_eq!(state.phase(&CategoryCatalog::empty()), DrawPhase::EventComplete);
    }

    #[test]
    fn test_draw_ids_increase() {
        let catalog = catalog();
        let a = catalog.get(0).unwrap().clone();
        let mut state = DrawState::new();
        let first = state.begin(a.clone(), RosterEntry::new("C1", "Ann"));
        state.take_pending();
        let second = state.begin(a, RosterEntry::new("C2", "Ben"));
        assert!(second > first);
    }

    #[test]
    fn test_invariants_hold_after_records() {
        let catalog = catalog();
        let a = catalog.get(0).unwrap().clone();
        let mut state = DrawState::new();
        state.record(winner("C1", "Ann", &a));
        state.record(winner("C2", "Ben", &a));
        assert_eq!(state.check_invariants(&catalog), Ok(()));
        assert_eq!(state.winners_in("a"), 2);
        assert_eq!(state.winners_in("b"), 0);
    }

    #[test]
    fn test_invariants_detect_repeated_coupon() {
        let catalog = catalog();
        let a = catalog.get(0).unwrap().clone();
        let b = catalog.get(1).unwrap().clone();
        let mut state = DrawState::new();
        state.record(winner("C1", "Ann", &a));
        state.record(winner("C1", "Ann", &b));
        assert_eq!(
            state.check_invariants(&catalog),
            Err(InvariantViolation::RepeatedCoupon {
                coupon_id: "C1".into()
            })
        );
    }

    #[test]
    fn test_invariants_detect_quota_overrun() {
        let catalog = catalog();
        let b = catalog.get(1).unwrap().clone();
        let mut state = DrawState::new();
        state.record(winner("C1", "Ann", &b));
        state.record(winner("C2", "Ben", &b));
        assert!(matches!(
            state.check_invariants(&catalog),
            Err(InvariantViolation::QuotaExceeded { winners: 2, allowed: 1, .. })
        ));
    }
}
