//! Read-only engine snapshot for presentation layers

use ld_core::{Category, WinnerRecord};
use serde::Serialize;

use crate::state::DrawPhase;

/// Progress within the active category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    /// Ordinal of the prize being drawn next (stays at `total` once complete)
    pub current: u32,
    pub total: u32,
    pub remaining: u32,
}

impl CategoryProgress {
    pub fn new(drawn: u32, total: u32) -> Self {
        Self {
            current: (drawn + 1).min(total),
            total,
            remaining: total.saturating_sub(drawn),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Progress across the whole event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventProgress {
    pub drawn: usize,
    pub total: u32,
    pub percentage: f64,
}

impl EventProgress {
    pub fn new(drawn: usize, total: u32) -> Self {
        let percentage = if total > 0 {
            drawn as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            drawn,
            total,
            percentage,
        }
    }
}

/// Everything a presentation layer needs to render the draw screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawSnapshot {
    pub phase: DrawPhase,
    pub active_category_index: usize,
    pub active_category: Option<Category>,
    pub category_progress: Option<CategoryProgress>,
    pub eligible_count: usize,
    pub winners: Vec<WinnerRecord>,
    pub is_event_complete: bool,
    pub event_progress: EventProgress,
}

impl DrawSnapshot {
    /// Winners of the active category, most recent first
    pub fn active_category_winners(&self) -> Vec<&WinnerRecord> {
        let Some(category) = &self.active_category else {
            return Vec::new();
        };
        self.winners
            .iter()
            .rev()
            .filter(|w| w.category_id == category.id)
            .collect()
    }

    /// Whether a draw request would be accepted right now
    pub fn can_draw(&self) -> bool {
        matches!(self.phase, DrawPhase::Idle | DrawPhase::CategoryActive) && self.eligible_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_progress() {
        assert_eq!(
            CategoryProgress::new(0, 3),
            CategoryProgress {
                current: 1,
                total: 3,
                remaining: 3
            }
        );
        let done = CategoryProgress::new(3, 3);
        assert_eq!(done.current, 3);
        assert!(done.is_complete());
    }

    #[test]
    fn test_event_progress() {
        assert_eq!(EventProgress::new(0, 0).percentage, 0.0);
        assert_eq!(EventProgress::new(5, 20).percentage, 25.0);
    }
}
