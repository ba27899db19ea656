//! Canonical draw stages

use serde::{Deserialize, Serialize};

/// A semantic phase of a draw session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawStage {
    /// Fresh session state (initial, roster upload or reset)
    SessionStart,
    /// A roster was accepted
    RosterLoaded { entries: usize, participants: usize },
    /// A category became the active one
    CategoryStart { index: usize, category_id: String },
    /// A selection is in flight
    DrawStart { category_id: String, pool_size: usize },
    /// A winner was recorded
    WinnerDrawn {
        category_id: String,
        coupon_id: String,
        participant_name: String,
    },
    /// The active category met its quota
    CategoryComplete { category_id: String },
    /// The operator moved past a category whose pool ran dry
    CategoryAbandoned {
        category_id: String,
        drawn: u32,
        required: u32,
    },
    /// The cursor moved past the last category
    EventComplete { total_winners: usize },
    /// All draw state was discarded
    SessionReset,
}

impl DrawStage {
    /// Stable stage name for logging and filtering
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStart => "SESSION_START",
            Self::RosterLoaded { .. } => "ROSTER_LOADED",
            Self::CategoryStart { .. } => "CATEGORY_START",
            Self::DrawStart { .. } => "DRAW_START",
            Self::WinnerDrawn { .. } => "WINNER_DRAWN",
            Self::CategoryComplete { .. } => "CATEGORY_COMPLETE",
            Self::CategoryAbandoned { .. } => "CATEGORY_ABANDONED",
            Self::EventComplete { .. } => "EVENT_COMPLETE",
            Self::SessionReset => "SESSION_RESET",
        }
    }

    /// Category the stage refers to, if any
    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::CategoryStart { category_id, .. }
            | Self::DrawStart { category_id, .. }
            | Self::WinnerDrawn { category_id, .. }
            | Self::CategoryComplete { category_id }
            | Self::CategoryAbandoned { category_id, .. } => Some(category_id),
            _ => None,
        }
    }

    /// Whether this stage ends the event
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EventComplete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(DrawStage::SessionStart.type_name(), "SESSION_START");
        assert_eq!(
            DrawStage::EventComplete { total_winners: 3 }.type_name(),
            "EVENT_COMPLETE"
        );
    }

    #[test]
    fn test_category_id() {
        let stage = DrawStage::WinnerDrawn {
            category_id: "laptop".into(),
            coupon_id: "C1".into(),
            participant_name: "Asha".into(),
        };
        assert_eq!(stage.category_id(), Some("laptop"));
        assert_eq!(DrawStage::SessionReset.category_id(), None);
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_value(DrawStage::CategoryComplete {
            category_id: "tv".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "category_complete");
        assert_eq!(json["category_id"], "tv");
    }
}
