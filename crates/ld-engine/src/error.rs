//! Draw engine error taxonomy
//!
//! Every rejected call leaves engine state untouched and reports one of
//! these variants; none of them is fatal.

use std::fmt;

use ld_core::{CatalogError, RosterError};
use thiserror::Error;

use crate::state::DrawPhase;

/// Operation that was attempted when a transition was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawAction {
    LoadRoster,
    Draw,
    Resolve,
    Advance,
    AdvanceIncomplete,
    EditCatalog,
}

impl fmt::Display for DrawAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoadRoster => "load roster",
            Self::Draw => "draw",
            Self::Resolve => "resolve draw",
            Self::Advance => "advance",
            Self::AdvanceIncomplete => "abandon category",
            Self::EditCatalog => "edit catalog",
        };
        f.write_str(name)
    }
}

/// Draw engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("invalid roster: {0}")]
    InvalidRoster(#[from] RosterError),

    #[error("configuration error: {0}")]
    Configuration(#[from] CatalogError),

    #[error("no active category: the event is complete")]
    NoActiveCategory,

    #[error("no eligible candidates remain for category {category_id}")]
    NoEligibleCandidates { category_id: String },

    #[error("cannot {action} in phase {phase}")]
    InvalidTransition { action: DrawAction, phase: DrawPhase },
}

/// Result type alias
pub type DrawResult<T> = Result<T, DrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DrawError::InvalidTransition {
            action: DrawAction::Advance,
            phase: DrawPhase::CategoryActive,
        };
        assert_eq!(err.to_string(), "cannot advance in phase category-active");

        let err: DrawError = RosterError::DuplicateCoupon {
            coupon_id: "C1".into(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid roster: coupon C1 appears more than once");
    }
}
