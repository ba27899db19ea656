//! Error types for roster and catalog validation

use thiserror::Error;

/// Rejection reasons for an uploaded roster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("entry at row {row} has no coupon id")]
    MissingCouponId { row: usize },

    #[error("coupon {coupon_id} has no participant name")]
    MissingName { coupon_id: String },

    #[error("coupon {coupon_id} appears more than once")]
    DuplicateCoupon { coupon_id: String },
}

/// Rejection reasons for a category catalog or a catalog edit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("category at position {position} has an empty id")]
    EmptyId { position: usize },

    #[error("category {id} must require at least one winner")]
    ZeroWinnerCount { id: String },

    #[error("category id {id} is used more than once")]
    DuplicateId { id: String },

    #[error("unknown category {id}")]
    UnknownCategory { id: String },

    #[error("category {id} is locked: {reason}")]
    CategoryLocked { id: String, reason: String },

    #[error("position {position} is outside the catalog (len {len})")]
    PositionOutOfRange { position: usize, len: usize },
}
