//! DrawEvent — A stage occurrence with sequence number and wall-clock time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stage::DrawStage;

/// A stage event with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawEvent {
    /// Position within the session trace (0-based)
    pub sequence: u64,
    pub stage: DrawStage,
    pub at: DateTime<Utc>,
}

impl DrawEvent {
    pub fn new(sequence: u64, stage: DrawStage) -> Self {
        Self {
            sequence,
            stage,
            at: Utc::now(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
