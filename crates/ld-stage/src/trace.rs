//! DrawTrace — Ordered stage events of one draw session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::DrawEvent;
use crate::stage::DrawStage;

/// Complete event log of a session. Replaced, not cleared, on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawTrace {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub events: Vec<DrawEvent>,
}

impl DrawTrace {
    /// Start a new session trace, opened with `SessionStart`
    pub fn new() -> Self {
        let mut trace = Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            events: Vec::new(),
        };
        trace.push(DrawStage::SessionStart);
        trace
    }

    /// Append a stage, stamping sequence and time
    pub fn push(&mut self, stage: DrawStage) -> &DrawEvent {
        let sequence = self.events.len() as u64;
        self.events.push(DrawEvent::new(sequence, stage));
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&DrawEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with the given stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&DrawEvent> {
        self.events
            .iter()
            .filter(|e| e.type_name() == type_name)
            .collect()
    }

    /// Events belonging to one category
    pub fn events_for_category(&self, category_id: &str) -> Vec<&DrawEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category_id() == Some(category_id))
            .collect()
    }
}

impl Default for DrawTrace {
    fn default() -> Self {
        Self::new()
    }
}
