//! Thread-safe engine handle
//!
//! Each call takes the lock for the whole transition, so checking and
//! setting the in-flight draw is atomic even when several threads (UI,
//! remote control, timers) drive the same session.

use std::sync::Arc;

use parking_lot::Mutex;

use ld_core::{Category, CategoryUpdate, RosterEntry, WinnerRecord};

use crate::engine::{AdvanceOutcome, DrawEngine, PendingDraw};
use crate::error::DrawResult;
use crate::report::DrawReport;
use crate::snapshot::DrawSnapshot;
use crate::state::DrawPhase;

/// Cloneable, lock-guarded [`DrawEngine`]
#[derive(Clone)]
pub struct SharedDrawEngine {
    inner: Arc<Mutex<DrawEngine>>,
}

impl SharedDrawEngine {
    pub fn new(engine: DrawEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn load_roster(&self, entries: Vec<RosterEntry>) -> DrawResult<()> {
        self.inner.lock().load_roster(entries)
    }

    pub fn begin_draw(&self) -> DrawResult<PendingDraw> {
        self.inner.lock().begin_draw()
    }

    pub fn resolve_draw(&self) -> DrawResult<WinnerRecord> {
        self.inner.lock().resolve_draw()
    }

    pub fn draw(&self) -> DrawResult<WinnerRecord> {
        self.inner.lock().draw()
    }

    pub fn advance(&self) -> DrawResult<AdvanceOutcome> {
        self.inner.lock().advance()
    }

    pub fn advance_incomplete(&self) -> DrawResult<AdvanceOutcome> {
        self.inner.lock().advance_incomplete()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn add_category(&self, category: Category) -> DrawResult<usize> {
        self.inner.lock().add_category(category)
    }

    pub fn update_category(&self, id: &str, update: CategoryUpdate) -> DrawResult<()> {
        self.inner.lock().update_category(id, update)
    }

    pub fn remove_category(&self, id: &str) -> DrawResult<Category> {
        self.inner.lock().remove_category(id)
    }

    pub fn move_category(&self, id: &str, target: usize) -> DrawResult<usize> {
        self.inner.lock().move_category(id, target)
    }

    pub fn phase(&self) -> DrawPhase {
        self.inner.lock().phase()
    }

    pub fn state(&self) -> DrawSnapshot {
        self.inner.lock().state()
    }

    pub fn winners(&self) -> Vec<WinnerRecord> {
        self.inner.lock().winners().to_vec()
    }

    pub fn report(&self) -> DrawReport {
        self.inner.lock().report()
    }

    /// Run a read-only closure against the engine under the lock
    pub fn with<R>(&self, f: impl FnOnce(&DrawEngine) -> R) -> R {
        f(&*self.inner.lock())
    }
}
