//! Draw Engine — Sequential category draw state machine
//!
//! ```text
//!  Idle ──draw──▶ Drawing ──resolve──▶ CategoryActive ──draw──▶ …
//!                                  └──▶ CategoryComplete ──advance──▶ CategoryActive
//!                                                                └──▶ EventComplete
//! ```
//!
//! Categories are resolved strictly in catalog order. `advance()` is only
//! accepted once the active category's quota is met; a category whose pool
//! runs dry stays put until the operator calls `advance_incomplete()`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use ld_core::{
    CatalogError, Category, CategoryCatalog, CategoryUpdate, Roster, RosterEntry, WinnerRecord,
};
use ld_stage::{DrawStage, DrawTrace};

use crate::eligibility::{eligible, eligible_count};
use crate::error::{DrawAction, DrawError, DrawResult};
use crate::report::DrawReport;
use crate::selector::{RandomSource, RngSource};
use crate::snapshot::{CategoryProgress, DrawSnapshot, EventProgress};
use crate::state::{DrawPhase, DrawState, InvariantViolation};

/// Handle returned when a draw enters the `Drawing` phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDraw {
    pub draw_id: u64,
    pub category_id: String,
    pub category_name: String,
    /// Eligible entries at the moment the selection was made
    pub pool_size: usize,
}

/// Where the cursor landed after an advance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceOutcome {
    NextCategory { index: usize, category_id: String },
    EventComplete { total_winners: usize },
}

/// Sequential prize draw engine
///
/// Owns the roster, the catalog and the draw state. All mutation goes
/// through the transition methods below.
pub struct DrawEngine {
    roster: Roster,
    catalog: CategoryCatalog,
    state: DrawState,
    source: Box<dyn RandomSource>,
    trace: DrawTrace,
}

impl DrawEngine {
    /// Create an engine with an OS-seeded uniform source and an empty roster
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self::with_source(catalog, RngSource::from_os_rng())
    }

    /// Create an engine with a specific random source
    pub fn with_source(catalog: CategoryCatalog, source: impl RandomSource + 'static) -> Self {
        log::info!(
            "Draw engine ready: {} categories, {} winner slots",
            catalog.len(),
            catalog.total_winner_slots()
        );
        Self {
            roster: Roster::empty(),
            catalog,
            state: DrawState::new(),
            source: Box::new(source),
            trace: DrawTrace::new(),
        }
    }

    /// Swap the random source (e.g. to reseed between sessions)
    pub fn set_source(&mut self, source: impl RandomSource + 'static) {
        self.source = Box::new(source);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> DrawPhase {
        self.state.phase(&self.catalog)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn draw_state(&self) -> &DrawState {
        &self.state
    }

    pub fn trace(&self) -> &DrawTrace {
        &self.trace
    }

    /// Winners in draw order (append-only)
    pub fn winners(&self) -> &[WinnerRecord] {
        self.state.winners()
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.catalog.get(self.state.active_category_index())
    }

    pub fn is_event_complete(&self) -> bool {
        self.phase() == DrawPhase::EventComplete
    }

    /// Eligible pool of the active category (empty once the event is complete)
    pub fn eligible(&self) -> Vec<&RosterEntry> {
        match self.active_category() {
            Some(category) => self.pool_for(category),
            None => Vec::new(),
        }
    }

    /// Eligible pool of any catalog category under the current exclusions
    pub fn eligible_for(&self, category_id: &str) -> DrawResult<Vec<&RosterEntry>> {
        let category = self
            .catalog
            .find(category_id)
            .ok_or_else(|| CatalogError::UnknownCategory {
                id: category_id.to_string(),
            })?;
        Ok(self.pool_for(category))
    }

    fn pool_for(&self, category: &Category) -> Vec<&RosterEntry> {
        eligible(
            category,
            &self.roster,
            self.state.drawn_coupons(),
            self.state.category_winner_names(),
        )
    }

    fn active_pool_size(&self) -> usize {
        self.active_category().map_or(0, |category| {
            eligible_count(
                category,
                &self.roster,
                self.state.drawn_coupons(),
                self.state.category_winner_names(),
            )
        })
    }

    /// Read-only view for presentation layers
    pub fn state(&self) -> DrawSnapshot {
        let phase = self.phase();
        let active_category = self.active_category().cloned();
        let category_progress = active_category.as_ref().map(|category| {
            CategoryProgress::new(
                self.state.winners_in(&category.id) as u32,
                category.winner_count,
            )
        });

        DrawSnapshot {
            phase,
            active_category_index: self.state.active_category_index(),
            active_category,
            category_progress,
            eligible_count: self.active_pool_size(),
            winners: self.state.winners().to_vec(),
            is_event_complete: phase == DrawPhase::EventComplete,
            event_progress: EventProgress::new(
                self.state.winners().len(),
                self.catalog.total_winner_slots(),
            ),
        }
    }

    /// Summary and detailed winner listing, valid at any point of the event
    pub fn report(&self) -> DrawReport {
        DrawReport::new(&self.catalog, &self.roster, &self.state)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.state.check_invariants(&self.catalog)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SESSION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Replace the roster and start a fresh session.
    /// On rejection the previous roster and state are kept.
    pub fn load_roster(&mut self, entries: Vec<RosterEntry>) -> DrawResult<()> {
        let phase = self.phase();
        if phase == DrawPhase::Drawing {
            return Err(DrawError::InvalidTransition {
                action: DrawAction::LoadRoster,
                phase,
            });
        }

        let roster = Roster::new(entries).inspect_err(|e| {
            log::warn!("Roster rejected: {}", e);
        })?;

        log::info!(
            "Roster loaded: {} coupons, {} participants",
            roster.len(),
            roster.participant_count()
        );
        let stage = DrawStage::RosterLoaded {
            entries: roster.len(),
            participants: roster.participant_count(),
        };
        self.roster = roster;
        self.state = DrawState::new();
        self.trace = DrawTrace::new();
        self.trace.push(stage);
        Ok(())
    }

    /// Discard all draw state. Valid from any phase; a pending selection is dropped.
    pub fn reset(&mut self) {
        if self.state.is_drawing() {
            log::warn!("Reset while drawing; pending selection discarded");
        }
        log::info!(
            "Session reset ({} winners discarded)",
            self.state.winners().len()
        );
        self.state = DrawState::new();
        self.trace = DrawTrace::new();
        self.trace.push(DrawStage::SessionReset);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAWING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Enter `Drawing` and fix the selection for the active category.
    ///
    /// The winner is chosen here; `resolve_draw()` only commits it, so any
    /// presentation delay in between cannot change the outcome.
    pub fn begin_draw(&mut self) -> DrawResult<PendingDraw> {
        let phase = self.phase();
        match phase {
            DrawPhase::Idle | DrawPhase::CategoryActive => {}
            DrawPhase::EventComplete => return Err(DrawError::NoActiveCategory),
            DrawPhase::Drawing | DrawPhase::CategoryComplete => {
                return Err(DrawError::InvalidTransition {
                    action: DrawAction::Draw,
                    phase,
                });
            }
        }

        let index = self.state.active_category_index();
        let category = self
            .catalog
            .get(index)
            .ok_or(DrawError::NoActiveCategory)?;
        let pool = eligible(
            category,
            &self.roster,
            self.state.drawn_coupons(),
            self.state.category_winner_names(),
        );
        if pool.is_empty() {
            log::warn!(
                "No eligible candidates for {} ({}/{} drawn)",
                category.id,
                self.state.winners_in(&category.id),
                category.winner_count
            );
            return Err(DrawError::NoEligibleCandidates {
                category_id: category.id.clone(),
            });
        }

        let pick = self.source.pick(pool.len()) % pool.len();
        let entry = pool[pick].clone();
        let pool_size = pool.len();
        let category = category.clone();

        if phase == DrawPhase::Idle {
            self.trace.push(DrawStage::CategoryStart {
                index,
                category_id: category.id.clone(),
            });
        }
        self.trace.push(DrawStage::DrawStart {
            category_id: category.id.clone(),
            pool_size,
        });
        log::debug!("Drawing {} from {} eligible", category.id, pool_size);

        Ok(PendingDraw {
            draw_id: self.state.begin(category.clone(), entry),
            category_id: category.id,
            category_name: category.name,
            pool_size,
        })
    }

    /// Commit the in-flight selection
    pub fn resolve_draw(&mut self) -> DrawResult<WinnerRecord> {
        let phase = self.phase();
        let Some(pending) = self.state.take_pending() else {
            return Err(DrawError::InvalidTransition {
                action: DrawAction::Resolve,
                phase,
            });
        };

        let category = pending.category;
        let winner = WinnerRecord::new(&pending.entry, &category, Utc::now());
        self.state.record(winner.clone());

        let drawn = self.state.winners_in(&category.id);
        log::info!(
            "Draw #{}: {} ({}) wins {} [{}/{}]",
            pending.draw_id,
            winner.participant_name,
            winner.coupon_id,
            category.name,
            drawn,
            category.winner_count
        );
        self.trace.push(DrawStage::WinnerDrawn {
            category_id: category.id.clone(),
            coupon_id: winner.coupon_id.clone(),
            participant_name: winner.participant_name.clone(),
        });
        if drawn >= category.winner_count as usize {
            log::info!("Category {} complete", category.id);
            self.trace.push(DrawStage::CategoryComplete {
                category_id: category.id,
            });
        }

        Ok(winner)
    }

    /// Begin and resolve in one step
    pub fn draw(&mut self) -> DrawResult<WinnerRecord> {
        self.begin_draw()?;
        self.resolve_draw()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ADVANCING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Move past a completed category
    pub fn advance(&mut self) -> DrawResult<AdvanceOutcome> {
        let phase = self.phase();
        match phase {
            DrawPhase::CategoryComplete => Ok(self.move_cursor()),
            DrawPhase::EventComplete => Err(DrawError::NoActiveCategory),
            _ => Err(DrawError::InvalidTransition {
                action: DrawAction::Advance,
                phase,
            }),
        }
    }

    /// Operator acknowledgement: leave a stuck category incomplete and move on.
    /// Only accepted when the active category has unmet quota and an empty pool.
    pub fn advance_incomplete(&mut self) -> DrawResult<AdvanceOutcome> {
        let phase = self.phase();
        match phase {
            DrawPhase::Idle | DrawPhase::CategoryActive => {}
            DrawPhase::EventComplete => return Err(DrawError::NoActiveCategory),
            _ => {
                return Err(DrawError::InvalidTransition {
                    action: DrawAction::AdvanceIncomplete,
                    phase,
                });
            }
        }
        if self.active_pool_size() > 0 {
            return Err(DrawError::InvalidTransition {
                action: DrawAction::AdvanceIncomplete,
                phase,
            });
        }

        if let Some(category) = self.active_category().cloned() {
            if phase == DrawPhase::Idle {
                self.trace.push(DrawStage::CategoryStart {
                    index: 0,
                    category_id: category.id.clone(),
                });
            }
            let drawn = self.state.winners_in(&category.id) as u32;
            log::warn!(
                "Category {} abandoned at {}/{} winners",
                category.id,
                drawn,
                category.winner_count
            );
            let stage = DrawStage::CategoryAbandoned {
                category_id: category.id,
                drawn,
                required: category.winner_count,
            };
            self.trace.push(stage);
        }
        Ok(self.move_cursor())
    }

    fn move_cursor(&mut self) -> AdvanceOutcome {
        let index = self.state.advance_cursor();
        match self.catalog.get(index) {
            Some(category) => {
                log::info!("Category {} ({}) is now active", category.id, category.name);
                let category_id = category.id.clone();
                self.trace.push(DrawStage::CategoryStart {
                    index,
                    category_id: category_id.clone(),
                });
                AdvanceOutcome::NextCategory { index, category_id }
            }
            None => {
                let total_winners = self.state.winners().len();
                log::info!("Event complete: {} winners", total_winners);
                self.trace.push(DrawStage::EventComplete { total_winners });
                AdvanceOutcome::EventComplete { total_winners }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CATALOG EDITING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Append a category to the end of the draw sequence
    pub fn add_category(&mut self, category: Category) -> DrawResult<usize> {
        self.ensure_editable()?;
        let before = self.edit_marker();
        let position = self.catalog.push(category)?;
        self.announce_active_change(before);
        log::info!("Category added at position {}", position);
        Ok(position)
    }

    /// Remove a category that has not started drawing
    pub fn remove_category(&mut self, id: &str) -> DrawResult<Category> {
        self.ensure_editable()?;
        let position = self.require_position(id)?;
        self.ensure_pending(id, position)?;
        let active = self.state.active_category_index();
        if active > 0 && position == active && position + 1 == self.catalog.len() {
            return Err(CatalogError::CategoryLocked {
                id: id.to_string(),
                reason: "the active category cannot be removed when no category follows it"
                    .into(),
            }
            .into());
        }

        let before = self.edit_marker();
        let removed = self.catalog.remove(id)?;
        log::info!("Category {} removed", id);
        self.announce_active_change(before);
        Ok(removed)
    }

    /// Move a pending category to another pending position
    pub fn move_category(&mut self, id: &str, target: usize) -> DrawResult<usize> {
        self.ensure_editable()?;
        let position = self.require_position(id)?;
        self.ensure_pending(id, position)?;
        if target < self.pending_from() {
            return Err(CatalogError::CategoryLocked {
                id: id.to_string(),
                reason: format!("position {} has already been drawn", target),
            }
            .into());
        }
        let before = self.edit_marker();
        let position = self.catalog.move_to(id, target)?;
        self.announce_active_change(before);
        Ok(position)
    }

    /// Edit a category. Quota and eligibility are frozen once the category
    /// has winners or the cursor has passed it.
    pub fn update_category(&mut self, id: &str, update: CategoryUpdate) -> DrawResult<()> {
        self.ensure_editable()?;
        let position = self.require_position(id)?;
        if update.touches_draw_rules()
            && (position < self.state.active_category_index() || self.state.winners_in(id) > 0)
        {
            return Err(CatalogError::CategoryLocked {
                id: id.to_string(),
                reason: "winner count and eligibility are fixed once drawing has started".into(),
            }
            .into());
        }
        self.catalog.update(id, update)?;
        Ok(())
    }

    fn ensure_editable(&self) -> DrawResult<()> {
        let phase = self.phase();
        let finished =
            phase == DrawPhase::EventComplete && self.state.active_category_index() > 0;
        if phase == DrawPhase::Drawing || finished {
            return Err(DrawError::InvalidTransition {
                action: DrawAction::EditCatalog,
                phase,
            });
        }
        Ok(())
    }

    fn require_position(&self, id: &str) -> DrawResult<usize> {
        Ok(self
            .catalog
            .position(id)
            .ok_or_else(|| CatalogError::UnknownCategory { id: id.to_string() })?)
    }

    /// Active category id, if a `CategoryStart` has already been announced for it
    fn edit_marker(&self) -> Option<Option<String>> {
        if self.phase() == DrawPhase::Idle {
            return None;
        }
        Some(self.active_category().map(|c| c.id.clone()))
    }

    /// Emit `CategoryStart` when a structural edit changed the active category
    fn announce_active_change(&mut self, before: Option<Option<String>>) {
        let Some(before) = before else {
            return;
        };
        let index = self.state.active_category_index();
        let Some(category) = self.catalog.get(index) else {
            return;
        };
        if before.as_deref() != Some(category.id.as_str()) {
            log::info!("Category {} ({}) is now active", category.id, category.name);
            let category_id = category.id.clone();
            self.trace.push(DrawStage::CategoryStart { index, category_id });
        }
    }

    /// First catalog position that structural edits may touch
    fn pending_from(&self) -> usize {
        let index = self.state.active_category_index();
        match self.catalog.get(index) {
            Some(category) if self.state.winners_in(&category.id) == 0 => index,
            _ => index + 1,
        }
    }

    fn ensure_pending(&self, id: &str, position: usize) -> DrawResult<()> {
        if position < self.pending_from() {
            return Err(CatalogError::CategoryLocked {
                id: id.to_string(),
                reason: "category has already been drawn".into(),
            }
            .into());
        }
        Ok(())
    }
}
