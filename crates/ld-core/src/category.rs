//! Prize category catalog
//!
//! Categories are drawn strictly in catalog order. The catalog keeps its
//! `order` values dense (1..=N) after every construction or edit, so the
//! position in the vector and the `order` field always agree.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::roster::RosterEntry;

// ═══════════════════════════════════════════════════════════════════════════════
// ELIGIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Predicate deciding which roster entries may win a category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityRule {
    /// No restriction
    #[default]
    Any,
    /// Participant must hold at least `min` coupons in total
    MinTotalCoupons { min: u32 },
    /// Entry district must be one of the listed districts (case-insensitive)
    Districts { districts: Vec<String> },
    /// Every nested rule must hold
    AllOf { rules: Vec<EligibilityRule> },
}

impl EligibilityRule {
    pub fn min_total_coupons(min: u32) -> Self {
        Self::MinTotalCoupons { min }
    }

    /// Check a roster entry against the rule
    pub fn allows(&self, entry: &RosterEntry) -> bool {
        match self {
            Self::Any => true,
            Self::MinTotalCoupons { min } => entry.total_coupon_count.unwrap_or(0) >= *min,
            Self::Districts { districts } => entry.district.as_deref().is_some_and(|d| {
                districts
                    .iter()
                    .any(|allowed| allowed.trim().eq_ignore_ascii_case(d.trim()))
            }),
            Self::AllOf { rules } => rules.iter().all(|r| r.allows(entry)),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Any)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CATEGORY
// ═══════════════════════════════════════════════════════════════════════════════

/// A prize tier with its own winner quota
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Draw sequence position (1-based, dense once inside a catalog)
    #[serde(default)]
    pub order: u32,
    pub winner_count: u32,
    #[serde(default)]
    pub eligibility: EligibilityRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, winner_count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order: 0,
            winner_count,
            eligibility: EligibilityRule::Any,
            description: None,
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_eligibility(mut self, rule: EligibilityRule) -> Self {
        self.eligibility = rule;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self, position: usize) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyId { position });
        }
        if self.winner_count < 1 {
            return Err(CatalogError::ZeroWinnerCount {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Partial edit applied to an existing category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub winner_count: Option<u32>,
    #[serde(default)]
    pub eligibility: Option<EligibilityRule>,
}

impl CategoryUpdate {
    /// Whether the edit changes who may win or how many win
    pub fn touches_draw_rules(&self) -> bool {
        self.winner_count.is_some() || self.eligibility.is_some()
    }
}

/// Non-fatal catalog configuration finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogWarning {
    /// Several categories shared an `order` value; insertion order broke the tie
    DuplicateOrder { order: u32, ids: Vec<String> },
}

// ═══════════════════════════════════════════════════════════════════════════════
// CATALOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered, validated sequence of prize categories
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
    warnings: Vec<CatalogWarning>,
}

impl CategoryCatalog {
    /// Validate, sort by `order` (stable) and renumber densely
    pub fn new(mut categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            category.validate(position)?;
            if !seen.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: category.id.clone(),
                });
            }
        }

        categories.sort_by_key(|c| c.order);

        let mut warnings = Vec::new();
        for group in categories.chunk_by(|a, b| a.order == b.order) {
            if group.len() > 1 {
                let order = group[0].order;
                let ids: Vec<String> = group.iter().map(|c| c.id.clone()).collect();
                log::warn!(
                    "Categories {:?} share order {}; keeping insertion order",
                    ids,
                    order
                );
                warnings.push(CatalogWarning::DuplicateOrder { order, ids });
            }
        }

        let mut catalog = Self {
            categories,
            warnings,
        };
        catalog.renumber();
        Ok(catalog)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sum of all winner quotas
    pub fn total_winner_slots(&self) -> u32 {
        self.categories.iter().map(|c| c.winner_count).sum()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EDITING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Append a category at the end of the draw sequence
    pub fn push(&mut self, category: Category) -> Result<usize, CatalogError> {
        let position = self.categories.len();
        self.insert_at(position, category)
    }

    /// Insert a category at `position` (0-based)
    pub fn insert_at(&mut self, position: usize, category: Category) -> Result<usize, CatalogError> {
        if position > self.categories.len() {
            return Err(CatalogError::PositionOutOfRange {
                position,
                len: self.categories.len(),
            });
        }
        category.validate(position)?;
        if self.find(&category.id).is_some() {
            return Err(CatalogError::DuplicateId { id: category.id });
        }

        self.categories.insert(position, category);
        self.renumber();
        Ok(position)
    }

    /// Remove a category and close the gap
    pub fn remove(&mut self, id: &str) -> Result<Category, CatalogError> {
        let position = self.require(id)?;
        let removed = self.categories.remove(position);
        self.renumber();
        Ok(removed)
    }

    /// Move a category one step earlier; no-op at the front
    pub fn move_up(&mut self, id: &str) -> Result<usize, CatalogError> {
        let position = self.require(id)?;
        self.move_to(id, position.saturating_sub(1))
    }

    /// Move a category one step later; no-op at the back
    pub fn move_down(&mut self, id: &str) -> Result<usize, CatalogError> {
        let position = self.require(id)?;
        let last = self.categories.len() - 1;
        self.move_to(id, (position + 1).min(last))
    }

    /// Move a category to `target` (0-based)
    pub fn move_to(&mut self, id: &str, target: usize) -> Result<usize, CatalogError> {
        let position = self.require(id)?;
        if target >= self.categories.len() {
            return Err(CatalogError::PositionOutOfRange {
                position: target,
                len: self.categories.len(),
            });
        }
        if position != target {
            let category = self.categories.remove(position);
            self.categories.insert(target, category);
            self.renumber();
        }
        Ok(target)
    }

    /// Apply a partial edit to a category
    pub fn update(&mut self, id: &str, update: CategoryUpdate) -> Result<(), CatalogError> {
        let position = self.require(id)?;
        if update.winner_count == Some(0) {
            return Err(CatalogError::ZeroWinnerCount { id: id.to_string() });
        }

        let category = &mut self.categories[position];
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        if let Some(winner_count) = update.winner_count {
            category.winner_count = winner_count;
        }
        if let Some(eligibility) = update.eligibility {
            category.eligibility = eligibility;
        }
        Ok(())
    }

    fn require(&self, id: &str) -> Result<usize, CatalogError> {
        self.position(id).ok_or_else(|| CatalogError::UnknownCategory { id: id.to_string() })
    }

    fn renumber(&mut self) {
        for (i, category) in self.categories.iter_mut().enumerate() {
            category.order = i as u32 + 1;
        }
    }
}
