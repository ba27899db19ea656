//! Event configuration loading
//!
//! An event file names the event, lists its prize categories and picks a
//! presentation timing profile. JSON and YAML are accepted, chosen by file
//! extension. Roster files use the same mechanism (a list of entries).

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ld_core::{CatalogError, Category, CategoryCatalog, RosterEntry};
use ld_stage::PresentationTiming;

use crate::presets::festival_categories;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// File formats understood by the loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, ConfigError> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yml::from_str(text)?,
        })
    }
}

fn default_event_name() -> String {
    "Lucky Draw".to_string()
}

/// Event definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_event_name")]
    pub name: String,

    /// Prize categories. The festival preset fills in only when the field is
    /// absent; an explicit empty list gives an empty catalog.
    #[serde(default = "festival_categories")]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub timing: PresentationTiming,

    /// Seed for a reproducible draw; OS entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl EventConfig {
    /// Festival preset with ceremony timing
    pub fn festival() -> Self {
        Self {
            name: default_event_name(),
            categories: festival_categories(),
            timing: PresentationTiming::default(),
            seed: None,
        }
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;
        let config: Self = format.parse(&text)?;
        log::info!(
            "Loaded event config '{}' from {} ({} categories)",
            config.name,
            path.display(),
            config.categories.len()
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        ConfigFormat::Json.parse(json)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        ConfigFormat::Yaml.parse(yaml)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the validated catalog
    pub fn catalog(&self) -> Result<CategoryCatalog, ConfigError> {
        if self.categories.is_empty() {
            log::warn!("Event '{}' has no categories", self.name);
        }
        Ok(CategoryCatalog::new(self.categories.clone())?)
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::festival()
    }
}

/// Read roster entries from a `.json`, `.yaml` or `.yml` list
pub fn load_roster_entries(path: impl AsRef<Path>) -> Result<Vec<RosterEntry>, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let entries: Vec<RosterEntry> = format.parse(&text)?;
    log::info!("Read {} roster entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::EligibilityRule;
    use ld_stage::TimingProfile;
    use std::io::Write;

    #[test]
    fn test_json_config() {
        let config = EventConfig::from_json(
            r#"{
                "name": "Dealer Meet",
                "categories": [
                    {"id": "tv", "name": "TV", "order": 2, "winner_count": 1},
                    {"id": "buds", "name": "Earbuds", "order": 1, "winner_count": 4,
                     "eligibility": {"kind": "min_total_coupons", "min": 3}}
                ],
                "timing": {"profile": "instant", "reveal_delay_ms": 0, "category_pause_ms": 0},
                "seed": 42
            }"#,
        )
        .unwrap();

        assert_eq!(config.name, "Dealer Meet");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.timing.profile, TimingProfile::Instant);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.get(0).unwrap().id, "buds");
        assert_eq!(
            catalog.get(0).unwrap().eligibility,
            EligibilityRule::MinTotalCoupons { min: 3 }
        );
    }

    #[test]
    fn test_yaml_config_defaults() {
        let config = EventConfig::from_yaml(
            "categories:\n  - id: laptop\n    name: Laptop\n    winner_count: 2\n",
        )
        .unwrap();
        assert_eq!(config.name, "Lucky Draw");
        assert_eq!(config.timing, PresentationTiming::ceremony());
        assert_eq!(config.catalog().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_categories_use_preset() {
        let config = EventConfig::from_json("{}").unwrap();
        assert_eq!(config.catalog().unwrap().len(), 9);
    }

    #[test]
    fn test_explicit_empty_categories_stay_empty() {
        let config = EventConfig::from_yaml("name: Rehearsal\ncategories: []\n").unwrap();
        let catalog = config.catalog().unwrap();
        assert!(catalog.is_empty());

        let engine = crate::engine::DrawEngine::new(catalog);
        assert!(engine.is_event_complete());
    }

    #[test]
    fn test_invalid_catalog() {
        let config = EventConfig::from_json(
            r#"{"categories": [{"id": "x", "name": "X", "winner_count": 0}]}"#,
        )
        .unwrap();
        assert!(matches!(
            config.catalog(),
            Err(ConfigError::Catalog(CatalogError::ZeroWinnerCount { .. }))
        ));
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();

        let config_path = dir.path().join("event.yml");
        fs::write(
            &config_path,
            "name: Test\ncategories:\n  - id: a\n    name: A\n    winner_count: 1\n",
        )
        .unwrap();
        assert_eq!(EventConfig::load(&config_path).unwrap().name, "Test");

        let roster_path = dir.path().join("roster.json");
        let mut file = fs::File::create(&roster_path).unwrap();
        write!(
            file,
            r#"[{{"coupon_id":"C1","name":"Ann"}},{{"coupon_id":"C2","name":"Ben","district":"North"}}]"#
        )
        .unwrap();
        let entries = load_roster_entries(&roster_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].district.as_deref(), Some("North"));

        let bad = dir.path().join("roster.xlsx");
        fs::write(&bad, "").unwrap();
        assert!(matches!(
            load_roster_entries(&bad),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            EventConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = EventConfig::festival();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(EventConfig::from_json(&json).unwrap(), config);
    }
}
