//! Presentation timing profiles
//!
//! The engine itself never waits. These values tell a presentation layer how
//! long to hold the "drawing" animation before asking the engine to resolve,
//! and how long to pause between categories.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Named pacing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Stage show pacing
    #[default]
    Ceremony,
    /// Shorter pauses for rehearsals
    Brisk,
    /// No pauses (tests, batch runs)
    Instant,
    /// Hand-tuned values
    Custom,
}

impl TimingProfile {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ceremony" => Some(Self::Ceremony),
            "brisk" => Some(Self::Brisk),
            "instant" => Some(Self::Instant),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Detailed pacing values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationTiming {
    pub profile: TimingProfile,
    /// Hold between entering `Drawing` and resolving the winner (ms)
    pub reveal_delay_ms: u64,
    /// Pause after a category completes, before advancing (ms)
    pub category_pause_ms: u64,
}

impl PresentationTiming {
    pub fn ceremony() -> Self {
        Self {
            profile: TimingProfile::Ceremony,
            reveal_delay_ms: 4000,
            category_pause_ms: 3000,
        }
    }

    pub fn brisk() -> Self {
        Self {
            profile: TimingProfile::Brisk,
            reveal_delay_ms: 1200,
            category_pause_ms: 800,
        }
    }

    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            reveal_delay_ms: 0,
            category_pause_ms: 0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Ceremony => Self::ceremony(),
            TimingProfile::Brisk => Self::brisk(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self {
                profile: TimingProfile::Custom,
                ..Self::ceremony()
            },
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn category_pause(&self) -> Duration {
        Duration::from_millis(self.category_pause_ms)
    }
}

impl Default for PresentationTiming {
    fn default() -> Self {
        Self::ceremony()
    }
}
