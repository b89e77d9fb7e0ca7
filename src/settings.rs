//! Session settings
//!
//! Chosen before a session starts. Serializable so a driver can load them from
//! a JSON file; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::sim::{Bounds, DifficultyTier};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty tier (locked at session start)
    pub difficulty: DifficultyTier,
    /// RNG seed for path generation
    pub seed: u64,
    /// Plane the grid spans
    pub bounds: Bounds,
    /// Pick radius for resolving pointer positions to nodes
    pub pick_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyTier::Easy,
            seed: 0,
            bounds: Bounds::default(),
            pick_radius: crate::consts::PICK_RADIUS,
        }
    }
}

impl Settings {
    /// Create settings for a tier (other fields default)
    pub fn from_tier(difficulty: DifficultyTier) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}
