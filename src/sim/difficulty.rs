//! Difficulty tiers and the parameters they resolve to
//!
//! Pure lookup table: every tier maps to fixed grid dimensions, a path growth
//! factor and presentation pacing.

use serde::{Deserialize, Serialize};

/// Difficulty preset, selected before a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DifficultyTier {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Everything a tier controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// Grid cells along x (nodes per row = cols + 1)
    pub cols: u32,
    /// Grid cells along z (node rows = rows + 1)
    pub rows: u32,
    /// Multiplier applied to the base path length (level + 1)
    pub path_length_factor: f32,
    /// Seconds between revealed path segments
    pub reveal_delay: f32,
    /// Seconds between node spawns while the grid appears
    pub spawn_delay: f32,
}

/// Base node spawn delay, divided by the tier's column count
const BASE_SPAWN_DELAY: f32 = 0.01;

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::Expert => "Expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyTier::Easy),
            "medium" | "med" => Some(DifficultyTier::Medium),
            "hard" => Some(DifficultyTier::Hard),
            "expert" | "exp" => Some(DifficultyTier::Expert),
            _ => None,
        }
    }

    /// Tier by menu ordinal (0 = Easy ... 3 = Expert)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// (cols, rows) of the grid
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            DifficultyTier::Easy => (2, 4),
            DifficultyTier::Medium => (4, 8),
            DifficultyTier::Hard => (6, 12),
            DifficultyTier::Expert => (12, 12),
        }
    }

    pub fn path_length_factor(&self) -> f32 {
        match self {
            DifficultyTier::Medium => 1.75,
            DifficultyTier::Hard => 1.5,
            DifficultyTier::Easy | DifficultyTier::Expert => 1.0,
        }
    }

    pub fn reveal_delay(&self) -> f32 {
        match self {
            DifficultyTier::Easy => 0.30,
            DifficultyTier::Medium => 0.25,
            DifficultyTier::Hard => 0.20,
            DifficultyTier::Expert => 0.15,
        }
    }

    /// Resolve the full parameter set for this tier
    pub fn params(&self) -> TierParams {
        let (cols, rows) = self.dimensions();
        TierParams {
            cols,
            rows,
            path_length_factor: self.path_length_factor(),
            reveal_delay: self.reveal_delay(),
            spawn_delay: BASE_SPAWN_DELAY / cols as f32,
        }
    }

    /// Number of edges in the goal path for `level` (truncated)
    pub fn path_length(&self, level: u32) -> usize {
        ((level + 1) as f32 * self.path_length_factor()) as usize
    }
}

/// Level that follows `level`
#[inline]
pub fn next_level(level: u32) -> u32 {
    level + 1
}
