//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No clocks, rendering or platform dependencies

pub mod difficulty;
pub mod grid;
pub mod path;
pub mod progress;
pub mod state;
pub mod tick;

pub use difficulty::{DifficultyTier, TierParams, next_level};
pub use grid::{Bounds, Grid, Node, NodeId};
pub use path::{GoalPath, MAX_REDRAWS, generate_path};
pub use progress::{ClickOutcome, ProgressTracker, TrackerPhase};
pub use state::{GameEvent, GamePhase, GameState, Marker, RngState};
pub use tick::{TickInput, tick};
