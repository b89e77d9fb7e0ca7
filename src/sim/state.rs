//! Session state and core simulation types
//!
//! One session owns the grid, the current goal path and the RNG. The grid
//! survives level changes; only the path is regenerated.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyTier, next_level};
use super::grid::{Bounds, Grid, NodeId};
use super::path::{GoalPath, generate_path};
use super::progress::{ClickOutcome, ProgressTracker, TrackerPhase};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running
    Idle,
    /// Path loaded, waiting for reveal and clicks
    AwaitingInput,
    /// Path traced, pausing before the next level
    Complete,
}

/// Notifications for presentation collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NodeCreated { index: usize, position: Vec3 },
    GridReady { node_count: usize },
    PathReady { level: u32, edges: usize, path: GoalPath },
    InputEnabled,
    Advance { index: usize, node: NodeId, position: Vec3 },
    Incorrect { clicked: Option<NodeId> },
    LevelCleared { level: u32 },
    SessionReset,
}

/// Player position indicator, eased toward its target node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }
}

impl Marker {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            target: position,
        }
    }

    /// Ease toward the target, snapping once close enough
    pub fn update(&mut self, dt: f32) {
        if self.position.distance(self.target) <= MARKER_SNAP_DISTANCE {
            self.position = self.target;
            return;
        }
        let t = (dt * MARKER_SPEED).clamp(0.0, 1.0);
        self.position = self.position.lerp(self.target, t);
    }

    pub fn at_target(&self) -> bool {
        self.position == self.target
    }
}

/// Seed record the session RNG is rebuilt from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Selected tier; takes effect at the next `start`
    pub tier: DifficultyTier,
    /// Plane the grid spans
    pub bounds: Bounds,
    /// Where the marker rests while no session runs
    pub marker_home: Vec3,
    /// Seed for reproducibility
    pub rng_state: RngState,
    /// Current level (1-based, 0 while idle)
    pub level: u32,
    pub phase: GamePhase,
    /// Node the player stands on
    pub player: Option<NodeId>,
    pub marker: Marker,
    /// Ticks left in the pause after a cleared level
    pub pause_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending notifications, drained by the caller
    pub events: Vec<GameEvent>,
    grid: Option<Grid>,
    /// Tier locked in by `start`, used for every level of the session
    session_tier: Option<DifficultyTier>,
    tracker: ProgressTracker,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle session from settings
    pub fn new(settings: &Settings) -> Self {
        let rng_state = RngState::new(settings.seed);
        Self {
            tier: settings.difficulty,
            bounds: settings.bounds,
            marker_home: settings.bounds.center,
            rng: rng_state.to_rng(),
            rng_state,
            level: 0,
            phase: GamePhase::Idle,
            player: None,
            marker: Marker::new(settings.bounds.center),
            pause_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
            grid: None,
            session_tier: None,
            tracker: ProgressTracker::new(),
        }
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Tier the running session was started with
    pub fn session_tier(&self) -> Option<DifficultyTier> {
        self.session_tier
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn path(&self) -> Option<&GoalPath> {
        self.tracker.path()
    }

    /// Index into the current goal path
    pub fn index(&self) -> usize {
        self.tracker.index()
    }

    pub fn input_enabled(&self) -> bool {
        self.tracker.input_enabled()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build the grid and load the first level
    ///
    /// Restarting a running session resets it first.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            self.reset();
        }

        let tier = self.tier;
        let grid = Grid::build(tier, self.bounds);
        for node in grid.iter() {
            self.events.push(GameEvent::NodeCreated {
                index: node.id.0,
                position: node.position,
            });
        }
        self.events.push(GameEvent::GridReady {
            node_count: grid.len(),
        });
        log::info!(
            "{} session: {}x{} grid, {} nodes",
            tier.as_str(),
            grid.cols,
            grid.rows,
            grid.len()
        );

        let center = grid.center_node();
        // Marker eases in from wherever it rests
        self.marker.target = grid.position(center).unwrap_or(self.marker_home);
        self.player = Some(center);
        self.grid = Some(grid);
        self.session_tier = Some(tier);
        self.level = 1;
        self.load_level();
    }

    /// Generate and load the path for the current level from the player's node
    fn load_level(&mut self) {
        let (Some(grid), Some(tier)) = (&self.grid, self.session_tier) else {
            return;
        };
        let start = self.player.unwrap_or_else(|| grid.center_node());
        let path = generate_path(grid, self.level, tier, start, &mut self.rng);

        log::info!("Level {}: {} segments from node {}", self.level, path.edges(), start.0);
        self.events.push(GameEvent::PathReady {
            level: self.level,
            edges: path.edges(),
            path: path.clone(),
        });
        self.tracker.load(path);
        self.phase = GamePhase::AwaitingInput;
        self.pause_ticks = 0;
    }

    /// Reveal progressed to node `k`
    pub fn reveal_to(&mut self, k: usize) {
        if self.tracker.reveal_to(k) {
            log::debug!("Input enabled at reveal index {}", k);
            self.events.push(GameEvent::InputEnabled);
        }
    }

    /// Evaluate a click resolved to `clicked`
    pub fn click(&mut self, clicked: Option<NodeId>) -> ClickOutcome {
        let outcome = self.tracker.click(clicked);
        match outcome {
            ClickOutcome::Ignored => {}
            ClickOutcome::Correct { index, node } => self.advance(index, node),
            ClickOutcome::LevelCleared { index, node } => {
                self.advance(index, node);
                log::info!("Level {} cleared", self.level);
                self.events.push(GameEvent::LevelCleared { level: self.level });
                self.phase = GamePhase::Complete;
                self.pause_ticks = LEVEL_PAUSE_TICKS;
            }
            ClickOutcome::Incorrect { clicked } => {
                log::debug!("Incorrect click {:?}, expected {:?}", clicked, self.tracker.expected());
                self.events.push(GameEvent::Incorrect { clicked });
            }
        }
        outcome
    }

    fn advance(&mut self, index: usize, node: NodeId) {
        let position = self
            .grid
            .as_ref()
            .and_then(|g| g.position(node))
            .unwrap_or(self.marker.target);
        self.player = Some(node);
        self.marker.target = position;
        self.events.push(GameEvent::Advance {
            index,
            node,
            position,
        });
    }

    /// Count down the post-clear pause; loads the next level when it ends
    pub fn update_pause(&mut self) {
        if self.phase != GamePhase::Complete {
            return;
        }
        if self.pause_ticks > 0 {
            self.pause_ticks -= 1;
        }
        if self.pause_ticks == 0 {
            self.level = next_level(self.level);
            self.load_level();
        }
    }

    /// End the session: grid and path dropped, counters zeroed
    ///
    /// Safe in every phase; repeated calls leave the same state.
    pub fn reset(&mut self) {
        let was_running = self.phase != GamePhase::Idle;
        self.grid = None;
        self.session_tier = None;
        self.tracker.reset();
        self.marker.target = self.marker_home;
        self.level = 0;
        self.player = None;
        self.pause_ticks = 0;
        self.phase = GamePhase::Idle;
        if was_running {
            log::info!("Session reset");
            self.events.push(GameEvent::SessionReset);
        }
    }

    pub fn tracker_phase(&self) -> TrackerPhase {
        self.tracker.phase()
    }
}
