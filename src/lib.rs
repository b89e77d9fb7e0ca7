//! Trace Path - a procedurally generated path memory game
//!
//! Core modules:
//! - `sim`: Deterministic core (grid, path generation, click verification)
//! - `reveal`: Timed path reveal, driven from outside the core
//! - `settings`: Session configuration

pub mod reveal;
pub mod settings;
pub mod sim;

pub use reveal::RevealScheduler;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play plane extents
    pub const PLANE_WIDTH: f32 = 40.0;
    pub const PLANE_DEPTH: f32 = 80.0;

    /// Pointer pick radius around a node
    pub const PICK_RADIUS: f32 = 2.0;

    /// Pause after a cleared level before the next path (1 second)
    pub const LEVEL_PAUSE_TICKS: u32 = 60;

    /// Marker easing rate (lerp factor per second)
    pub const MARKER_SPEED: f32 = 8.0;
    /// Distance under which the marker snaps onto its target
    pub const MARKER_SNAP_DISTANCE: f32 = 0.25;
}
