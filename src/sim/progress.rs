//! Sequential click verification against a goal path
//!
//! The tracker holds an index into the path. A click on the node right after
//! the index advances it; anything else is an incorrect attempt. Clicks are
//! ignored until the reveal has passed the path's midpoint.

use serde::{Deserialize, Serialize};

use super::grid::NodeId;
use super::path::GoalPath;

/// Tracker phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerPhase {
    /// No path loaded (session not started or reset)
    Idle,
    /// Waiting for the next correct click
    AwaitingInput,
    /// Every segment traced
    Complete,
}

/// Result of evaluating one click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Input not enabled or nothing to match against
    Ignored,
    /// Index advanced to `index`, now standing on `node`
    Correct { index: usize, node: NodeId },
    /// Final segment traced
    LevelCleared { index: usize, node: NodeId },
    /// Wrong node or no node at all
    Incorrect { clicked: Option<NodeId> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressTracker {
    phase: TrackerPhase,
    path: Option<GoalPath>,
    index: usize,
    reveal_index: usize,
    input_enabled: bool,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            phase: TrackerPhase::Idle,
            path: None,
            index: 0,
            reveal_index: 0,
            input_enabled: false,
        }
    }

    /// Load a fresh path; input stays disabled until the reveal catches up
    ///
    /// A path with no segments is already traced and loads as complete.
    pub fn load(&mut self, path: GoalPath) {
        self.phase = if path.edges() == 0 {
            TrackerPhase::Complete
        } else {
            TrackerPhase::AwaitingInput
        };
        self.path = Some(path);
        self.index = 0;
        self.reveal_index = 0;
        self.input_enabled = false;
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> Option<&GoalPath> {
        self.path.as_ref()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    /// Node the player currently stands on
    pub fn current(&self) -> Option<NodeId> {
        self.path.as_ref().and_then(|p| p.get(self.index))
    }

    /// Node the next correct click must hit
    pub fn expected(&self) -> Option<NodeId> {
        self.path.as_ref().and_then(|p| p.get(self.index + 1))
    }

    /// Record reveal progress (nodes `0..=k` shown)
    ///
    /// Returns true when this call enabled input. Progress never moves backwards.
    pub fn reveal_to(&mut self, k: usize) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        self.reveal_index = self.reveal_index.max(k.min(path.edges()));
        if !self.input_enabled && self.reveal_index >= path.len() / 2 {
            self.input_enabled = true;
            return true;
        }
        false
    }

    /// Evaluate a click resolved to `clicked` (or to no node)
    pub fn click(&mut self, clicked: Option<NodeId>) -> ClickOutcome {
        if !self.input_enabled || self.phase != TrackerPhase::AwaitingInput {
            return ClickOutcome::Ignored;
        }
        let Some(path) = &self.path else {
            return ClickOutcome::Ignored;
        };

        match (clicked, path.get(self.index + 1)) {
            (Some(node), Some(expected)) if node == expected => {
                self.index += 1;
                if self.index == path.len() - 1 {
                    self.phase = TrackerPhase::Complete;
                    ClickOutcome::LevelCleared {
                        index: self.index,
                        node,
                    }
                } else {
                    ClickOutcome::Correct {
                        index: self.index,
                        node,
                    }
                }
            }
            _ => ClickOutcome::Incorrect { clicked },
        }
    }

    /// Back to idle, dropping the path
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
