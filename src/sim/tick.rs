//! Fixed timestep session tick
//!
//! Applies one frame of input to the session and advances timed state.

use super::grid::NodeId;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start (or restart) a session
    pub start: bool,
    /// Pointer click, already resolved to a node (or to nothing)
    pub click: Option<Option<NodeId>>,
    /// Reveal progressed to this node index
    pub reveal_progress: Option<usize>,
    /// Exit to idle
    pub exit: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Exit wins over everything else in the same frame
    if input.exit {
        state.reset();
        state.marker.update(dt);
        return;
    }

    if input.start {
        state.start();
    }

    if state.phase == GamePhase::Idle {
        // Marker still drifts home after an exit
        state.marker.update(dt);
        return;
    }

    state.time_ticks += 1;

    if let Some(k) = input.reveal_progress {
        state.reveal_to(k);
    }

    if let Some(clicked) = input.click {
        state.click(clicked);
    }

    state.update_pause();
    state.marker.update(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::difficulty::DifficultyTier;
    use crate::sim::state::{GameEvent, Marker};
    use glam::Vec3;

    fn started(seed: u64) -> GameState {
        let settings = Settings {
            seed,
            ..Default::default()
        };
        let mut state = GameState::new(&settings);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            SIM_DT,
        );
        state
    }

    fn click(node: Option<NodeId>) -> TickInput {
        TickInput {
            click: Some(node),
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_ignores_clicks() {
        let mut state = GameState::new(&Settings::default());
        tick(&mut state, &click(Some(NodeId(0))), SIM_DT);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_easy_level_one_scenario() {
        let mut state = started(12345);
        assert_eq!(state.tier, DifficultyTier::Easy);
        assert_eq!(state.grid().unwrap().len(), 15);
        let path = state.path().unwrap().clone();
        assert_eq!(path.len(), 3);

        // Early click before the reveal reaches the midpoint
        tick(&mut state, &click(path.get(1)), SIM_DT);
        assert_eq!(state.index(), 0);

        let reveal = TickInput {
            reveal_progress: Some(path.len() / 2),
            ..Default::default()
        };
        tick(&mut state, &reveal, SIM_DT);
        assert!(state.input_enabled());

        tick(&mut state, &click(path.get(1)), SIM_DT);
        assert_eq!(state.index(), 1);
        assert_eq!(state.phase, GamePhase::AwaitingInput);
        tick(&mut state, &click(path.get(2)), SIM_DT);
        assert_eq!(state.phase, GamePhase::Complete);
        assert!(state.events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_pause_then_next_level() {
        let mut state = started(7);
        let path = state.path().unwrap().clone();
        state.reveal_to(path.len());
        for &node in &path.nodes()[1..] {
            tick(&mut state, &click(Some(node)), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Complete);

        // The clearing tick already consumed one pause tick
        for _ in 1..LEVEL_PAUSE_TICKS {
            assert_eq!(state.phase, GamePhase::Complete);
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::AwaitingInput);
        assert_eq!(state.level, 2);
        assert!(!state.input_enabled());
        assert_eq!(state.path().unwrap().start(), path.last());
    }

    #[test]
    fn test_exit_from_any_phase() {
        let exit = TickInput {
            exit: true,
            ..Default::default()
        };

        let mut state = started(1);
        tick(&mut state, &exit, SIM_DT);
        assert_eq!((state.phase, state.level, state.index()), (GamePhase::Idle, 0, 0));
        tick(&mut state, &exit, SIM_DT);
        assert_eq!((state.phase, state.level, state.index()), (GamePhase::Idle, 0, 0));

        // Exit during the post-clear pause
        let mut state = started(2);
        let path = state.path().unwrap().clone();
        state.reveal_to(path.len());
        for &node in &path.nodes()[1..] {
            state.click(Some(node));
        }
        assert_eq!(state.phase, GamePhase::Complete);
        tick(&mut state, &exit, SIM_DT);
        assert_eq!((state.phase, state.level, state.index()), (GamePhase::Idle, 0, 0));
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99999);
        let mut b = started(99999);
        assert_eq!(a.path(), b.path());

        for _ in 0..3 {
            let path = a.path().unwrap().clone();
            a.reveal_to(path.len());
            b.reveal_to(path.len());
            for &node in &path.nodes()[1..] {
                tick(&mut a, &click(Some(node)), SIM_DT);
                tick(&mut b, &click(Some(node)), SIM_DT);
            }
            while a.phase == GamePhase::Complete {
                tick(&mut a, &TickInput::default(), SIM_DT);
                tick(&mut b, &TickInput::default(), SIM_DT);
            }
            assert_eq!(a.path(), b.path());
        }
        assert_eq!(a.level, 4);
        assert_eq!(a.time_ticks, b.time_ticks);
    }

    #[test]
    fn test_marker_returns_home_after_exit() {
        let mut state = started(3);
        let home = Vec3::new(0.0, 0.0, -100.0);
        state.marker_home = home;
        state.marker = Marker::new(Vec3::ZERO);

        let exit = TickInput {
            exit: true,
            ..Default::default()
        };
        tick(&mut state, &exit, SIM_DT);
        assert!(state.marker.position.z < 0.0);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.marker.position, home);
        assert_eq!(state.time_ticks, 1);
    }
}
