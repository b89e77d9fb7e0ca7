//! Trace Path demo driver
//!
//! Runs a headless session with an auto-player: the path is revealed on a
//! timer, then the player clicks node positions that are hit-tested back onto
//! the grid. Events are logged as they are drained.

use std::path::PathBuf;

use clap::Parser;

use trace_path::consts::*;
use trace_path::sim::{DifficultyTier, GameEvent, GamePhase, GameState, TickInput, tick};
use trace_path::{RevealScheduler, Settings};

/// Play trace-path sessions headlessly.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Difficulty tier (easy, medium, hard, expert)
    #[arg(short = 'f', long)]
    difficulty: Option<String>,

    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of levels to clear before exiting
    #[arg(short, long, default_value_t = 3)]
    levels: u32,

    /// Wrong clicks the auto-player makes per level
    #[arg(short, long, default_value_t = 0)]
    mistakes: u32,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print events as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Headless game instance
struct Game {
    state: GameState,
    reveal: Option<RevealScheduler>,
    input: TickInput,
    accumulator: f32,
    pick_radius: f32,
    mistakes_left: u32,
    mistakes_per_level: u32,
    json: bool,
}

impl Game {
    fn new(settings: &Settings, mistakes_per_level: u32, json: bool) -> Self {
        Self {
            state: GameState::new(settings),
            reveal: None,
            input: TickInput::default(),
            accumulator: 0.0,
            pick_radius: settings.pick_radius,
            mistakes_left: mistakes_per_level,
            mistakes_per_level,
            json,
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        if let Some(reveal) = &mut self.reveal {
            if let Some(k) = reveal.advance(dt) {
                self.input.reveal_progress = Some(k);
            }
        }

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.handle_events();
        }
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            if self.json {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::warn!("Cannot encode event: {e}"),
                }
            }
            match &event {
                GameEvent::NodeCreated { .. } => {}
                GameEvent::PathReady { level, edges, path } => {
                    let tier = self.state.session_tier().unwrap_or(self.state.tier);
                    let delay = tier.params().reveal_delay;
                    self.reveal = Some(RevealScheduler::new(path, delay));
                    self.mistakes_left = self.mistakes_per_level;
                    log::info!("Level {level}: trace {edges} segments");
                }
                GameEvent::Incorrect { clicked } => log::info!("Incorrect: {clicked:?}"),
                GameEvent::Advance { index, node, .. } => {
                    log::debug!("Advanced to #{index} (node {})", node.0)
                }
                GameEvent::LevelCleared { level } => log::info!("Level {level} cleared"),
                other => log::debug!("{other:?}"),
            }
        }
    }

    /// Auto-player: click once the reveal has finished
    fn play(&mut self) {
        let revealed = self.reveal.as_ref().is_some_and(|r| r.is_done());
        if !revealed || !self.state.input_enabled() || self.state.phase != GamePhase::AwaitingInput
        {
            return;
        }
        let Some(grid) = self.state.grid() else {
            return;
        };
        let Some(expected) = self.state.tracker().expected() else {
            return;
        };

        let target = if self.mistakes_left > 0 {
            self.mistakes_left -= 1;
            // The node after the expected one is a skip-ahead miss
            let index = self.state.index();
            self.state
                .path()
                .and_then(|p| p.get(index + 2))
                .filter(|&n| n != expected)
        } else {
            Some(expected)
        };

        // Pointer lands on the node's position (or off the plane for a miss)
        let point = target
            .and_then(|n| grid.position(n))
            .unwrap_or_else(|| grid.off_plane_point(self.pick_radius));
        self.input.click = Some(grid.node_at(point, self.pick_radius));
    }
}

fn main() {
    let args = Args::parse();

    if args.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let mut settings = args
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(name) = &args.difficulty {
        match DifficultyTier::from_str(name) {
            Some(tier) => settings.difficulty = tier,
            None => log::warn!("Unknown difficulty '{name}', using {}", settings.difficulty.as_str()),
        }
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    log::info!(
        "Trace Path starting: {} seed {}",
        settings.difficulty.as_str(),
        settings.seed
    );

    let mut game = Game::new(&settings, args.mistakes, args.json);
    game.input.start = true;

    // Frame loop at a fixed 60 fps; bail out if something stalls
    let frame_dt = 1.0 / 60.0;
    let max_frames = 60 * 60 * 10;
    for _ in 0..max_frames {
        game.update(frame_dt);
        if game.state.level > args.levels {
            break;
        }
        game.play();
    }

    let cleared = game.state.level.saturating_sub(1);
    game.input.exit = true;
    game.update(frame_dt);
    println!("Cleared {cleared} level(s) on {}", settings.difficulty.as_str());
}
