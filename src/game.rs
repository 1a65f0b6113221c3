//! The game loop instance
//!
//! `Game` owns the run state and the music handle. The host calls
//! [`Game::frame`] once per animation frame while it returns
//! [`FrameStatus::Continue`], and forwards input through
//! [`Game::apply`]. All calls happen on the host's single thread.

use crate::audio::BackgroundMusic;
use crate::input::Command;
use crate::render::{RenderSurface, draw};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, fire, move_player, tick};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stop,
}

/// One game, reset in place for every new run
pub struct Game<M: BackgroundMusic> {
    state: GameState,
    music: M,
    /// A frame is scheduled (or about to be)
    running: bool,
}

impl<M: BackgroundMusic> Game<M> {
    /// Build the game. Nothing plays or runs until [`Game::reset`].
    pub fn new(settings: Settings, seed: u64, music: M) -> Self {
        Self {
            state: GameState::new(settings, seed),
            music,
            running: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mark the frame loop as stopped, e.g. when the host could not
    /// schedule the next frame. The next reset starts a new loop.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Start a new run.
    ///
    /// Returns true when the host must start scheduling frames, false when
    /// a frame loop is already going.
    pub fn reset(&mut self) -> bool {
        self.state.reset();
        self.music.play();
        log::info!("New run started (seed {})", self.state.seed);

        let start = !self.running;
        self.running = true;
        start
    }

    /// Advance one frame and paint it
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn RenderSurface) -> FrameStatus {
        let events = tick(&mut self.state, now_ms);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            self.music.pause();
        }

        draw(&self.state, surface);

        if self.state.is_over() {
            self.running = false;
            FrameStatus::Stop
        } else {
            FrameStatus::Continue
        }
    }

    /// Fire if the cooldown allows it
    pub fn on_fire(&mut self, now_ms: f64) -> bool {
        fire(&mut self.state, now_ms)
    }

    /// Move the player, clamped to the field
    pub fn on_move(&mut self, dx: f32, dy: f32) {
        move_player(&mut self.state, dx, dy);
    }

    /// Apply an input command.
    ///
    /// Returns true when the host must start scheduling frames (a restart
    /// after game over).
    pub fn apply(&mut self, command: Command, now_ms: f64) -> bool {
        match command {
            Command::Fire => {
                self.on_fire(now_ms);
                false
            }
            Command::Move { dx, dy } => {
                self.on_move(dx, dy);
                false
            }
            Command::Restart => self.reset(),
        }
    }
}
