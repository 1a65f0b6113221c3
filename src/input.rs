//! Input translation
//!
//! Turns raw keyboard and touch samples into game [`Command`]s. Positions
//! are canvas-relative pixels. The adapter only reads game state; the game
//! applies the commands.

use glam::Vec2;

use crate::consts::{RESTART_ZONE_HEIGHT, RESTART_ZONE_WIDTH};
use crate::sim::GameState;

/// A request from the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Fire,
    Move { dx: f32, dy: f32 },
    Restart,
}

/// Keyboard and touch state between events
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    /// Last touch sample, for drag deltas
    touch_origin: Option<Vec2>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a `KeyboardEvent.key` value
    pub fn key_down(&self, key: &str, state: &GameState) -> Option<Command> {
        let speed = state.player.speed;
        match key {
            " " => Some(Command::Fire),
            "ArrowUp" => Some(Command::Move { dx: 0.0, dy: -speed }),
            "ArrowDown" => Some(Command::Move { dx: 0.0, dy: speed }),
            _ => None,
        }
    }

    /// Finger down: start a drag, or restart from the hot-zone after game over
    pub fn touch_start(&mut self, pos: Vec2, state: &GameState) -> Option<Command> {
        self.touch_origin = Some(pos);

        let in_restart_zone = pos.x > state.settings.field_width - RESTART_ZONE_WIDTH
            && pos.y < RESTART_ZONE_HEIGHT;
        (state.is_over() && in_restart_zone).then_some(Command::Restart)
    }

    /// Finger moved: one speed step along whichever axis moved more
    pub fn touch_move(&mut self, pos: Vec2, state: &GameState) -> Option<Command> {
        let origin = self.touch_origin.replace(pos)?;
        let delta = pos - origin;
        let speed = state.player.speed;

        if delta.x.abs() > delta.y.abs() {
            Some(Command::Move {
                dx: speed * delta.x.signum(),
                dy: 0.0,
            })
        } else if delta.y != 0.0 {
            Some(Command::Move {
                dx: 0.0,
                dy: speed * delta.y.signum(),
            })
        } else {
            None
        }
    }

    /// Finger lifted: a tap on the player fires
    pub fn touch_end(&mut self, pos: Vec2, state: &GameState) -> Option<Command> {
        self.touch_origin = None;
        (!state.is_over() && state.player.rect().contains(pos)).then_some(Command::Fire)
    }

    /// The restart control was activated
    pub fn restart_clicked(&self) -> Command {
        Command::Restart
    }
}
