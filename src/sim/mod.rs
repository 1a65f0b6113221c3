//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Time comes in as a millisecond timestamp from the host
//! - Randomness comes from the seeded RNG owned by `GameState`

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    Bullet, GameEvent, GamePhase, GameState, Obstacle, Player, PowerUp, PowerUpKind,
};
pub use tick::{fire, move_player, tick};
