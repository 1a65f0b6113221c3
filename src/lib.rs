//! Side Shooter - a canvas side-scrolling shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, level progression, power-ups)
//! - `game`: The frame loop instance the host drives
//! - `render`: Drawing onto an abstract 2D surface
//! - `input`: Keyboard/touch translation into game commands
//! - `audio`: Background music handle
//! - `platform`: Browser glue (canvas, clock, DOM)
//! - `settings`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::{FrameStatus, Game};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player square edge (pixels)
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Player spawn x
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    /// Player spawn y is `field_height / 2 - PLAYER_SPAWN_Y_OFFSET`
    pub const PLAYER_SPAWN_Y_OFFSET: f32 = 20.0;

    /// Bullet dimensions
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 5.0;
    /// Bullet spawns this far above the player's vertical center
    pub const BULLET_MUZZLE_OFFSET: f32 = 2.0;

    /// Obstacle square edge
    pub const OBSTACLE_SIZE: f32 = 50.0;

    /// Power-up square edge
    pub const POWER_UP_SIZE: f32 = 20.0;

    /// Restart hot-zone: a tap with `x > width - RESTART_ZONE_WIDTH`
    /// and `y < RESTART_ZONE_HEIGHT` restarts a finished run
    pub const RESTART_ZONE_WIDTH: f32 = 110.0;
    pub const RESTART_ZONE_HEIGHT: f32 = 50.0;

    /// HUD font
    pub const HUD_FONT: &str = "20px Arial";
}
