//! Game balance settings
//!
//! Read once at start-up from an inline JSON block (web) or a JSON file
//! (native). Every key is optional; missing keys keep their defaults.
//! Nothing is written back.

use serde::{Deserialize, Serialize};

/// Tunable game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    /// Drawing area width (pixels)
    pub field_width: f32,
    /// Drawing area height (pixels)
    pub field_height: f32,

    // === Player ===
    /// Pixels moved per movement input
    pub player_speed: f32,
    /// Health at the start of a run
    pub initial_health: u8,
    /// Health cap
    pub max_health: u8,

    // === Bullets ===
    /// Bullet speed at the start of a run (pixels/frame)
    pub initial_bullet_speed: f32,
    /// Bullet speed cap
    pub max_bullet_speed: f32,
    /// Bullet speed gained per speed power-up
    pub bullet_speed_boost: f32,
    /// Minimum time between two shots
    pub fire_cooldown_ms: f64,

    // === Obstacles ===
    /// Batch size is `level + obstacles_base_count`
    pub obstacles_base_count: u32,
    /// Obstacle speed is `level + obstacle_base_speed`
    pub obstacle_base_speed: f32,
    /// Score per destroyed obstacle
    pub score_per_obstacle: u64,

    // === Power-ups ===
    /// Per-frame spawn probability
    pub power_up_chance: f64,
    /// Maximum power-ups on screen
    pub max_power_ups: usize,
    /// Lifetime of an uncollected power-up
    pub power_up_lifetime_ms: f64,

    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_speed: 5.0,
            initial_health: 3,
            max_health: 5,

            initial_bullet_speed: 5.0,
            max_bullet_speed: 10.0,
            bullet_speed_boost: 2.0,
            fire_cooldown_ms: 500.0,

            obstacles_base_count: 3,
            obstacle_base_speed: 2.0,
            score_per_obstacle: 10,

            power_up_chance: 0.01,
            max_power_ups: 3,
            power_up_lifetime_ms: 10_000.0,

            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (partial documents allowed)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let min_field = crate::consts::OBSTACLE_SIZE * 2.0;
        self.field_width = self.field_width.max(min_field);
        self.field_height = self.field_height.max(min_field);
        self.player_speed = self.player_speed.max(0.0);
        self.max_health = self.max_health.max(1);
        self.initial_health = self.initial_health.clamp(1, self.max_health);
        self.obstacles_base_count = self.obstacles_base_count.min(Self::MAX_OBSTACLES_BASE_COUNT);
        self.initial_bullet_speed = self.initial_bullet_speed.max(0.0);
        self.max_bullet_speed = self.max_bullet_speed.max(self.initial_bullet_speed);
        self.bullet_speed_boost = self.bullet_speed_boost.max(0.0);
        self.fire_cooldown_ms = self.fire_cooldown_ms.max(0.0);
        self.power_up_chance = self.power_up_chance.clamp(0.0, 1.0);
        self.power_up_lifetime_ms = self.power_up_lifetime_ms.max(0.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Ceiling for `obstacles_base_count`
    pub const MAX_OBSTACLES_BASE_COUNT: u32 = 100;

    /// Element holding the inline JSON config
    #[allow(dead_code)]
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Environment variable naming a JSON config file
    #[allow(dead_code)]
    const CONFIG_ENV: &'static str = "SIDE_SHOOTER_CONFIG";

    /// Load settings from the page's inline config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::parse_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `SIDE_SHOOTER_CONFIG` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::CONFIG_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read config {}: {} - using defaults", path, e);
                Self::default()
            }
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({}) - using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "field_width": 400 }"#).unwrap();
        assert_eq!(settings.field_width, 400.0);
        assert_eq!(settings.field_height, 600.0);
        assert_eq!(settings.max_power_ups, 3);
        assert_eq!(settings.fire_cooldown_ms, 500.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert_eq!(Settings::parse_or_default("42"), Settings::default());
    }

    #[test]
    fn test_huge_obstacle_count_is_clamped() {
        let settings = Settings::from_json(r#"{"obstacles_base_count":4294967295}"#).unwrap();
        assert_eq!(settings.obstacles_base_count, Settings::MAX_OBSTACLES_BASE_COUNT);

        let state = crate::sim::GameState::new(settings, 1);
        assert_eq!(state.obstacles.len(), 1 + Settings::MAX_OBSTACLES_BASE_COUNT as usize);
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = Settings {
            initial_health: 9,
            max_health: 5,
            initial_bullet_speed: 12.0,
            max_bullet_speed: 10.0,
            power_up_chance: 3.0,
            field_width: 10.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.initial_health, 5);
        assert_eq!(settings.max_bullet_speed, 12.0);
        assert_eq!(settings.power_up_chance, 1.0);
        assert_eq!(settings.field_width, 100.0);
    }
}
