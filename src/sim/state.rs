//! Game state and core simulation types
//!
//! One `GameState` owns every entity collection for a run. The host only
//! reads it (rendering) or goes through `sim::tick` operations to change it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health ran out; terminal until reset
    GameOver,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A bullet destroyed `count` obstacles at once
    ObstaclesDestroyed { count: u32, points: u64 },
    /// The player touched an obstacle and has `health` left
    PlayerHit { health: u8 },
    /// Level advanced; `cleared` is true when every obstacle was shot down
    LevelUp { level: u32, cleared: bool },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    PowerUpSpawned(PowerUpKind),
    /// Run ended
    GameOver { score: u64, level: u32 },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Pixels moved per movement input
    pub speed: f32,
    pub health: u8,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Where a new bullet appears: right edge, vertically centered
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + PLAYER_SIZE,
            self.pos.y + PLAYER_SIZE / 2.0 - BULLET_MUZZLE_OFFSET,
        )
    }
}

/// A player projectile, always travelling right
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// A block bouncing horizontally across the field
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Horizontal velocity (pixels/frame), sign flips at the field bounds
    pub dx: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, OBSTACLE_SIZE, OBSTACLE_SIZE)
    }

    /// Move one step and bounce off either horizontal bound.
    ///
    /// The position is not clamped, so the block may poke past the bound
    /// by up to one step before heading back.
    pub fn advance(&mut self, field_width: f32) {
        self.pos.x += self.dx;
        if self.pos.x <= 0.0 || self.pos.x + OBSTACLE_SIZE >= field_width {
            self.dx = -self.dx;
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Faster bullets
    Speed,
    /// One extra health point
    Health,
}

/// A transient pickup
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Host timestamp (ms) at spawn
    pub spawn_time_ms: f64,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }

    pub fn is_expired(&self, now_ms: f64, lifetime_ms: f64) -> bool {
        now_ms - self.spawn_time_ms >= lifetime_ms
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance settings this run was started with
    pub settings: Settings,
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    /// Current level (starts at 1)
    pub level: u32,
    /// Current bullet speed (pixels/frame)
    pub bullet_speed: f32,
    pub phase: GamePhase,
    /// Earliest host timestamp at which the next shot may be fired
    pub fire_ready_at_ms: f64,
}

impl GameState {
    /// Create a fresh run with the level-1 obstacle batch in place
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut state = Self {
            player: Player {
                pos: Vec2::ZERO,
                speed: settings.player_speed,
                health: settings.initial_health,
            },
            bullet_speed: settings.initial_bullet_speed,
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bullets: Vec::new(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            level: 1,
            phase: GamePhase::Playing,
            fire_ready_at_ms: 0.0,
        };
        state.reset();
        state
    }

    /// Reinitialize the run to its starting values and spawn level 1.
    ///
    /// The RNG keeps its stream, so obstacle positions differ between runs.
    pub fn reset(&mut self) {
        self.player.health = self.settings.initial_health;
        self.player.speed = self.settings.player_speed;
        self.respawn_player();

        self.bullets.clear();
        self.power_ups.clear();
        self.obstacles.clear();
        self.score = 0;
        self.level = 1;
        self.bullet_speed = self.settings.initial_bullet_speed;
        self.phase = GamePhase::Playing;
        self.fire_ready_at_ms = 0.0;

        self.spawn_obstacles();
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Player spawn point (left side, vertically centered)
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(
            PLAYER_SPAWN_X,
            self.settings.field_height / 2.0 - PLAYER_SPAWN_Y_OFFSET,
        )
    }

    pub fn respawn_player(&mut self) {
        self.player.pos = self.player_spawn();
    }

    /// Number of obstacles a batch for the current level contains
    pub fn batch_size(&self) -> usize {
        self.level.saturating_add(self.settings.obstacles_base_count) as usize
    }

    /// Append a batch of obstacles sized and paced for the current level
    pub fn spawn_obstacles(&mut self) {
        let count = self.batch_size();
        let dx = self.settings.obstacle_base_speed + self.level as f32;
        let max_x = self.settings.field_width - OBSTACLE_SIZE;
        let max_y = self.settings.field_height - OBSTACLE_SIZE;

        self.obstacles.reserve(count);
        for _ in 0..count {
            let x = self.rng.random::<f32>() * max_x;
            let y = self.rng.random::<f32>() * max_y;
            self.obstacles.push(Obstacle {
                pos: Vec2::new(x, y),
                dx,
            });
        }
        log::debug!("Level {}: spawned {} obstacles (dx={})", self.level, count, dx);
    }

    /// Per-frame power-up roll: succeeds with the configured probability
    pub fn roll_power_up(&mut self) -> bool {
        self.rng.random_bool(self.settings.power_up_chance)
    }

    /// Spawn one power-up of a random kind at a random in-bounds position
    pub fn spawn_power_up(&mut self, now_ms: f64) -> PowerUpKind {
        let x = self.rng.random::<f32>() * (self.settings.field_width - POWER_UP_SIZE);
        let y = self.rng.random::<f32>() * (self.settings.field_height - POWER_UP_SIZE);
        let kind = if self.rng.random_bool(0.5) {
            PowerUpKind::Speed
        } else {
            PowerUpKind::Health
        };

        self.power_ups.push(PowerUp {
            pos: Vec2::new(x, y),
            kind,
            spawn_time_ms: now_ms,
        });
        log::debug!("Spawned {:?} power-up at ({:.0}, {:.0})", kind, x, y);
        kind
    }

    /// Apply a collected power-up's one-shot effect
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Speed => {
                self.bullet_speed = (self.bullet_speed + self.settings.bullet_speed_boost)
                    .min(self.settings.max_bullet_speed);
                log::info!("Speed power-up collected (bullet speed {})", self.bullet_speed);
            }
            PowerUpKind::Health => {
                self.player.health = self.player.health.saturating_add(1).min(self.settings.max_health);
                log::info!("Health power-up collected (health {})", self.player.health);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Settings::default(), 12345)
    }

    #[test]
    fn test_new_state_defaults() {
        let s = state();
        assert_eq!(s.score, 0);
        assert_eq!(s.level, 1);
        assert_eq!(s.player.health, 3);
        assert_eq!(s.bullet_speed, 5.0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player.pos, Vec2::new(50.0, 280.0));
        assert!(s.bullets.is_empty());
        assert!(s.power_ups.is_empty());
        assert_eq!(s.obstacles.len(), 4);
    }

    #[test]
    fn test_obstacle_batch_in_bounds() {
        let mut s = state();
        s.level = 7;
        s.obstacles.clear();
        s.spawn_obstacles();
        assert_eq!(s.obstacles.len(), 10);
        for o in &s.obstacles {
            assert!(o.pos.x >= 0.0 && o.pos.x + OBSTACLE_SIZE <= 800.0);
            assert!(o.pos.y >= 0.0 && o.pos.y + OBSTACLE_SIZE <= 600.0);
            assert_eq!(o.dx, 9.0);
        }
    }

    #[test]
    fn test_obstacle_bounce() {
        // Field 400 wide, block starting at x=100 moving right at 3 px/frame
        let mut o = Obstacle {
            pos: Vec2::new(100.0, 100.0),
            dx: 3.0,
        };
        let mut frames = 0;
        while o.dx > 0.0 {
            o.advance(400.0);
            frames += 1;
            assert!(frames < 200, "obstacle never bounced");
        }
        assert!(o.pos.x + OBSTACLE_SIZE >= 400.0);
        // Overshoot is at most one step
        assert!(o.pos.x + OBSTACLE_SIZE < 400.0 + 3.0);
        assert_eq!(o.dx, -3.0);

        while o.dx < 0.0 {
            o.advance(400.0);
        }
        assert!(o.pos.x <= 0.0);
        assert_eq!(o.dx, 3.0);
    }

    #[test]
    fn test_power_up_effects_capped() {
        let mut s = state();
        s.player.health = 4;
        s.apply_power_up(PowerUpKind::Health);
        assert_eq!(s.player.health, 5);
        s.apply_power_up(PowerUpKind::Health);
        assert_eq!(s.player.health, 5);

        s.apply_power_up(PowerUpKind::Speed);
        assert_eq!(s.bullet_speed, 7.0);
        s.apply_power_up(PowerUpKind::Speed);
        assert_eq!(s.bullet_speed, 9.0);
        s.apply_power_up(PowerUpKind::Speed);
        assert_eq!(s.bullet_speed, 10.0);
    }

    #[test]
    fn test_health_power_up_at_type_max() {
        let settings = Settings::from_json(r#"{"max_health":255,"initial_health":255}"#).unwrap();
        let mut s = GameState::new(settings, 1);
        assert_eq!(s.player.health, 255);
        s.apply_power_up(PowerUpKind::Health);
        assert_eq!(s.player.health, 255);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_batch_size_saturates() {
        let mut s = state();
        s.level = u32::MAX;
        s.settings.obstacles_base_count = u32::MAX;
        assert_eq!(s.batch_size(), u32::MAX as usize);
    }

    #[test]
    fn test_power_up_expiry_boundary() {
        let p = PowerUp {
            pos: Vec2::ZERO,
            kind: PowerUpKind::Speed,
            spawn_time_ms: 1_000.0,
        };
        assert!(!p.is_expired(10_999.0, 10_000.0));
        assert!(p.is_expired(11_000.0, 10_000.0));
    }

    #[test]
    fn test_same_seed_same_batch() {
        let a = GameState::new(Settings::default(), 7);
        let b = GameState::new(Settings::default(), 7);
        assert_eq!(a.obstacles, b.obstacles);
    }
}
