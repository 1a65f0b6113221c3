//! Per-frame simulation tick
//!
//! Advances the run by one animation frame. Step order matters: scoring
//! happens before the empty-field level-up check, and pickups are resolved
//! before expiry and spawning.

use glam::Vec2;

use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::PLAYER_SIZE;

/// Advance the game state by one frame.
///
/// `now_ms` is the host clock, used only for power-up lifetimes.
/// Returns the events that happened, in order. Does nothing once the run
/// is over.
pub fn tick(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    let field_width = state.settings.field_width;

    // 1. Obstacles drift and bounce
    for obstacle in &mut state.obstacles {
        obstacle.advance(field_width);
    }

    // 2. Bullets fly right
    for bullet in &mut state.bullets {
        bullet.pos.x += state.bullet_speed;
    }

    // 3. Bullets vs obstacles. A hit removes the bullet and every obstacle
    //    it overlaps; a miss past the right edge just removes the bullet.
    let points_each = state.settings.score_per_obstacle;
    let mut surviving = Vec::with_capacity(state.bullets.len());
    for bullet in state.bullets.drain(..) {
        let rect = bullet.rect();
        let before = state.obstacles.len();
        state.obstacles.retain(|o| !rect.overlaps(&o.rect()));
        let count = (before - state.obstacles.len()) as u32;

        if count > 0 {
            let points = points_each * count as u64;
            state.score += points;
            events.push(GameEvent::ObstaclesDestroyed { count, points });
        } else if bullet.pos.x <= field_width {
            surviving.push(bullet);
        }
    }
    state.bullets = surviving;

    // 4. Player vs obstacles
    let player_rect = state.player.rect();
    let mut leveled_on_hit = false;
    if state.obstacles.iter().any(|o| player_rect.overlaps(&o.rect())) {
        state.player.health = state.player.health.saturating_sub(1);
        events.push(GameEvent::PlayerHit {
            health: state.player.health,
        });

        if state.player.health == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over: score {}, level {}", state.score, state.level);
            events.push(GameEvent::GameOver {
                score: state.score,
                level: state.level,
            });
            return events;
        }

        // Survived: back to spawn with a fresh field. The batch is sized
        // for the level *before* the increment.
        state.respawn_player();
        state.obstacles.clear();
        state.spawn_obstacles();
        state.level += 1;
        leveled_on_hit = true;
        log::info!("Hit! health {}, level {}", state.player.health, state.level);
        events.push(GameEvent::LevelUp {
            level: state.level,
            cleared: false,
        });
    }

    // 5. Field cleared by bullets: next level, batch sized for the new level
    if !leveled_on_hit && state.obstacles.is_empty() {
        state.level += 1;
        state.spawn_obstacles();
        log::info!("Field cleared, level {}", state.level);
        events.push(GameEvent::LevelUp {
            level: state.level,
            cleared: true,
        });
    }

    // 6. Pickups (the player may have just been sent back to spawn)
    let player_rect = state.player.rect();
    let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| player_rect.overlaps(&p.rect()));
    state.power_ups = remaining;
    for power_up in collected {
        state.apply_power_up(power_up.kind);
        events.push(GameEvent::PowerUpCollected(power_up.kind));
    }

    // 7. Expiry
    let lifetime = state.settings.power_up_lifetime_ms;
    let (expired, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| p.is_expired(now_ms, lifetime));
    state.power_ups = alive;
    for power_up in expired {
        log::debug!("{:?} power-up expired", power_up.kind);
        events.push(GameEvent::PowerUpExpired(power_up.kind));
    }

    // 8. Maybe spawn a new one
    if state.power_ups.len() < state.settings.max_power_ups && state.roll_power_up() {
        let kind = state.spawn_power_up(now_ms);
        events.push(GameEvent::PowerUpSpawned(kind));
    }

    events
}

/// Fire a bullet from the player's muzzle if the cooldown has elapsed.
///
/// Returns whether a bullet was fired.
pub fn fire(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase == GamePhase::GameOver || now_ms < state.fire_ready_at_ms {
        return false;
    }

    state.bullets.push(Bullet {
        pos: state.player.muzzle(),
    });
    state.fire_ready_at_ms = now_ms + state.settings.fire_cooldown_ms;
    true
}

/// Move the player by `(dx, dy)`, clamped to the play field.
///
/// The player is frozen once the run is over; `reset` puts it back at spawn.
pub fn move_player(state: &mut GameState, dx: f32, dy: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let max = Vec2::new(
        state.settings.field_width - PLAYER_SIZE,
        state.settings.field_height - PLAYER_SIZE,
    );
    state.player.pos = (state.player.pos + Vec2::new(dx, dy)).clamp(Vec2::ZERO, max);
}
