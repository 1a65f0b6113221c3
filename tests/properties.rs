//! Property tests for the simulation invariants

use proptest::prelude::*;

use side_shooter::Settings;
use side_shooter::sim::{GameEvent, GamePhase, GameState, Rect, fire, move_player, tick};

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Clone)]
enum Action {
    Idle,
    Fire,
    Move(f32, f32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Idle),
        Just(Action::Fire),
        (-5i32..=5, -5i32..=5).prop_map(|(dx, dy)| Action::Move(dx as f32 * 5.0, dy as f32 * 5.0)),
    ]
}

fn rect() -> impl Strategy<Value = Rect> {
    (-100.0f32..900.0, -100.0f32..700.0, 1.0f32..80.0, 1.0f32..80.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

/// Busy settings so power-ups actually show up in short runs
fn settings() -> Settings {
    Settings {
        power_up_chance: 0.2,
        ..Default::default()
    }
}

fn apply(state: &mut GameState, action: &Action, now: f64) {
    match action {
        Action::Idle => {}
        Action::Fire => {
            fire(state, now);
        }
        Action::Move(dx, dy) => move_player(state, *dx, *dy),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn overlap_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn stats_stay_in_range(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..600)) {
        let mut state = GameState::new(settings(), seed);
        for (frame, action) in actions.iter().enumerate() {
            let now = frame as f64 * FRAME_MS;
            apply(&mut state, action, now);
            tick(&mut state, now);

            prop_assert!(state.player.health <= state.settings.max_health);
            prop_assert!(state.bullet_speed >= state.settings.initial_bullet_speed);
            prop_assert!(state.bullet_speed <= state.settings.max_bullet_speed);
            prop_assert!(state.player.pos.x >= 0.0 && state.player.pos.y >= 0.0);
            prop_assert!(state.player.pos.x <= state.settings.field_width - 20.0);
            prop_assert!(state.player.pos.y <= state.settings.field_height - 20.0);
            if state.phase == GamePhase::GameOver {
                prop_assert_eq!(state.player.health, 0);
            }
        }
    }

    #[test]
    fn power_ups_capped_and_short_lived(seed in any::<u64>(), frames in 1usize..2000) {
        let mut state = GameState::new(settings(), seed);
        // Step in big increments so lifetimes actually run out
        let step = 250.0;
        for frame in 0..frames {
            let now = frame as f64 * step;
            tick(&mut state, now);
            if state.is_over() {
                break;
            }

            prop_assert!(state.power_ups.len() <= 3);
            for p in &state.power_ups {
                prop_assert!(now - p.spawn_time_ms < state.settings.power_up_lifetime_ms);
            }
        }
    }

    #[test]
    fn batches_match_level(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..600)) {
        let mut state = GameState::new(settings(), seed);
        prop_assert_eq!(state.obstacles.len(), 4);

        for (frame, action) in actions.iter().enumerate() {
            let now = frame as f64 * FRAME_MS;
            apply(&mut state, action, now);
            let events = tick(&mut state, now);

            for event in events {
                if let GameEvent::LevelUp { level, cleared } = event {
                    // A cleared field spawns for the new level, a hit for the old one
                    let spawn_level = if cleared { level } else { level - 1 };
                    prop_assert_eq!(state.obstacles.len(), (spawn_level + 3) as usize);
                }
            }
        }
    }

    #[test]
    fn reset_is_idempotent(seed in any::<u64>(), actions in prop::collection::vec(action(), 0..300)) {
        let mut state = GameState::new(settings(), seed);
        for (frame, action) in actions.iter().enumerate() {
            let now = frame as f64 * FRAME_MS;
            apply(&mut state, action, now);
            tick(&mut state, now);
        }

        state.reset();
        let once = (state.score, state.level, state.player.health, state.bullet_speed, state.phase, state.player.pos, state.obstacles.len());
        state.reset();
        let twice = (state.score, state.level, state.player.health, state.bullet_speed, state.phase, state.player.pos, state.obstacles.len());

        prop_assert_eq!(once, twice);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.level, 1);
        prop_assert_eq!(state.player.health, 3);
        prop_assert_eq!(state.bullet_speed, 5.0);
        prop_assert_eq!(state.phase, GamePhase::Playing);
        prop_assert!(state.bullets.is_empty());
        prop_assert!(state.power_ups.is_empty());
        prop_assert_eq!(state.obstacles.len(), 4);
    }
}
