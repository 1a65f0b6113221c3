//! Frame rendering onto a 2D drawing surface
//!
//! The simulation never draws. Each frame the game hands its state to
//! [`draw`], which paints everything through the [`RenderSurface`] trait:
//! a canvas on the web, a [`DrawLog`] in tests and headless runs.

use glam::Vec2;

use crate::consts::HUD_FONT;
use crate::sim::{GameState, PowerUpKind, Rect};

/// Fill colors used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Black,
}

impl Color {
    /// CSS color name
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Black => "black",
        }
    }
}

/// A fixed-size 2D drawing area. Drawing always succeeds.
pub trait RenderSurface {
    /// Drawing area size in pixels
    fn size(&self) -> Vec2;
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw text with its baseline-left corner at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color, font: &str);
}

/// Player, bullet, obstacle colors
pub const PLAYER_COLOR: Color = Color::Blue;
pub const BULLET_COLOR: Color = Color::Red;
pub const OBSTACLE_COLOR: Color = Color::Green;
pub const TEXT_COLOR: Color = Color::Black;

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Speed => Color::Yellow,
        PowerUpKind::Health => Color::Purple,
    }
}

/// Paint one frame: entities, then the HUD, then the game-over overlay
pub fn draw(state: &GameState, surface: &mut dyn RenderSurface) {
    let size = surface.size();
    surface.clear_rect(Rect::new(0.0, 0.0, size.x, size.y));

    surface.fill_rect(state.player.rect(), PLAYER_COLOR);
    for bullet in &state.bullets {
        surface.fill_rect(bullet.rect(), BULLET_COLOR);
    }
    for obstacle in &state.obstacles {
        surface.fill_rect(obstacle.rect(), OBSTACLE_COLOR);
    }
    for power_up in &state.power_ups {
        surface.fill_rect(power_up.rect(), power_up_color(power_up.kind));
    }

    draw_hud(state, surface);
}

fn draw_hud(state: &GameState, surface: &mut dyn RenderSurface) {
    let w = state.settings.field_width;
    let h = state.settings.field_height;

    let mut text = |s: &str, x: f32, y: f32| {
        surface.fill_text(s, Vec2::new(x, y), TEXT_COLOR, HUD_FONT);
    };

    text(&format!("Score: {}", state.score), 10.0, 20.0);
    text(&format!("Health: {}", state.player.health), w - 100.0, 20.0);
    text(&format!("Level: {}", state.level), w / 2.0 - 50.0, 20.0);

    if state.is_over() {
        text("Game Over!", w / 2.0 - 100.0, h / 2.0 - 20.0);
        text("Tap Restart to Play Again", w / 2.0 - 130.0, h / 2.0 + 20.0);
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Fill(Rect, Color),
    Text(String, Vec2),
}

/// A surface that records drawing calls instead of painting.
///
/// Used for headless runs and tests.
#[derive(Debug, Clone)]
pub struct DrawLog {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl DrawLog {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Forget everything drawn so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of rectangles filled with `color`
    pub fn fills_with(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill(_, fill) if *fill == color))
            .count()
    }
}

impl RenderSurface for DrawLog {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill(rect, color));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, _color: Color, _font: &str) {
        self.commands.push(DrawCommand::Text(text.to_string(), pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Bullet, GamePhase, PowerUp};

    #[test]
    fn test_draw_entities_and_hud() {
        let mut state = GameState::new(Settings::default(), 3);
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 100.0),
        });
        state.power_ups.push(PowerUp {
            pos: Vec2::new(200.0, 200.0),
            kind: PowerUpKind::Health,
            spawn_time_ms: 0.0,
        });
        state.score = 40;

        let mut log = DrawLog::new(800.0, 600.0);
        draw(&state, &mut log);

        assert_eq!(
            log.commands[0],
            DrawCommand::Clear(Rect::new(0.0, 0.0, 800.0, 600.0))
        );
        assert_eq!(log.fills_with(PLAYER_COLOR), 1);
        assert_eq!(log.fills_with(BULLET_COLOR), 1);
        assert_eq!(log.fills_with(OBSTACLE_COLOR), 4);
        assert_eq!(log.fills_with(Color::Purple), 1);
        assert_eq!(log.texts(), vec!["Score: 40", "Health: 3", "Level: 1"]);
        assert!(log.commands.contains(&DrawCommand::Text(
            "Health: 3".to_string(),
            Vec2::new(700.0, 20.0)
        )));
    }

    #[test]
    fn test_draw_game_over_overlay() {
        let mut state = GameState::new(Settings::default(), 3);
        state.phase = GamePhase::GameOver;

        let mut log = DrawLog::new(800.0, 600.0);
        draw(&state, &mut log);

        let texts = log.texts();
        assert_eq!(texts[3], "Game Over!");
        assert_eq!(texts[4], "Tap Restart to Play Again");
        assert!(log.commands.contains(&DrawCommand::Text(
            "Game Over!".to_string(),
            Vec2::new(300.0, 280.0)
        )));
    }
}
