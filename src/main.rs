//! Side Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlAudioElement, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use side_shooter::audio::AudioElementMusic;
    use side_shooter::input::{Command, InputAdapter};
    use side_shooter::platform::web::{CanvasSurface, now_ms, set_hidden};
    use side_shooter::{FrameStatus, Game, Settings};

    const CANVAS_ID: &str = "gameCanvas";
    const MUSIC_ID: &str = "bgMusic";
    const RESTART_ID: &str = "restartButton";

    /// Everything the event handlers and the frame loop share
    struct App {
        game: Game<AudioElementMusic>,
        surface: CanvasSurface,
        input: InputAdapter,
        document: Document,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Side Shooter starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let surface = CanvasSurface::new(canvas, settings.field_width, settings.field_height)?;

        let audio: HtmlAudioElement = document
            .get_element_by_id(MUSIC_ID)
            .ok_or_else(|| JsValue::from_str("no music element"))?
            .dyn_into()?;
        let music = AudioElementMusic::new(audio, settings.music_volume);

        let seed = now_ms() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(settings, seed, music),
            surface,
            input: InputAdapter::new(),
            document,
        }));

        setup_keyboard(app.clone())?;
        setup_touch(app.clone())?;
        setup_restart_button(app.clone())?;

        restart(&app);
        log::info!("Side Shooter running!");
        Ok(())
    }

    /// Start a new run; kick off the frame loop if it had stopped
    fn restart(app: &Rc<RefCell<App>>) {
        let start = {
            let mut a = app.borrow_mut();
            let start = a.game.reset();
            set_hidden(&a.document, RESTART_ID, true);
            start
        };
        if start {
            request_animation_frame(app.clone());
        }
    }

    fn dispatch(app: &Rc<RefCell<App>>, command: Option<Command>) {
        match command {
            Some(Command::Restart) => restart(app),
            Some(command) => {
                app.borrow_mut().game.apply(command, now_ms());
            }
            None => {}
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let command = {
                let a = app.borrow();
                a.input.key_down(&event.key(), a.game.state())
            };
            dispatch(&app, command);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_touch(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let canvas = app.borrow().surface.canvas().clone();

        // Touch start (drag origin, restart hot-zone)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let command = {
                    let mut a = app.borrow_mut();
                    let pos = a.surface.to_canvas(touch.client_x(), touch.client_y());
                    let App { game, input, .. } = &mut *a;
                    input.touch_start(pos, game.state())
                };
                dispatch(&app, command);
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move (drag)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let command = {
                    let mut a = app.borrow_mut();
                    let pos = a.surface.to_canvas(touch.client_x(), touch.client_y());
                    let App { game, input, .. } = &mut *a;
                    input.touch_move(pos, game.state())
                };
                dispatch(&app, command);
            });
            canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end (tap on the player fires)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let command = {
                    let mut a = app.borrow_mut();
                    let pos = a.surface.to_canvas(touch.client_x(), touch.client_y());
                    let App { game, input, .. } = &mut *a;
                    input.touch_end(pos, game.state())
                };
                dispatch(&app, command);
            });
            canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(btn) = app.borrow().document.get_element_by_id(RESTART_ID) else {
            log::warn!("No restart button - touch restart only");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let command = app.borrow().input.restart_clicked();
            dispatch(&app, Some(command));
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window - frame loop stopped");
            app.borrow_mut().game.halt();
            return;
        };
        let loop_app = app.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(loop_app);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?} - frame loop stopped", e);
            app.borrow_mut().game.halt();
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let status = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            let status = a.game.frame(now_ms(), &mut a.surface);
            if status == FrameStatus::Stop {
                set_hidden(&a.document, RESTART_ID, false);
            }
            status
        };

        if status == FrameStatus::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Frames simulated by the native headless run (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use side_shooter::audio::SilentMusic;
    use side_shooter::render::DrawLog;
    use side_shooter::{FrameStatus, Game, Settings};

    env_logger::init();
    log::info!("Side Shooter (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build to play");

    let settings = Settings::load();
    let mut surface = DrawLog::new(settings.field_width, settings.field_height);
    let mut game = Game::new(settings, 2024, SilentMusic::new());
    game.reset();

    let frame_ms = 1000.0 / 60.0;
    let mut frames = 0;
    while frames < HEADLESS_FRAMES {
        let now = frames as f64 * frame_ms;
        game.on_fire(now);
        surface.clear();
        frames += 1;
        if game.frame(now, &mut surface) == FrameStatus::Stop {
            break;
        }
    }

    let state = game.state();
    println!(
        "Headless run: {} frames, score {}, level {}, health {}, game over: {}",
        frames,
        state.score,
        state.level,
        state.player.health,
        state.is_over()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
