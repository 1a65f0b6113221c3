//! Background music
//!
//! The game only starts and stops one looping track. Both calls are
//! fire-and-forget: a browser refusing to play is logged, never surfaced.

/// A background track the game can start and stop
pub trait BackgroundMusic {
    fn play(&mut self);
    fn pause(&mut self);
}

/// Music handle for headless runs and tests: plays nothing, remembers state
#[derive(Debug, Clone, Default)]
pub struct SilentMusic {
    playing: bool,
}

impl SilentMusic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl BackgroundMusic for SilentMusic {
    fn play(&mut self) {
        self.playing = true;
        log::debug!("Music: play");
    }

    fn pause(&mut self) {
        self.playing = false;
        log::debug!("Music: pause");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioElementMusic;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::BackgroundMusic;

    /// Plays an `<audio>` element from the page
    pub struct AudioElementMusic {
        element: HtmlAudioElement,
    }

    impl AudioElementMusic {
        pub fn new(element: HtmlAudioElement, volume: f32) -> Self {
            element.set_loop(true);
            element.set_volume(volume.clamp(0.0, 1.0) as f64);
            Self { element }
        }
    }

    impl BackgroundMusic for AudioElementMusic {
        fn play(&mut self) {
            // The returned promise rejects until the page has seen a user
            // gesture; the next reset retries.
            if let Err(e) = self.element.play() {
                log::warn!("Music play failed: {:?}", e);
            }
        }

        fn pause(&mut self) {
            if let Err(e) = self.element.pause() {
                log::warn!("Music pause failed: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_music_tracks_state() {
        let mut music = SilentMusic::new();
        assert!(!music.is_playing());
        music.play();
        assert!(music.is_playing());
        music.pause();
        assert!(!music.is_playing());
    }
}
