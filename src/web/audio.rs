//! Background music and sound effects through `<audio>` elements.
//!
//! Playback is fire-and-forget: a failure (missing file, autoplay blocked) is
//! logged and the game carries on. `play()` reports most failures by
//! rejecting its promise, so every track keeps a rejection handler around.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

const MUSIC: &str = "music.mp3";
const DROP: &str = "snare.wav";
const CLEAR: &str = "clear.mp3";

pub fn asset_url(base: &str, file: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", base, file)
    }
}

struct Track {
    name: &'static str,
    el: HtmlAudioElement,
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl Track {
    fn load(base: &str, name: &'static str) -> Result<Self, JsValue> {
        let el = HtmlAudioElement::new_with_src(&asset_url(base, name))?;
        let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
            warn!("could not play {}: {:?}", name, err);
        }) as Box<dyn FnMut(JsValue)>);
        Ok(Self { name, el, on_reject })
    }

    /// Start playback. Returns false when `play()` threw synchronously.
    fn play(&self) -> bool {
        match self.el.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_reject);
                true
            }
            Err(err) => {
                warn!("could not play {}: {:?}", self.name, err);
                false
            }
        }
    }

    fn restart(&self) -> bool {
        self.el.set_current_time(0.0);
        self.play()
    }
}

pub struct Sounds {
    music: Track,
    drop: Track,
    clear: Track,
    music_started: bool,
}

impl Sounds {
    pub fn load(base: &str, music_volume: f64) -> Result<Self, JsValue> {
        let music = Track::load(base, MUSIC)?;
        music.el.set_loop(true);
        music.el.set_volume(music_volume);
        Ok(Self {
            music,
            drop: Track::load(base, DROP)?,
            clear: Track::load(base, CLEAR)?,
            music_started: false,
        })
    }

    /// Browsers only allow playback after a user gesture, so the music is
    /// started from the first key press.
    pub fn start_music(&mut self) {
        if !self.music_started {
            self.music_started = true;
            self.music.play();
        }
    }

    pub fn play_drop(&self) {
        self.drop.restart();
    }

    pub fn play_clear(&self) {
        self.clear.restart();
    }
}
