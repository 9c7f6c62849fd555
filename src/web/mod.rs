//! Browser shell around the board engine.
//!
//! Finds (or creates) the canvas and score elements, wires the `keydown`
//! listener and runs the `requestAnimationFrame` loop. All state lives in one
//! thread-local so the event callbacks and the frame loop share it; each
//! callback borrows it for the duration of a single engine call plus redraw.

use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window, window};

mod audio;
mod render;

use crate::config::GameConfig;
use crate::engine::{BoardEngine, BoardEvent, rng};
use crate::input::command_for_key;
use audio::Sounds;
use render::Renderer;

struct GameState {
    engine: BoardEngine,
    renderer: Renderer,
    sounds: Sounds,
    score_el: Element,
    shown_score: Option<u64>,
    last_frame_ms: Option<f64>,
}

impl GameState {
    /// Forward queued engine events to audio and refresh the score text.
    fn flush_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                BoardEvent::PieceLocked => self.sounds.play_drop(),
                BoardEvent::RowsCleared { rows, points } => {
                    debug!("{} rows cleared (+{})", rows, points);
                    self.sounds.play_clear();
                }
                BoardEvent::Overflow => info!("board full, starting over"),
            }
        }
        let score = self.engine.score();
        if self.shown_score != Some(score) {
            self.score_el.set_text_content(Some(&score.to_string()));
            self.shown_score = Some(score);
        }
    }

    fn frame(&mut self, now: f64) {
        let delta = self.last_frame_ms.map(|last| now - last).unwrap_or(0.0);
        self.last_frame_ms = Some(now);
        self.engine.tick(delta);
        self.flush_events();
        self.renderer.draw(&self.engine);
    }
}

// Shared by the frame loop and the key listener; `None` until `start` runs.
thread_local! {
    static GAME_STATE: std::cell::RefCell<Option<GameState>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Build the game and start the loop. Calling it again restarts the game on
/// the already running loop and listener.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let mut config = config.normalized();
    crate::logging::init(config.log_filter());

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    config.seed = config
        .seed
        .or_else(rng::entropy_seed)
        .or_else(|| Some(time_seed(&win)));

    let canvas = ensure_canvas(&doc, &config)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let score_el = ensure_score(&doc, &config)?;

    let engine = BoardEngine::new(&config);
    let renderer = Renderer::new(ctx, config.cell_size, config.width, config.height)?;
    let sounds = Sounds::load(&config.sounds_path, config.music_volume)?;

    let mut state = GameState {
        engine,
        renderer,
        sounds,
        score_el,
        shown_score: None,
        last_frame_ms: None,
    };
    state.flush_events();
    state.renderer.draw(&state.engine);

    let already_running = GAME_STATE.with(|cell| cell.replace(Some(state)).is_some());
    if already_running {
        info!("game restarted");
        return Ok(());
    }

    install_keyboard(&doc)?;
    start_game_loop();
    info!(
        "blockfall started: {}x{} grid, drop every {}ms",
        config.width, config.height, config.drop_interval_ms
    );
    Ok(())
}

fn time_seed(win: &Window) -> u64 {
    win.performance()
        .map(|p| (p.now() * 1000.0) as u64)
        .unwrap_or(0)
}

fn ensure_canvas(doc: &Document, config: &GameConfig) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(&config.canvas_id) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(&config.canvas_id);
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas.set_width((config.width as f64 * config.cell_size) as u32);
    canvas.set_height((config.height as f64 * config.cell_size) as u32);
    Ok(canvas)
}

fn ensure_score(doc: &Document, config: &GameConfig) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(&config.score_id) {
        return Ok(el);
    }
    let div = doc.create_element("div")?;
    div.set_id(&config.score_id);
    div.set_attribute(
        "style",
        "font-family:'Fira Code', monospace; font-size:20px; color:#ffd166;",
    )?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&div)?;
    Ok(div)
}

fn install_keyboard(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        GAME_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                state.sounds.start_music();
                if let Some(command) = command_for_key(&evt.key()) {
                    evt.prevent_default();
                    state.engine.apply(command);
                    state.flush_events();
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn start_game_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                state.frame(ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
