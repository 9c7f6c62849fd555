// Browser smoke test, run with `wasm-pack test --headless --firefox`.
// Compiled only for wasm32; natively this file is empty.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_game_creates_canvas_and_score() {
    blockfall::start_game().expect("game should start");
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("viewport").is_some());
    let score = doc.get_element_by_id("score").unwrap();
    assert_eq!(score.text_content().as_deref(), Some("0"));
}

#[wasm_bindgen_test]
fn start_game_twice_restarts() {
    blockfall::start_game().unwrap();
    blockfall::start_game().unwrap();
}
