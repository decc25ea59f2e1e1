// WASM API Browser Test
//
// Drives the JavaScript-facing API through the WASM-owned song store.
// These run in a browser via `wasm-pack test --headless`; the native test
// suite covers the same logic through the core modules directly.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use uketab_wasm::api;

wasm_bindgen_test_configure!(run_in_browser);

fn demo_song() -> JsValue {
    let song = serde_json::json!({
        "tempo": 120,
        "meter": { "beatsPerMeasure": 4, "beatUnit": 4 },
        "key": "C Major",
        "notes": [
            { "id": "m1", "pitch": "C5", "startTime": 0.0, "duration": 1.0 }
        ],
        "chords": [
            { "id": "c1", "roman": "I", "startTime": 0.0, "duration": 4.0 }
        ]
    });
    serde_wasm_bindgen::to_value(&song).unwrap()
}

#[wasm_bindgen_test]
fn load_and_read_back() {
    api::load_song(demo_song()).unwrap();
    let song = api::get_song().unwrap();
    assert!(!song.is_null());
}

#[wasm_bindgen_test]
fn tablature_events_flow() {
    api::load_song(demo_song()).unwrap();
    let events = api::get_tablature_events().unwrap();
    assert!(!events.is_null());
}

#[wasm_bindgen_test]
fn rondel_options_include_sentinel() {
    api::load_song(demo_song()).unwrap();
    let options = api::get_rondel_options(0.0, 2).unwrap();
    assert!(options.length() >= 1);
}
