//! Ukulele Tablature Engine WASM Module
//!
//! Computational core for the piano-roll/ukulele-tablature composer: pitch
//! and key theory, the fixed reentrant fretboard model, the automatic
//! chord-voicing engine, the rondel override layer, and the flattened
//! playback event list. The browser host supplies melody notes, chords, and
//! a key, and consumes string/fret assignments; rendering, audio, and
//! persistence live on the JavaScript side.

pub mod api;
pub mod fretboard;
pub mod models;
pub mod tablature;
pub mod theory;
pub mod voicing;

// Re-export commonly used types
pub use fretboard::FretPosition;
pub use models::{Beat, Chord, MelodyNote, Meter, NoteName, Pitch, RomanNumeral, Song};
pub use tablature::TabEvent;
pub use theory::Key;
pub use voicing::VoicedNote;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Ukulele tablature engine WASM module initialized");
}
