//! WASM API for the ukulele tablature engine
//!
//! This module provides the JavaScript-facing API over the WASM-owned song
//! store. All musical computation is delegated to the core modules; this
//! layer only deserializes arguments, locks the store, and serializes
//! results. Absorptive musical failures (unplayable pitch, no voicing)
//! come back as null/empty results; only malformed input returns `Err`.

use wasm_bindgen::prelude::*;

use lazy_static::lazy_static;
use std::sync::Mutex;

use crate::models::duration::{beat_from_float, Beat};
use crate::models::pitch::Pitch;
use crate::models::{Chord, MelodyNote, RomanNumeral, Song};
use crate::tablature::rondel::{apply_rondel_selection, rondel_options, RondelOption};
use crate::tablature::{compute_melody_position, tablature_events};
use crate::theory::{chord_info, note_grid, Key};
use crate::voicing::compute_chord_voicing;

// WASM-owned song storage (canonical source of truth)
lazy_static! {
    static ref SONG: Mutex<Option<Song>> = Mutex::new(None);
}

// Logging macros for WASM
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

macro_rules! wasm_info {
    ($($arg:tt)*) => {
        info(&format!("[WASM] {}", format!($($arg)*)))
    };
}

macro_rules! wasm_error {
    ($($arg:tt)*) => {
        error(&format!("[WASM] {}", format!($($arg)*)))
    };
}

fn js_err(msg: impl std::fmt::Display) -> JsValue {
    let msg = msg.to_string();
    wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

fn with_song<R>(f: impl FnOnce(&Song) -> Result<R, JsValue>) -> Result<R, JsValue> {
    let guard = SONG.lock().map_err(|_| JsValue::from_str("song store poisoned"))?;
    match guard.as_ref() {
        Some(song) => f(song),
        None => Err(JsValue::from_str("no song loaded")),
    }
}

fn with_song_mut<R>(f: impl FnOnce(&mut Song) -> Result<R, JsValue>) -> Result<R, JsValue> {
    let mut guard = SONG.lock().map_err(|_| JsValue::from_str("song store poisoned"))?;
    match guard.as_mut() {
        Some(song) => f(song),
        None => Err(JsValue::from_str("no song loaded")),
    }
}

fn parse_beat(value: f64, what: &str) -> Result<Beat, JsValue> {
    beat_from_float(value).ok_or_else(|| js_err(format!("invalid {what}: {value}")))
}

/// Install a song as the WASM-owned source of truth
#[wasm_bindgen(js_name = loadSong)]
pub fn load_song(song_js: JsValue) -> Result<(), JsValue> {
    let song: Song = serde_wasm_bindgen::from_value(song_js).map_err(js_err)?;
    wasm_info!(
        "loadSong: {} notes, {} chords, key {}",
        song.notes.len(),
        song.chords.len(),
        song.key
    );
    let mut guard = SONG.lock().map_err(|_| JsValue::from_str("song store poisoned"))?;
    *guard = Some(song);
    Ok(())
}

/// Snapshot of the current song
#[wasm_bindgen(js_name = getSong)]
pub fn get_song() -> Result<JsValue, JsValue> {
    with_song(|song| serde_wasm_bindgen::to_value(song).map_err(js_err))
}

/// Change the key, transposing every melody note; returns the updated song
#[wasm_bindgen(js_name = setKey)]
pub fn set_key(key: String) -> Result<JsValue, JsValue> {
    let key: Key = key.parse().map_err(js_err)?;
    with_song_mut(|song| {
        song.set_key(key);
        serde_wasm_bindgen::to_value(song).map_err(js_err)
    })
}

/// Force, hide (-1), or clear (null) a note's string assignment
#[wasm_bindgen(js_name = setPreferredString)]
pub fn set_preferred_string(note_id: String, string: Option<i32>) -> Result<bool, JsValue> {
    with_song_mut(|song| Ok(song.set_preferred_string(&note_id, string.map(|s| s as i8))))
}

/// Create a melody note; returns the stored note with its minted id
#[wasm_bindgen(js_name = createMelodyNote)]
pub fn create_melody_note(
    pitch: String,
    start_time: f64,
    duration: f64,
    preferred_string: Option<i32>,
) -> Result<JsValue, JsValue> {
    let pitch: Pitch = pitch.parse().map_err(js_err)?;
    let start_time = parse_beat(start_time, "start time")?;
    let duration = parse_beat(duration, "duration")?;
    with_song_mut(|song| {
        let id = song.create_melody_note(
            pitch,
            start_time,
            duration,
            preferred_string.map(|s| s as i8),
        );
        let note = song.note(&id).ok_or_else(|| JsValue::from_str("note vanished"))?;
        serde_wasm_bindgen::to_value(note).map_err(js_err)
    })
}

/// Voicing for one chord against an explicit set of overlapping melody notes
#[wasm_bindgen(js_name = computeChordVoicing)]
pub fn compute_chord_voicing_js(
    chord_js: JsValue,
    melody_js: JsValue,
    key: String,
) -> Result<JsValue, JsValue> {
    let chord: Chord = serde_wasm_bindgen::from_value(chord_js).map_err(js_err)?;
    let melody: Vec<MelodyNote> = serde_wasm_bindgen::from_value(melody_js).map_err(js_err)?;
    let key: Key = key.parse().map_err(js_err)?;
    let voicing = compute_chord_voicing(&chord, &melody, key);
    serde_wasm_bindgen::to_value(&voicing).map_err(js_err)
}

/// Fretboard position for one melody note; null when hidden or unplayable
#[wasm_bindgen(js_name = computeMelodyPosition)]
pub fn compute_melody_position_js(note_js: JsValue) -> Result<JsValue, JsValue> {
    let note: MelodyNote = serde_wasm_bindgen::from_value(note_js).map_err(js_err)?;
    match compute_melody_position(&note) {
        Some(pos) => serde_wasm_bindgen::to_value(&pos).map_err(js_err),
        None => Ok(JsValue::NULL),
    }
}

/// The flattened event list for the playback driver
#[wasm_bindgen(js_name = getTablatureEvents)]
pub fn get_tablature_events() -> Result<JsValue, JsValue> {
    with_song(|song| {
        let events = tablature_events(song.melody_notes(), song.chords(), song.key());
        serde_wasm_bindgen::to_value(&events).map_err(js_err)
    })
}

/// Rondel candidates for a (time, string) cell
#[wasm_bindgen(js_name = getRondelOptions)]
pub fn get_rondel_options(time: f64, string: u8) -> Result<js_sys::Array, JsValue> {
    let time = parse_beat(time, "time")?;
    with_song(|song| {
        let options = rondel_options(time, string, song.melody_notes(), song.chords(), song.key());
        let array = js_sys::Array::new();
        for option in &options {
            array.push(&serde_wasm_bindgen::to_value(option).map_err(js_err)?);
        }
        Ok(array)
    })
}

/// Apply a rondel selection; returns what happened to the note store
#[wasm_bindgen(js_name = selectRondelOption)]
pub fn select_rondel_option(
    time: f64,
    string: u8,
    option_js: JsValue,
    default_duration: f64,
) -> Result<JsValue, JsValue> {
    let time = parse_beat(time, "time")?;
    let default_duration = parse_beat(default_duration, "duration")?;
    let option: RondelOption = serde_wasm_bindgen::from_value(option_js).map_err(js_err)?;
    with_song_mut(|song| {
        let outcome = apply_rondel_selection(song, time, string, &option, default_duration);
        wasm_info!("selectRondelOption at {time} string {string}: {outcome:?}");
        serde_wasm_bindgen::to_value(&outcome).map_err(js_err)
    })
}

/// Display info (spelled root, quality, color) for a chord symbol
#[wasm_bindgen(js_name = getChordInfo)]
pub fn get_chord_info(roman: String, key: String) -> Result<JsValue, JsValue> {
    let roman: RomanNumeral = roman.parse().map_err(js_err)?;
    let key: Key = key.parse().map_err(js_err)?;
    serde_wasm_bindgen::to_value(&chord_info(roman, key)).map_err(js_err)
}

/// The isomorphic free-play grid as pitch strings, column-major
#[wasm_bindgen(js_name = getNoteGrid)]
pub fn get_note_grid(rows: u32, cols: u32, start_midi: i32) -> Result<js_sys::Array, JsValue> {
    let array = js_sys::Array::new();
    for pitch in note_grid(rows, cols, start_midi) {
        array.push(&JsValue::from_str(&pitch.to_string()));
    }
    Ok(array)
}
