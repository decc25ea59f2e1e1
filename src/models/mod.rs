//! Data models for the ukulele tablature engine
//!
//! Pitches, melody notes, chords, and the song store the voicing engine
//! reads. Musical lookup failures elsewhere in the crate are `Option`s;
//! `NotationError` covers only malformed input at the parsing boundary.

pub mod core;
pub mod duration;
pub mod pitch;

pub use core::{Chord, MelodyNote, Meter, RomanNumeral, Song, HIDDEN_STRING, STRING_COUNT};
pub use duration::{Beat, NoteDuration};
pub use pitch::{NoteName, Pitch};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotationError {
    #[error("invalid pitch: {0}")]
    InvalidPitch(String),
    #[error("invalid roman numeral: {0}")]
    InvalidRomanNumeral(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}
