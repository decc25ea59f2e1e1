//! Core composition model: melody notes, chords, and the song store
//!
//! The song owns the notes and chords the engine reads. The engine itself
//! never mutates them; the only mutations the override layer needs are
//! `set_preferred_string` and `create_melody_note`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::duration::{beat_serde, Beat};
use super::pitch::Pitch;
use super::NotationError;
use crate::theory::{transpose, Key};

/// Number of strings on the instrument
pub const STRING_COUNT: u8 = 4;

/// `preferred_string` sentinel: the note exists but is hidden from tablature
pub const HIDDEN_STRING: i8 = -1;

/// Scale degrees I..VII
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RomanNumeral {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl RomanNumeral {
    /// Zero-based scale degree
    pub fn degree(&self) -> usize {
        match self {
            RomanNumeral::I => 0,
            RomanNumeral::II => 1,
            RomanNumeral::III => 2,
            RomanNumeral::IV => 3,
            RomanNumeral::V => 4,
            RomanNumeral::VI => 5,
            RomanNumeral::VII => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RomanNumeral::I => "I",
            RomanNumeral::II => "II",
            RomanNumeral::III => "III",
            RomanNumeral::IV => "IV",
            RomanNumeral::V => "V",
            RomanNumeral::VI => "VI",
            RomanNumeral::VII => "VII",
        }
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RomanNumeral {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(RomanNumeral::I),
            "II" => Ok(RomanNumeral::II),
            "III" => Ok(RomanNumeral::III),
            "IV" => Ok(RomanNumeral::IV),
            "V" => Ok(RomanNumeral::V),
            "VI" => Ok(RomanNumeral::VI),
            "VII" => Ok(RomanNumeral::VII),
            _ => Err(NotationError::InvalidRomanNumeral(s.to_string())),
        }
    }
}

/// One melody note in the composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MelodyNote {
    pub id: String,
    pub pitch: Pitch,
    #[serde(with = "beat_serde")]
    pub start_time: Beat,
    #[serde(with = "beat_serde")]
    pub duration: Beat,
    /// `None` = engine decides, `Some(0..=3)` = forced string,
    /// `Some(-1)` = hidden from tablature (the note still exists as melody)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_string: Option<i8>,
}

impl MelodyNote {
    pub fn end_time(&self) -> Beat {
        self.start_time + self.duration
    }

    /// True when the note sounds at `time` (`[start, start + duration)`)
    pub fn sounds_at(&self, time: Beat) -> bool {
        self.start_time <= time && time < self.end_time()
    }

    /// True when the note's interval overlaps `[start, end)`
    pub fn overlaps(&self, start: Beat, end: Beat) -> bool {
        self.start_time < end && start < self.end_time()
    }

    /// True when the note is suppressed from tablature display/playback
    pub fn is_hidden(&self) -> bool {
        self.preferred_string == Some(HIDDEN_STRING)
    }
}

/// One chord symbol in the composition, resolved diatonically against the key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub id: String,
    pub roman: RomanNumeral,
    #[serde(with = "beat_serde")]
    pub start_time: Beat,
    #[serde(with = "beat_serde")]
    pub duration: Beat,
}

impl Chord {
    pub fn end_time(&self) -> Beat {
        self.start_time + self.duration
    }

    pub fn sounds_at(&self, time: Beat) -> bool {
        self.start_time <= time && time < self.end_time()
    }
}

/// Time signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meter {
    pub beats_per_measure: u8,
    pub beat_unit: u8,
}

impl Default for Meter {
    fn default() -> Self {
        Meter { beats_per_measure: 4, beat_unit: 4 }
    }
}

/// The composition: tempo, meter, key, melody notes, and chords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub tempo: u32,
    #[serde(default)]
    pub meter: Meter,
    pub key: Key,
    #[serde(default)]
    pub notes: Vec<MelodyNote>,
    #[serde(default)]
    pub chords: Vec<Chord>,
}

impl Song {
    pub fn new(key: Key) -> Song {
        Song { tempo: 120, meter: Meter::default(), key, notes: Vec::new(), chords: Vec::new() }
    }

    pub fn melody_notes(&self) -> &[MelodyNote] {
        &self.notes
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn note(&self, id: &str) -> Option<&MelodyNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn add_note(&mut self, note: MelodyNote) {
        self.notes.push(note);
    }

    pub fn add_chord(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    /// Change the key, transposing every melody note by the tonic delta
    pub fn set_key(&mut self, key: Key) {
        transpose::transpose_notes(&mut self.notes, self.key, key);
        self.key = key;
    }

    /// Override-layer mutation: force, hide, or clear a note's string
    ///
    /// Returns false when no note has the given id.
    pub fn set_preferred_string(&mut self, note_id: &str, string: Option<i8>) -> bool {
        match self.notes.iter_mut().find(|n| n.id == note_id) {
            Some(note) => {
                note.preferred_string = string;
                true
            }
            None => false,
        }
    }

    /// Override-layer mutation: create a note, returning its minted id
    pub fn create_melody_note(
        &mut self,
        pitch: Pitch,
        start_time: Beat,
        duration: Beat,
        preferred_string: Option<i8>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.notes.push(MelodyNote {
            id: id.clone(),
            pitch,
            start_time,
            duration,
            preferred_string,
        });
        id
    }
}
