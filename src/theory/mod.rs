//! Key, scale, and triad layer
//!
//! All twelve major keys, their spelled scales (flat keys keep flat
//! spellings for display), diatonic triad resolution for Roman-numeral
//! chords, and the chord/note display info the host renders with.

pub mod transpose;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::pitch::{NoteName, Pitch};
use crate::models::{NotationError, RomanNumeral};

/// One of the twelve major keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    #[serde(rename = "C Major")]
    CMajor,
    #[serde(rename = "G Major")]
    GMajor,
    #[serde(rename = "D Major")]
    DMajor,
    #[serde(rename = "A Major")]
    AMajor,
    #[serde(rename = "E Major")]
    EMajor,
    #[serde(rename = "B Major")]
    BMajor,
    #[serde(rename = "F Major")]
    FMajor,
    #[serde(rename = "Bb Major")]
    BbMajor,
    #[serde(rename = "Eb Major")]
    EbMajor,
    #[serde(rename = "Ab Major")]
    AbMajor,
    #[serde(rename = "Db Major")]
    DbMajor,
    #[serde(rename = "Gb Major")]
    GbMajor,
}

pub const ALL_KEYS: [Key; 12] = [
    Key::CMajor,
    Key::GMajor,
    Key::DMajor,
    Key::AMajor,
    Key::EMajor,
    Key::BMajor,
    Key::FMajor,
    Key::BbMajor,
    Key::EbMajor,
    Key::AbMajor,
    Key::DbMajor,
    Key::GbMajor,
];

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::CMajor => "C Major",
            Key::GMajor => "G Major",
            Key::DMajor => "D Major",
            Key::AMajor => "A Major",
            Key::EMajor => "E Major",
            Key::BMajor => "B Major",
            Key::FMajor => "F Major",
            Key::BbMajor => "Bb Major",
            Key::EbMajor => "Eb Major",
            Key::AbMajor => "Ab Major",
            Key::DbMajor => "Db Major",
            Key::GbMajor => "Gb Major",
        }
    }

    /// The seven scale degrees with the key's own spelling (kept for display;
    /// flat keys spell flats, including the theoretical Cb in Gb major)
    pub fn scale_spelled(&self) -> [&'static str; 7] {
        match self {
            Key::CMajor => ["C", "D", "E", "F", "G", "A", "B"],
            Key::GMajor => ["G", "A", "B", "C", "D", "E", "F#"],
            Key::DMajor => ["D", "E", "F#", "G", "A", "B", "C#"],
            Key::AMajor => ["A", "B", "C#", "D", "E", "F#", "G#"],
            Key::EMajor => ["E", "F#", "G#", "A", "B", "C#", "D#"],
            Key::BMajor => ["B", "C#", "D#", "E", "F#", "G#", "A#"],
            Key::FMajor => ["F", "G", "A", "Bb", "C", "D", "E"],
            Key::BbMajor => ["Bb", "C", "D", "Eb", "F", "G", "A"],
            Key::EbMajor => ["Eb", "F", "G", "Ab", "Bb", "C", "D"],
            Key::AbMajor => ["Ab", "Bb", "C", "Db", "Eb", "F", "G"],
            Key::DbMajor => ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"],
            Key::GbMajor => ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"],
        }
    }

    /// The seven scale degrees as normalized chromatic classes
    pub fn scale(&self) -> [NoteName; 7] {
        use NoteName::*;
        match self {
            Key::CMajor => [C, D, E, F, G, A, B],
            Key::GMajor => [G, A, B, C, D, E, Fs],
            Key::DMajor => [D, E, Fs, G, A, B, Cs],
            Key::AMajor => [A, B, Cs, D, E, Fs, Gs],
            Key::EMajor => [E, Fs, Gs, A, B, Cs, Ds],
            Key::BMajor => [B, Cs, Ds, E, Fs, Gs, As],
            Key::FMajor => [F, G, A, As, C, D, E],
            Key::BbMajor => [As, C, D, Ds, F, G, A],
            Key::EbMajor => [Ds, F, G, Gs, As, C, D],
            Key::AbMajor => [Gs, As, C, Cs, Ds, F, G],
            Key::DbMajor => [Cs, Ds, F, Fs, Gs, As, C],
            Key::GbMajor => [Fs, Gs, As, B, Cs, Ds, F],
        }
    }

    pub fn tonic(&self) -> NoteName {
        self.scale()[0]
    }

    /// Semitone offset of the tonic from C, used for transposition deltas
    pub fn tonic_semitone(&self) -> i32 {
        self.tonic().chromatic_index()
    }

    /// Scale membership with enharmonic normalization
    pub fn contains(&self, name: NoteName) -> bool {
        self.scale().contains(&name)
    }

    /// The diatonic triad (root, third, fifth) for a scale degree
    pub fn triad(&self, roman: RomanNumeral) -> [NoteName; 3] {
        let scale = self.scale();
        let degree = roman.degree();
        [scale[degree], scale[(degree + 2) % 7], scale[(degree + 4) % 7]]
    }

    /// Spelled root name for a scale degree, in this key's spelling
    pub fn root_spelled(&self, roman: RomanNumeral) -> &'static str {
        self.scale_spelled()[roman.degree()]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Key {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KEYS
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| NotationError::UnknownKey(s.to_string()))
    }
}

/// Triad quality of a diatonic chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
        }
    }
}

/// Quality of a scale degree in any major key:
/// I, IV, V major; II, III, VI minor; VII diminished
pub fn chord_quality(roman: RomanNumeral) -> ChordQuality {
    match roman {
        RomanNumeral::I | RomanNumeral::IV | RomanNumeral::V => ChordQuality::Major,
        RomanNumeral::VII => ChordQuality::Diminished,
        _ => ChordQuality::Minor,
    }
}

/// Display info for a chord symbol: spelled root, quality, and color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordInfo {
    pub name: String,
    pub quality: ChordQuality,
    pub color: &'static str,
}

pub fn chord_info(roman: RomanNumeral, key: Key) -> ChordInfo {
    let root = key.triad(roman)[0];
    ChordInfo {
        name: key.root_spelled(roman).to_string(),
        quality: chord_quality(roman),
        color: note_color(root),
    }
}

/// Letter-family colors shared by the piano roll and the tablature views
pub fn note_color(name: NoteName) -> &'static str {
    match name.letter() {
        'C' => "#e74c3c",
        'D' => "#e67e22",
        'E' => "#f1c40f",
        'F' => "#2ecc71",
        'G' => "#1abc9c",
        'A' => "#9b59b6",
        _ => "#e91e63",
    }
}

/// Isomorphic free-play grid: column = whole tone, row = semitone
///
/// Generated column by column from the MIDI origin, matching the host's
/// bottom-left-up button layout.
pub fn note_grid(rows: u32, cols: u32, start_midi: i32) -> Vec<Pitch> {
    let mut grid = Vec::with_capacity((rows * cols) as usize);
    for col in 0..cols {
        for row in 0..rows {
            grid.push(Pitch::from_midi(start_midi + col as i32 * 2 + row as i32));
        }
    }
    grid
}
