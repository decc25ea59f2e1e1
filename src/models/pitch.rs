//! Chromatic pitch types
//!
//! Pitches are stored sharp-normalized: the twelve chromatic classes use
//! sharp spellings internally, and flat spellings (Db, Eb, ...) normalize to
//! the same class on parse. Spelled scale tables in `theory` keep the flat
//! names for display.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::NotationError;

/// One of the twelve chromatic pitch classes, sharp-normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteName {
    C,
    #[serde(rename = "C#")]
    Cs,
    D,
    #[serde(rename = "D#")]
    Ds,
    E,
    F,
    #[serde(rename = "F#")]
    Fs,
    G,
    #[serde(rename = "G#")]
    Gs,
    A,
    #[serde(rename = "A#")]
    As,
    B,
}

/// All twelve classes in chromatic order starting at C
pub const CHROMATIC_NOTES: [NoteName; 12] = [
    NoteName::C,
    NoteName::Cs,
    NoteName::D,
    NoteName::Ds,
    NoteName::E,
    NoteName::F,
    NoteName::Fs,
    NoteName::G,
    NoteName::Gs,
    NoteName::A,
    NoteName::As,
    NoteName::B,
];

impl NoteName {
    /// Semitone offset from C (0..=11)
    pub fn chromatic_index(&self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::Cs => 1,
            NoteName::D => 2,
            NoteName::Ds => 3,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::Fs => 6,
            NoteName::G => 7,
            NoteName::Gs => 8,
            NoteName::A => 9,
            NoteName::As => 10,
            NoteName::B => 11,
        }
    }

    /// Class for a chromatic index; any integer is folded into 0..=11
    pub fn from_index(index: i32) -> NoteName {
        CHROMATIC_NOTES[index.rem_euclid(12) as usize]
    }

    /// Sharp-normalized display name ("C", "C#", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::B => "B",
        }
    }

    /// The letter family (accidental stripped), used for note coloring
    pub fn letter(&self) -> char {
        match self {
            NoteName::C | NoteName::Cs => 'C',
            NoteName::D | NoteName::Ds => 'D',
            NoteName::E => 'E',
            NoteName::F | NoteName::Fs => 'F',
            NoteName::G | NoteName::Gs => 'G',
            NoteName::A | NoteName::As => 'A',
            NoteName::B => 'B',
        }
    }

    /// Parse a spelled note name, normalizing enharmonics
    ///
    /// Accepts naturals ("C"), sharps ("C#"), and flats ("Db"), including the
    /// theoretical spellings that appear in flat-key scales ("Cb" -> B,
    /// "Fb" -> E, "E#" -> F, "B#" -> C).
    pub fn from_spelling(s: &str) -> Option<NoteName> {
        let mut chars = s.chars();
        let letter = chars.next()?;
        let base = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let offset = match chars.as_str() {
            "" => 0,
            "#" => 1,
            "b" => -1,
            _ => return None,
        };
        Some(NoteName::from_index(base + offset))
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoteName {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteName::from_spelling(s).ok_or_else(|| NotationError::InvalidPitch(s.to_string()))
    }
}

/// A concrete pitch: chromatic class plus octave
///
/// Ordering follows `order()` so pitches compare by sounding height, not by
/// spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub name: NoteName,
    pub octave: i8,
}

impl Pitch {
    pub fn new(name: NoteName, octave: i8) -> Pitch {
        Pitch { name, octave }
    }

    /// Total order over pitches: octave * 12 + chromatic index
    pub fn order(&self) -> i32 {
        self.octave as i32 * 12 + self.name.chromatic_index()
    }

    /// MIDI note number (C4 = 60)
    pub fn to_midi(&self) -> i32 {
        self.order() + 12
    }

    /// Pitch for a MIDI note number
    pub fn from_midi(midi: i32) -> Pitch {
        Pitch {
            name: NoteName::from_index(midi.rem_euclid(12)),
            octave: (midi.div_euclid(12) - 1) as i8,
        }
    }

    /// Shift by a signed number of semitones, carrying the octave
    pub fn transposed(&self, semitones: i32) -> Pitch {
        let total = self.name.chromatic_index() + semitones;
        Pitch {
            name: NoteName::from_index(total),
            octave: self.octave + total.div_euclid(12) as i8,
        }
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order().cmp(&other.order())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.as_str(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| NotationError::InvalidPitch(s.to_string()))?;
        let (name_part, octave_part) = s.split_at(split);
        let name = NoteName::from_spelling(name_part)
            .ok_or_else(|| NotationError::InvalidPitch(s.to_string()))?;
        let octave: i8 = octave_part
            .parse()
            .map_err(|_| NotationError::InvalidPitch(s.to_string()))?;
        Ok(Pitch { name, octave })
    }
}

// Pitches cross the JS boundary as strings ("C#4"), matching the host's
// pitch representation.
impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
