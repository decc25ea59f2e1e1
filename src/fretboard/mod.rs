//! Fretboard model for the fixed reentrant ukulele tuning
//!
//! String order is physical, top string first: A4, E4, C4, G4. The tuning is
//! reentrant, so string index is not monotonic in pitch (the "low" G string
//! sounds above the C string). All lookups are bounded to frets 0..=12 and
//! return `None` for unplayable pitches; nothing here panics on musical
//! input.

use serde::{Deserialize, Serialize};

use crate::models::pitch::{NoteName, Pitch};
use crate::models::STRING_COUNT;

/// Highest playable fret
pub const MAX_FRET: u8 = 12;

/// Open-string pitches, string 0 (A4) through string 3 (G4)
pub const TUNING: [Pitch; STRING_COUNT as usize] = [
    Pitch { name: NoteName::A, octave: 4 },
    Pitch { name: NoteName::E, octave: 4 },
    Pitch { name: NoteName::C, octave: 4 },
    Pitch { name: NoteName::G, octave: 4 },
];

/// A playable position: string index 0..=3, fret 0..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FretPosition {
    pub string: u8,
    pub fret: u8,
}

/// Pitch sounding at a fret on a string, octave rollover included
///
/// `None` for out-of-bounds string or fret.
pub fn pitch_at_fret(string: u8, fret: u8) -> Option<Pitch> {
    if string >= STRING_COUNT || fret > MAX_FRET {
        return None;
    }
    Some(TUNING[string as usize].transposed(fret as i32))
}

/// Lowest-fret position sounding exactly `pitch`, searched string 0 outward
///
/// The strict fret comparison means the lowest fret wins regardless of
/// string, and the earlier string wins ties. An out-of-range C has no match
/// in the sweep; it folds onto the open C string so the note still renders
/// at its pitch class instead of vanishing.
pub fn best_position(pitch: Pitch) -> Option<FretPosition> {
    let mut best: Option<FretPosition> = None;
    for string in 0..STRING_COUNT {
        for fret in 0..=MAX_FRET {
            if pitch_at_fret(string, fret) == Some(pitch)
                && best.map_or(true, |b| fret < b.fret)
            {
                best = Some(FretPosition { string, fret });
            }
        }
    }
    if best.is_none() && pitch.name == TUNING[2].name {
        best = Some(FretPosition { string: 2, fret: 0 });
    }
    best
}

/// Position sounding exactly `pitch` on one string, if any
pub fn position_on_string(pitch: Pitch, string: u8) -> Option<FretPosition> {
    let open = TUNING.get(string as usize)?;
    let fret = pitch.order() - open.order();
    if (0..=MAX_FRET as i32).contains(&fret) {
        Some(FretPosition { string, fret: fret as u8 })
    } else {
        None
    }
}

/// True when the pitch lies between the lowest open string and the highest
/// twelfth-fret pitch, inclusive
pub fn is_within_range(pitch: Pitch) -> bool {
    let min = TUNING.iter().map(Pitch::order).min().unwrap_or(0);
    let max = TUNING.iter().map(Pitch::order).max().unwrap_or(0) + MAX_FRET as i32;
    (min..=max).contains(&pitch.order())
}
