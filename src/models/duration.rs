//! Rational beat arithmetic and the standard duration palette
//!
//! Start times and durations are exact rationals so that repeated edits and
//! re-voicings never drift. The host sends plain numbers over the JS
//! boundary; they are quantized onto the sixteenth grid on the way in (the
//! editor's finest duration is a quarter of a beat, so the grid is exact for
//! all host input).

use num_rational::Rational32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Musical time in beats
pub type Beat = Rational32;

/// The standard note-duration palette, in beats (quarter note = 1 beat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteDuration {
    Sixteenth,
    Eighth,
    Quarter,
    Half,
    Whole,
}

/// Palette in descending order, the order the greedy decomposition tries
pub const STANDARD_DURATIONS: [NoteDuration; 5] = [
    NoteDuration::Whole,
    NoteDuration::Half,
    NoteDuration::Quarter,
    NoteDuration::Eighth,
    NoteDuration::Sixteenth,
];

impl NoteDuration {
    /// Length in beats
    pub fn beats(&self) -> Beat {
        match self {
            NoteDuration::Sixteenth => Beat::new(1, 4),
            NoteDuration::Eighth => Beat::new(1, 2),
            NoteDuration::Quarter => Beat::new(1, 1),
            NoteDuration::Half => Beat::new(2, 1),
            NoteDuration::Whole => Beat::new(4, 1),
        }
    }

    /// Palette entry for an exact beat length
    pub fn from_beats(beats: Beat) -> Option<NoteDuration> {
        STANDARD_DURATIONS.iter().copied().find(|d| d.beats() == beats)
    }
}

// The host stores durations as plain beat counts (0.25, 0.5, 1, 2, 4), so
// the palette serializes as a number rather than a variant name.
impl Serialize for NoteDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(beat_to_float(self.beats()))
    }
}

impl<'de> Deserialize<'de> for NoteDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let beats = beat_from_float(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {value}")))?;
        NoteDuration::from_beats(beats)
            .ok_or_else(|| serde::de::Error::custom(format!("non-standard duration: {value}")))
    }
}

/// Decompose a duration into standard components, largest first
///
/// Returns `None` when the duration is not a sum of palette entries (or is
/// not positive); the caller renders such notes without duration glyphs.
pub fn duration_components(duration: Beat) -> Option<Vec<NoteDuration>> {
    if duration <= Beat::new(0, 1) {
        return None;
    }
    let mut components = Vec::new();
    let mut remaining = duration;
    for d in STANDARD_DURATIONS {
        while remaining >= d.beats() {
            components.push(d);
            remaining -= d.beats();
        }
    }
    if remaining != Beat::new(0, 1) {
        return None;
    }
    Some(components)
}

/// Quantize a host-side beat value onto the sixteenth grid
///
/// Returns `None` for non-finite or absurdly large values.
pub fn beat_from_float(value: f64) -> Option<Beat> {
    if !value.is_finite() {
        return None;
    }
    let sixteenths = (value * 16.0).round();
    if sixteenths.abs() > i32::MAX as f64 {
        return None;
    }
    Some(Beat::new(sixteenths as i32, 16))
}

/// Beat value as the host-side number
pub fn beat_to_float(beat: Beat) -> f64 {
    *beat.numer() as f64 / *beat.denom() as f64
}

/// Serde adapter: `Beat` fields cross the JS boundary as plain numbers
pub mod beat_serde {
    use super::*;

    pub fn serialize<S: Serializer>(beat: &Beat, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(beat_to_float(*beat))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Beat, D::Error> {
        let value = f64::deserialize(deserializer)?;
        beat_from_float(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid beat value: {value}")))
    }
}
