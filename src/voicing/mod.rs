//! The automatic chord-voicing engine
//!
//! Assigns a chord's triad classes to concrete (string, fret) positions.
//! When no melody overlaps the chord and the key has a curated table entry,
//! the standard shape is returned as-is; otherwise a per-string search picks
//! the lowest-fret triad candidate on each string, voiced strictly below the
//! highest overlapping melody pitch and never duplicating an exact melody
//! pitch. A final pass fills gaps in the used-string span so the shape stays
//! strummable whenever a candidate exists.
//!
//! The engine is a pure function over its inputs: same chord, melody, and
//! key always produce the same voicing, and partial (1-3 string) shapes are
//! valid output.

pub mod shapes;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::fretboard;
use crate::models::pitch::{NoteName, Pitch};
use crate::models::{Chord, MelodyNote, STRING_COUNT};
use crate::theory::Key;

/// Octaves the per-string search sweeps for triad candidates
const SEARCH_OCTAVES: std::ops::RangeInclusive<i8> = 2..=5;

/// One engine output entry: the position plus the triad class it sounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicedNote {
    pub string: u8,
    pub fret: u8,
    pub note_class: NoteName,
    pub pitch: Pitch,
}

/// Pitch ceiling for the per-string candidate search
#[derive(Debug, Clone, Copy)]
enum Ceiling {
    /// Strictly below the highest overlapping melody pitch
    Below(i32),
    /// Any playable candidate (gap-fill fallback and the no-melody search)
    Any,
}

/// Compute the voicing for one chord given the melody notes overlapping it
///
/// `melody` must be the notes whose `[start, start + duration)` interval
/// overlaps the chord's; hidden notes belong in it too, since they still
/// sound outside the tablature view.
pub fn compute_chord_voicing(chord: &Chord, melody: &[MelodyNote], key: Key) -> Vec<VoicedNote> {
    let triad = key.triad(chord.roman);

    if melody.is_empty() {
        if let Some(shape) = shapes::standard_shape(key, chord.roman) {
            return voicing_from_shape(&shape);
        }
        log::debug!("no standard shape for {} in {key}, using search", chord.roman);
        return searched_voicing(&triad, &HashSet::new(), Ceiling::Any);
    }

    let melody_pitches: HashSet<Pitch> = melody.iter().map(|n| n.pitch).collect();
    let max_order = melody.iter().map(|n| n.pitch.order()).max().unwrap_or(i32::MAX);
    searched_voicing(&triad, &melody_pitches, Ceiling::Below(max_order))
}

/// Expand a standard shape table entry into voiced notes
fn voicing_from_shape(shape: &shapes::Shape) -> Vec<VoicedNote> {
    shape
        .iter()
        .enumerate()
        .filter_map(|(string, &fret)| {
            let pitch = fretboard::pitch_at_fret(string as u8, fret)?;
            Some(VoicedNote { string: string as u8, fret, note_class: pitch.name, pitch })
        })
        .collect()
}

/// Per-string search plus the strummability gap-fill pass
fn searched_voicing(
    triad: &[NoteName; 3],
    melody_pitches: &HashSet<Pitch>,
    ceiling: Ceiling,
) -> Vec<VoicedNote> {
    let mut chosen: Vec<VoicedNote> = (0..STRING_COUNT)
        .filter_map(|string| string_candidate(string, triad, melody_pitches, ceiling))
        .collect();

    if !is_contiguous(&chosen) {
        fill_gaps(&mut chosen, triad, melody_pitches, ceiling);
        chosen.sort_by_key(|v| v.string);
    }

    chosen
}

/// Lowest-fret triad candidate on one string under the given ceiling
///
/// Exact melody pitches are treated as already-occupied frequencies and
/// skipped regardless of which string sounds them.
fn string_candidate(
    string: u8,
    triad: &[NoteName; 3],
    melody_pitches: &HashSet<Pitch>,
    ceiling: Ceiling,
) -> Option<VoicedNote> {
    let mut best: Option<VoicedNote> = None;
    for &note_class in triad {
        for octave in SEARCH_OCTAVES {
            let pitch = Pitch::new(note_class, octave);
            if melody_pitches.contains(&pitch) {
                continue;
            }
            if let Ceiling::Below(max_order) = ceiling {
                if pitch.order() >= max_order {
                    continue;
                }
            }
            if let Some(pos) = fretboard::position_on_string(pitch, string) {
                if best.map_or(true, |b| pos.fret < b.fret) {
                    best = Some(VoicedNote { string, fret: pos.fret, note_class, pitch });
                }
            }
        }
    }
    best
}

/// Close holes in the used-string span so the shape strums as one block
///
/// Below-melody candidates are strictly preferred over at-or-above-melody
/// ones; within each tier the lowest fret wins.
fn fill_gaps(
    chosen: &mut Vec<VoicedNote>,
    triad: &[NoteName; 3],
    melody_pitches: &HashSet<Pitch>,
    ceiling: Ceiling,
) {
    let lo = chosen.iter().map(|v| v.string).min().unwrap_or(0);
    let hi = chosen.iter().map(|v| v.string).max().unwrap_or(0);
    for string in lo..=hi {
        if chosen.iter().any(|v| v.string == string) {
            continue;
        }
        let candidate = string_candidate(string, triad, melody_pitches, ceiling)
            .or_else(|| string_candidate(string, triad, melody_pitches, Ceiling::Any));
        if let Some(v) = candidate {
            log::debug!("gap-fill: string {} takes {} at fret {}", v.string, v.pitch, v.fret);
            chosen.push(v);
        }
    }
}

/// True when the used strings form one contiguous run
fn is_contiguous(chosen: &[VoicedNote]) -> bool {
    match (chosen.iter().map(|v| v.string).min(), chosen.iter().map(|v| v.string).max()) {
        (Some(lo), Some(hi)) => (hi - lo + 1) as usize == chosen.len(),
        _ => true,
    }
}
