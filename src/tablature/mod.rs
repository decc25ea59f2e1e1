//! Tablature assembly downstream of the voicing engine
//!
//! Melody placement, the flattened event list the playback driver consumes,
//! and the per-session playback cursor. The event list is the sole playback
//! interface: the driver never sees chords, triads, or voicings.

pub mod rondel;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::fretboard::{self, FretPosition};
use crate::models::duration::{beat_serde, beat_to_float, Beat};
use crate::models::pitch::Pitch;
use crate::models::{Chord, MelodyNote};
use crate::theory::Key;
use crate::voicing::compute_chord_voicing;

/// One flattened playback event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabEvent {
    pub pitch: Pitch,
    #[serde(with = "beat_serde")]
    pub start_time: Beat,
    #[serde(with = "beat_serde")]
    pub duration: Beat,
    pub string_index: u8,
}

/// Resolve one melody note's position on the fretboard
///
/// A forced string is honored even when the pitch is out of range there (the
/// note then simply has no position and drops out of the tablature while
/// remaining melody data). Hidden notes never place.
pub fn compute_melody_position(note: &MelodyNote) -> Option<FretPosition> {
    match note.preferred_string {
        Some(s) if s < 0 => None,
        Some(s) => fretboard::position_on_string(note.pitch, s as u8),
        None => fretboard::best_position(note.pitch),
    }
}

/// Melody notes whose interval overlaps the chord's
pub fn overlapping_melody(notes: &[MelodyNote], chord: &Chord) -> Vec<MelodyNote> {
    notes
        .iter()
        .filter(|n| n.overlaps(chord.start_time, chord.end_time()))
        .cloned()
        .collect()
}

/// Flatten melody placements and chord voicings into the playback list
///
/// Deduplicated by (start, pitch, string), melody entries first, so a pitch
/// sounding from both a coincident melody note and a chord voicing keeps the
/// melody note's duration. Sorted by (start, string, pitch order) so
/// repeated runs are byte-identical.
pub fn tablature_events(notes: &[MelodyNote], chords: &[Chord], key: Key) -> Vec<TabEvent> {
    let mut events = Vec::new();
    let mut seen: HashSet<(Beat, i32, u8)> = HashSet::new();

    for note in notes {
        if let Some(pos) = compute_melody_position(note) {
            if seen.insert((note.start_time, note.pitch.order(), pos.string)) {
                events.push(TabEvent {
                    pitch: note.pitch,
                    start_time: note.start_time,
                    duration: note.duration,
                    string_index: pos.string,
                });
            }
        }
    }

    for chord in chords {
        let melody = overlapping_melody(notes, chord);
        for voiced in compute_chord_voicing(chord, &melody, key) {
            if seen.insert((chord.start_time, voiced.pitch.order(), voiced.string)) {
                events.push(TabEvent {
                    pitch: voiced.pitch,
                    start_time: chord.start_time,
                    duration: chord.duration,
                    string_index: voiced.string,
                });
            }
        }
    }

    events.sort_by_key(|e| (e.start_time, e.string_index, e.pitch.order()));
    events
}

/// Explicit per-playback-session state
///
/// Tracks which events have fired so far and the last polled beat, so
/// multiple sessions (or tests) can run against the same event list without
/// cross-contamination.
#[derive(Debug)]
pub struct PlaybackSession {
    cursor: Beat,
    fired: HashSet<(Beat, i32, u8)>,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        PlaybackSession::new()
    }
}

impl PlaybackSession {
    pub fn new() -> PlaybackSession {
        PlaybackSession { cursor: Beat::new(0, 1), fired: HashSet::new() }
    }

    /// The last beat handed to `poll`
    pub fn cursor(&self) -> Beat {
        self.cursor
    }

    /// Advance to `beat`, returning the events newly due (start <= beat)
    pub fn poll(&mut self, events: &[TabEvent], beat: Beat) -> Vec<TabEvent> {
        self.cursor = beat;
        events
            .iter()
            .filter(|e| {
                e.start_time <= beat
                    && self.fired.insert((e.start_time, e.pitch.order(), e.string_index))
            })
            .copied()
            .collect()
    }

    /// Forget fired events and rewind to beat zero
    pub fn reset(&mut self) {
        self.cursor = Beat::new(0, 1);
        self.fired.clear();
    }

    /// Event duration in seconds at a tempo in beats per minute
    pub fn duration_seconds(event: &TabEvent, tempo: u32) -> f64 {
        if tempo == 0 {
            return 0.0;
        }
        beat_to_float(event.duration) * 60.0 / tempo as f64
    }
}
