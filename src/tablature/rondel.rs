//! The rondel: manual per-cell override picker
//!
//! For a (time, string) cell the rondel offers every pitch sounding at that
//! instant anywhere in the composition, annotated with its fret on that
//! string, plus an "empty" sentinel. Selecting an option patches the
//! automatic tablature through the note store's two mutation entry points.
//!
//! Hiding the current occupant and assigning the selected note are two
//! distinct state transitions and must stay in that order: the occupant is
//! fully hidden before the new assignment is made, so no transient state has
//! two notes claiming the same string. Running both inside one `&mut Song`
//! borrow makes the pair atomic to every reader.

use serde::{Deserialize, Serialize};

use crate::fretboard;
use crate::models::duration::Beat;
use crate::models::pitch::Pitch;
use crate::models::{Chord, MelodyNote, Song, HIDDEN_STRING};
use crate::theory::Key;
use crate::voicing::compute_chord_voicing;

use super::{compute_melody_position, overlapping_melody};

/// One rondel entry; `pitch: None` is the empty sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RondelOption {
    pub pitch: Option<Pitch>,
    pub fret: u8,
    pub note_name: String,
}

impl RondelOption {
    pub fn empty() -> RondelOption {
        RondelOption { pitch: None, fret: 0, note_name: String::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.pitch.is_none()
    }
}

/// What a rondel selection did to the note store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "noteId", rename_all = "camelCase")]
pub enum RondelOutcome {
    /// The occupant of the cell was hidden
    Hidden(String),
    /// An existing note was moved onto the cell's string
    Assigned(String),
    /// A new note was created on the cell's string
    Created(String),
    /// Nothing to do (empty selected on an empty cell)
    NoChange,
}

/// Candidate options for a (time, string) cell
///
/// Candidates are every pitch sounding at `time`, melody notes (hidden ones
/// included, they still sound) and chord-voicing pitches alike: deduplicated,
/// high to low, filtered to the ones playable on `string`, with the empty
/// sentinel last.
pub fn rondel_options(
    time: Beat,
    string: u8,
    notes: &[MelodyNote],
    chords: &[Chord],
    key: Key,
) -> Vec<RondelOption> {
    let mut pitches: Vec<Pitch> = notes.iter().filter(|n| n.sounds_at(time)).map(|n| n.pitch).collect();
    for chord in chords.iter().filter(|c| c.sounds_at(time)) {
        let melody = overlapping_melody(notes, chord);
        pitches.extend(compute_chord_voicing(chord, &melody, key).iter().map(|v| v.pitch));
    }
    pitches.sort_by_key(|p| std::cmp::Reverse(p.order()));
    pitches.dedup();

    let mut options: Vec<RondelOption> = pitches
        .into_iter()
        .filter_map(|pitch| {
            let pos = fretboard::position_on_string(pitch, string)?;
            Some(RondelOption {
                pitch: Some(pitch),
                fret: pos.fret,
                note_name: pitch.name.as_str().to_string(),
            })
        })
        .collect();
    options.push(RondelOption::empty());
    options
}

/// Apply a rondel selection to the note store
///
/// The occupant-hiding write is committed before the assignment is computed
/// or applied; see the module docs for why the order matters.
pub fn apply_rondel_selection(
    song: &mut Song,
    time: Beat,
    string: u8,
    option: &RondelOption,
    default_duration: Beat,
) -> RondelOutcome {
    let occupant = occupant_on_string(song, time, string);

    let Some(pitch) = option.pitch else {
        // empty selected: hide whatever renders on this cell, delete nothing
        return match occupant {
            Some(id) => {
                song.set_preferred_string(&id, Some(HIDDEN_STRING));
                RondelOutcome::Hidden(id)
            }
            None => RondelOutcome::NoChange,
        };
    };

    let existing = song
        .melody_notes()
        .iter()
        .find(|n| n.start_time == time && n.pitch == pitch)
        .map(|n| n.id.clone());

    // step 1: hide the current occupant (unless it is the selected note)
    if let Some(ref occ) = occupant {
        if existing.as_deref() != Some(occ.as_str()) {
            song.set_preferred_string(occ, Some(HIDDEN_STRING));
        }
    }

    // step 2: assign or create
    match existing {
        Some(id) => {
            song.set_preferred_string(&id, Some(string as i8));
            RondelOutcome::Assigned(id)
        }
        None => {
            let id = song.create_melody_note(pitch, time, default_duration, Some(string as i8));
            RondelOutcome::Created(id)
        }
    }
}

/// The melody note currently rendering on `string` at `time`, if any
fn occupant_on_string(song: &Song, time: Beat, string: u8) -> Option<String> {
    song.melody_notes()
        .iter()
        .find(|n| {
            n.sounds_at(time)
                && compute_melody_position(n).map_or(false, |pos| pos.string == string)
        })
        .map(|n| n.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RomanNumeral;

    fn note(id: &str, pitch: &str, preferred: Option<i8>) -> MelodyNote {
        MelodyNote {
            id: id.to_string(),
            pitch: pitch.parse().unwrap(),
            start_time: Beat::new(0, 1),
            duration: Beat::new(1, 1),
            preferred_string: preferred,
        }
    }

    fn song_with(notes: Vec<MelodyNote>) -> Song {
        let mut song = Song::new(Key::CMajor);
        for n in notes {
            song.add_note(n);
        }
        song
    }

    #[test]
    fn test_options_include_sounding_pitches_high_to_low() {
        let notes = vec![note("m1", "C5", None), note("m2", "E4", None)];
        let options = rondel_options(Beat::new(0, 1), 0, &notes, &[], Key::CMajor);
        // E4 is below the open A string, so only C5 is playable there
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].pitch, Some("C5".parse().unwrap()));
        assert_eq!(options[0].fret, 3);
        assert_eq!(options[0].note_name, "C");
        assert!(options[1].is_empty());
    }

    #[test]
    fn test_options_include_chord_pitches() {
        let chords = vec![Chord {
            id: "c1".to_string(),
            roman: RomanNumeral::I,
            start_time: Beat::new(0, 1),
            duration: Beat::new(4, 1),
        }];
        let options = rondel_options(Beat::new(0, 1), 2, &[], &chords, Key::CMajor);
        // standard C shape sounds C5, E4, C4, G4; C5, E4 and C4 sit on the C string
        let pitches: Vec<Option<Pitch>> = options.iter().map(|o| o.pitch).collect();
        assert!(pitches.contains(&Some("C4".parse().unwrap())));
        assert!(pitches.contains(&Some("E4".parse().unwrap())));
        assert!(options.last().unwrap().is_empty());
    }

    #[test]
    fn test_select_empty_hides_occupant() {
        let mut song = song_with(vec![note("m1", "C5", None)]);
        let outcome = apply_rondel_selection(
            &mut song,
            Beat::new(0, 1),
            0,
            &RondelOption::empty(),
            Beat::new(1, 1),
        );
        assert_eq!(outcome, RondelOutcome::Hidden("m1".to_string()));
        assert!(song.note("m1").unwrap().is_hidden());
        // hide, not delete
        assert_eq!(song.melody_notes().len(), 1);
    }

    #[test]
    fn test_select_existing_note_displaces_occupant() {
        // both notes can sound on string 1; m1 renders there automatically
        let mut song = song_with(vec![note("m1", "E4", None), note("m2", "G4", None)]);
        assert_eq!(compute_melody_position(song.note("m1").unwrap()).unwrap().string, 1);

        let option = RondelOption {
            pitch: Some("G4".parse().unwrap()),
            fret: 3,
            note_name: "G".to_string(),
        };
        let outcome =
            apply_rondel_selection(&mut song, Beat::new(0, 1), 1, &option, Beat::new(1, 1));
        assert_eq!(outcome, RondelOutcome::Assigned("m2".to_string()));
        assert!(song.note("m1").unwrap().is_hidden());
        assert_eq!(song.note("m2").unwrap().preferred_string, Some(1));
    }

    #[test]
    fn test_select_new_pitch_creates_note() {
        let mut song = song_with(vec![]);
        let option = RondelOption {
            pitch: Some("A4".parse().unwrap()),
            fret: 0,
            note_name: "A".to_string(),
        };
        let outcome =
            apply_rondel_selection(&mut song, Beat::new(2, 1), 0, &option, Beat::new(1, 2));
        let RondelOutcome::Created(id) = outcome else {
            panic!("expected a created note, got {outcome:?}");
        };
        let created = song.note(&id).unwrap();
        assert_eq!(created.pitch, "A4".parse().unwrap());
        assert_eq!(created.start_time, Beat::new(2, 1));
        assert_eq!(created.duration, Beat::new(1, 2));
        assert_eq!(created.preferred_string, Some(0));
    }

    #[test]
    fn test_reselecting_the_occupant_is_stable() {
        let mut song = song_with(vec![note("m1", "E4", None)]);
        let option = RondelOption {
            pitch: Some("E4".parse().unwrap()),
            fret: 0,
            note_name: "E".to_string(),
        };
        let outcome =
            apply_rondel_selection(&mut song, Beat::new(0, 1), 1, &option, Beat::new(1, 1));
        assert_eq!(outcome, RondelOutcome::Assigned("m1".to_string()));
        assert!(!song.note("m1").unwrap().is_hidden());
        assert_eq!(song.note("m1").unwrap().preferred_string, Some(1));
    }
}
