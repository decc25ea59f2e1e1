// Tablature Event List Integration Tests
//
// Validates the flattened playback interface: fretboard scenarios, event
// ordering, determinism, and the hidden-note behavior the override layer
// relies on.

use uketab_wasm::fretboard::{self, FretPosition};
use uketab_wasm::models::{Beat, Chord, MelodyNote, RomanNumeral, Song, HIDDEN_STRING};
use uketab_wasm::tablature::{compute_melody_position, tablature_events, PlaybackSession};
use uketab_wasm::theory::Key;
use uketab_wasm::Pitch;

fn note(id: &str, pitch: &str, start: i32, preferred: Option<i8>) -> MelodyNote {
    MelodyNote {
        id: id.to_string(),
        pitch: pitch.parse().unwrap(),
        start_time: Beat::new(start, 1),
        duration: Beat::new(1, 1),
        preferred_string: preferred,
    }
}

fn chord(id: &str, roman: RomanNumeral, start: i32, duration: i32) -> Chord {
    Chord {
        id: id.to_string(),
        roman,
        start_time: Beat::new(start, 1),
        duration: Beat::new(duration, 1),
    }
}

#[test]
fn reentrant_tuning_scenario() {
    // Scenario A: string 2 is the open C string, string 0 the A string
    assert_eq!(fretboard::pitch_at_fret(2, 0), Some("C4".parse().unwrap()));
    assert_eq!(fretboard::pitch_at_fret(0, 3), Some("C5".parse().unwrap()));
}

#[test]
fn events_cover_melody_and_chords() {
    let notes = vec![note("m1", "C5", 0, None), note("m2", "E5", 2, None)];
    let chords = vec![chord("c1", RomanNumeral::I, 0, 2), chord("c2", RomanNumeral::V, 2, 2)];
    let events = tablature_events(&notes, &chords, Key::CMajor);

    // both melody notes render
    assert!(events
        .iter()
        .any(|e| e.pitch == "C5".parse::<Pitch>().unwrap() && e.start_time == Beat::new(0, 1)));
    assert!(events
        .iter()
        .any(|e| e.pitch == "E5".parse::<Pitch>().unwrap() && e.start_time == Beat::new(2, 1)));
    // both chords contribute voicing events at their own start times
    assert!(events.iter().filter(|e| e.start_time == Beat::new(0, 1)).count() > 1);
    assert!(events.iter().filter(|e| e.start_time == Beat::new(2, 1)).count() > 1);
}

#[test]
fn events_are_sorted_and_in_range() {
    let notes = vec![
        note("m1", "A4", 3, None),
        note("m2", "C5", 0, None),
        note("m3", "G5", 1, Some(0)),
    ];
    let chords = vec![
        chord("c1", RomanNumeral::IV, 2, 2),
        chord("c2", RomanNumeral::I, 0, 2),
        chord("c3", RomanNumeral::VI, 1, 1),
    ];
    let events = tablature_events(&notes, &chords, Key::DMajor);
    assert!(!events.is_empty());

    for pair in events.windows(2) {
        assert!(pair[0].start_time <= pair[1].start_time);
    }
    for e in &events {
        assert!(e.string_index < 4);
    }
}

#[test]
fn repeated_computation_is_identical() {
    let notes = vec![note("m1", "C5", 0, None), note("m2", "F4", 1, Some(1)), note("m3", "A4", 2, None)];
    let chords = vec![chord("c1", RomanNumeral::II, 0, 4)];
    let first = tablature_events(&notes, &chords, Key::BbMajor);
    for _ in 0..10 {
        assert_eq!(first, tablature_events(&notes, &chords, Key::BbMajor));
    }
}

#[test]
fn hidden_note_is_absent_from_events_but_kept_in_song() {
    // Scenario E
    let mut song = Song::new(Key::CMajor);
    song.add_note(note("m1", "C5", 0, Some(HIDDEN_STRING)));

    let hidden = song.note("m1").unwrap();
    assert_eq!(compute_melody_position(hidden), None);
    assert_eq!(song.melody_notes().len(), 1);

    let events = tablature_events(song.melody_notes(), song.chords(), song.key());
    assert!(events.is_empty());
}

#[test]
fn unplayable_melody_is_omitted_without_error() {
    // B3 is below every string; D3 is out of range entirely
    let notes = vec![note("m1", "B3", 0, None), note("m2", "D3", 1, None)];
    let events = tablature_events(&notes, &[], Key::CMajor);
    assert!(events.is_empty());
}

#[test]
fn forced_string_overrides_best_position() {
    let auto = note("m1", "C5", 0, None);
    let forced = note("m2", "C5", 0, Some(3));
    assert_eq!(compute_melody_position(&auto), Some(FretPosition { string: 0, fret: 3 }));
    assert_eq!(compute_melody_position(&forced), Some(FretPosition { string: 3, fret: 5 }));
}

#[test]
fn playback_session_walks_the_event_list() {
    let notes = vec![note("m1", "C5", 0, None), note("m2", "A4", 2, None)];
    let events = tablature_events(&notes, &[], Key::CMajor);
    assert_eq!(events.len(), 2);

    let mut session = PlaybackSession::new();
    let first = session.poll(&events, Beat::new(0, 1));
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].pitch, "C5".parse::<Pitch>().unwrap());

    // nothing new until the second note is due
    assert!(session.poll(&events, Beat::new(3, 2)).is_empty());
    let second = session.poll(&events, Beat::new(2, 1));
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].pitch, "A4".parse::<Pitch>().unwrap());

    // a fresh session replays from the top
    let mut replay = PlaybackSession::new();
    assert_eq!(replay.poll(&events, Beat::new(4, 1)).len(), 2);
}
