//! Whole-song transposition on key change
//!
//! When the host switches the song key, every melody note shifts by the
//! semitone distance between the two tonics, octave carried along.

use crate::models::MelodyNote;

use super::Key;

/// Signed semitone distance from `from`'s tonic to `to`'s tonic
pub fn semitones_between(from: Key, to: Key) -> i32 {
    to.tonic_semitone() - from.tonic_semitone()
}

/// Transpose all notes in place by the tonic delta between two keys
pub fn transpose_notes(notes: &mut [MelodyNote], from: Key, to: Key) {
    let semitones = semitones_between(from, to);
    if semitones == 0 {
        return;
    }
    for note in notes {
        note.pitch = note.pitch.transposed(semitones);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::{NoteName, Pitch};
    use crate::models::Beat;

    fn note(pitch: Pitch) -> MelodyNote {
        MelodyNote {
            id: "n".to_string(),
            pitch,
            start_time: Beat::new(0, 1),
            duration: Beat::new(1, 1),
            preferred_string: None,
        }
    }

    #[test]
    fn test_semitone_deltas() {
        assert_eq!(semitones_between(Key::CMajor, Key::GMajor), 7);
        assert_eq!(semitones_between(Key::GMajor, Key::CMajor), -7);
        assert_eq!(semitones_between(Key::DMajor, Key::DMajor), 0);
    }

    #[test]
    fn test_transpose_notes_carries_octave() {
        let mut notes = vec![note(Pitch::new(NoteName::A, 4)), note(Pitch::new(NoteName::C, 4))];
        transpose_notes(&mut notes, Key::CMajor, Key::GMajor);
        assert_eq!(notes[0].pitch, Pitch::new(NoteName::E, 5));
        assert_eq!(notes[1].pitch, Pitch::new(NoteName::G, 4));
    }

    #[test]
    fn test_transpose_round_trip() {
        let original = Pitch::new(NoteName::E, 4);
        let mut notes = vec![note(original)];
        transpose_notes(&mut notes, Key::CMajor, Key::GbMajor);
        transpose_notes(&mut notes, Key::GbMajor, Key::CMajor);
        assert_eq!(notes[0].pitch, original);
    }
}
