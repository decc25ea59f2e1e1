//! Curated standard chord shapes
//!
//! One fret-per-string array (string 0 = A through string 3 = G) per Roman
//! numeral, taken from the common GCEA chord charts. The table covers the
//! keys the bundled songs actually use; every other key goes through the
//! general search in `voicing`, so the table is a stylistic override cache,
//! never the only path.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::{RomanNumeral, STRING_COUNT};
use crate::theory::Key;

pub type Shape = [u8; STRING_COUNT as usize];

static STANDARD_SHAPES: Lazy<HashMap<(Key, RomanNumeral), Shape>> = Lazy::new(|| {
    use RomanNumeral::*;
    let mut table = HashMap::new();

    // C major: C Dm Em F G Am Bdim
    table.insert((Key::CMajor, I), [3, 0, 0, 0]);
    table.insert((Key::CMajor, II), [0, 1, 2, 2]);
    table.insert((Key::CMajor, III), [2, 3, 4, 0]);
    table.insert((Key::CMajor, IV), [0, 1, 0, 2]);
    table.insert((Key::CMajor, V), [2, 3, 2, 0]);
    table.insert((Key::CMajor, VI), [0, 0, 0, 2]);
    table.insert((Key::CMajor, VII), [2, 1, 2, 4]);

    // G major: G Am Bm C D Em F#dim
    table.insert((Key::GMajor, I), [2, 3, 2, 0]);
    table.insert((Key::GMajor, II), [0, 0, 0, 2]);
    table.insert((Key::GMajor, III), [2, 2, 2, 4]);
    table.insert((Key::GMajor, IV), [3, 0, 0, 0]);
    table.insert((Key::GMajor, V), [0, 2, 2, 2]);
    table.insert((Key::GMajor, VI), [2, 3, 4, 0]);
    table.insert((Key::GMajor, VII), [0, 2, 0, 2]);

    // F major: F Gm Am Bb C Dm Edim
    table.insert((Key::FMajor, I), [0, 1, 0, 2]);
    table.insert((Key::FMajor, II), [1, 3, 2, 0]);
    table.insert((Key::FMajor, III), [0, 0, 0, 2]);
    table.insert((Key::FMajor, IV), [1, 1, 2, 3]);
    table.insert((Key::FMajor, V), [3, 0, 0, 0]);
    table.insert((Key::FMajor, VI), [0, 1, 2, 2]);
    table.insert((Key::FMajor, VII), [1, 0, 4, 0]);

    table
});

/// Standard shape for a chord, if this key is in the curated table
pub fn standard_shape(key: Key, roman: RomanNumeral) -> Option<Shape> {
    STANDARD_SHAPES.get(&(key, roman)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretboard;

    #[test]
    fn test_table_coverage() {
        use RomanNumeral::*;
        for roman in [I, II, III, IV, V, VI, VII] {
            assert!(standard_shape(Key::CMajor, roman).is_some());
            assert!(standard_shape(Key::GMajor, roman).is_some());
            assert!(standard_shape(Key::FMajor, roman).is_some());
            assert!(standard_shape(Key::DMajor, roman).is_none());
        }
    }

    #[test]
    fn test_every_shape_sounds_its_triad() {
        for (&(key, roman), shape) in STANDARD_SHAPES.iter() {
            let triad = key.triad(roman);
            for (string, &fret) in shape.iter().enumerate() {
                let sounded = fretboard::pitch_at_fret(string as u8, fret)
                    .unwrap_or_else(|| panic!("unplayable shape for {key} {roman}"));
                assert!(
                    triad.contains(&sounded.name),
                    "{key} {roman}: string {string} fret {fret} sounds {sounded}, not in triad"
                );
            }
        }
    }
}
