use serde::Serialize;

use super::{by_midi, Pitch};

/// A named chord as semitone offsets from its root, starting with 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChordTemplate {
  pub name: &'static str,
  pub intervals: &'static [u8],
}

const fn chord(name: &'static str, intervals: &'static [u8]) -> ChordTemplate {
  ChordTemplate { name, intervals }
}

/// Chord table in recognition order. When a pitch set matches several entries,
/// the earlier one wins.
pub const CHORDS: [ChordTemplate; 20] = [
  chord("Major", &[0, 4, 7]),
  chord("Minor", &[0, 3, 7]),
  chord("Diminished", &[0, 3, 6]),
  chord("Augmented", &[0, 4, 8]),
  chord("Maj7", &[0, 4, 7, 11]),
  chord("Min7", &[0, 3, 7, 10]),
  chord("Dom7", &[0, 4, 7, 10]),
  chord("Dim7", &[0, 3, 6, 9]),
  chord("Min-Maj7", &[0, 3, 7, 11]),
  chord("Aug7", &[0, 4, 8, 10]),
  chord("Half-Dim 7th", &[0, 3, 6, 10]),
  chord("6th", &[0, 4, 7, 9]),
  chord("Min6", &[0, 3, 7, 9]),
  chord("Sus2", &[0, 2, 7]),
  chord("Sus4", &[0, 5, 7]),
  chord("Add9", &[0, 2, 4, 7]),
  chord("Maj9", &[0, 4, 7, 11, 14]),
  chord("Min9", &[0, 3, 7, 10, 14]),
  chord("Dom9", &[0, 4, 7, 10, 14]),
  chord("Power (5th)", &[0, 7]),
];

pub fn find_chord(name: &str) -> Option<&'static ChordTemplate> {
  CHORDS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

impl ChordTemplate {
  /// Highest inversion available, one less than the note count.
  pub fn max_inversion(&self) -> usize {
    self.intervals.len().saturating_sub(1)
  }

  /// MIDI numbers of this chord rooted at chromatic index `root` in `base_octave`,
  /// with the lowest note moved up an octave `inversion` times. Sorted ascending;
  /// values may fall outside the piano range.
  ///
  /// ```
  /// use spiral_core::pitch::chords::find_chord;
  /// let major = find_chord("Major").unwrap();
  /// assert_eq!(major.voicing(0, 4, 0), vec![60, 64, 67]);
  /// assert_eq!(major.voicing(0, 4, 1), vec![64, 67, 72]);
  /// assert_eq!(major.voicing(0, 4, 2), vec![67, 72, 76]);
  /// ```
  pub fn voicing(&self, root: u8, base_octave: i32, inversion: usize) -> Vec<i32> {
    let base = (base_octave + 1) * 12 + (root % 12) as i32;
    let mut notes: Vec<i32> = self.intervals.iter().map(|i| base + *i as i32).collect();
    for _ in 0..inversion {
      notes.sort_unstable();
      if let Some(lowest) = notes.first_mut() {
        *lowest += 12;
      }
    }
    notes.sort_unstable();
    notes
  }

  /// Like [voicing](Self::voicing), but resolved to catalog pitches with
  /// out-of-range notes dropped.
  pub fn pitches(&self, root: u8, base_octave: i32, inversion: usize) -> Vec<&'static Pitch> {
    in_range(&self.voicing(root, base_octave, inversion))
  }
}

/// Resolves MIDI numbers to pitches, skipping anything outside 21 ..= 108.
pub fn in_range(midi: &[i32]) -> Vec<&'static Pitch> {
  midi.iter().filter_map(|m| by_midi(*m)).collect()
}
