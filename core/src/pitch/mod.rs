//! The fixed catalog of the 88 piano pitches, A0 (MIDI 21) through C8 (MIDI 108).
pub mod chords;
pub mod intervals;
pub mod scales;

use std::fmt::Display;
use std::str::FromStr;

use error_stack::{report, Result};
use lazy_static::lazy_static;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::SpiralError;
use crate::geometry::{Angle, Float};

pub const MIDI_LOW: u8 = 21;
pub const MIDI_HIGH: u8 = 108;
pub const PITCH_COUNT: usize = (MIDI_HIGH - MIDI_LOW + 1) as usize;

/// Vertical rise per semitone of the canonical helix.
pub const DEFAULT_Y_PER_SEMITONE: Float = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, Serialize, Deserialize)]
pub enum PitchClass {
  C = 0,
  CSharp,
  D,
  DSharp,
  E,
  F,
  FSharp,
  G,
  GSharp,
  A,
  ASharp,
  B,
}

const PITCH_CLASS_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

impl PitchClass {
  /// Pitch class for a chromatic index, wrapping modulo 12.
  pub fn from_index(index: u8) -> PitchClass {
    // index % 12 is always a valid discriminant
    PitchClass::from_u8(index % 12).unwrap_or(PitchClass::C)
  }

  pub fn index(&self) -> u8 {
    *self as u8
  }

  pub fn name(&self) -> &'static str {
    PITCH_CLASS_NAMES[self.index() as usize]
  }

  pub fn is_black(&self) -> bool {
    matches!(self.index(), 1 | 3 | 6 | 8 | 10)
  }
}

impl Display for PitchClass {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for PitchClass {
  type Err = SpiralError;

  /// Accepts sharps (`C#`) and flats (`Db`), case-insensitive on the letter.
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(|| SpiralError::InvalidPitchName(s.to_string()))?;
    let natural: i32 = match letter.to_ascii_uppercase() {
      'C' => 0,
      'D' => 2,
      'E' => 4,
      'F' => 5,
      'G' => 7,
      'A' => 9,
      'B' => 11,
      _ => return Err(SpiralError::InvalidPitchName(s.to_string())),
    };
    let accidental: i32 = match chars.as_str() {
      "" => 0,
      "#" => 1,
      "b" => -1,
      _ => return Err(SpiralError::InvalidPitchName(s.to_string())),
    };
    Ok(PitchClass::from_index((natural + accidental).rem_euclid(12) as u8))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pitch {
  pub midi: u8,
  pub class: PitchClass,
  pub octave: i32,
  /// e.g. `C#4`
  pub full_name: String,
  pub frequency: Float,
}

impl Pitch {
  fn new(midi: u8) -> Pitch {
    let class = PitchClass::from_index(midi % 12);
    let octave = (midi / 12) as i32 - 1;
    Pitch {
      midi,
      class,
      octave,
      full_name: format!("{}{}", class.name(), octave),
      frequency: 440.0 * (2.0 as Float).powf((midi as Float - 69.0) / 12.0),
    }
  }

  /// Chromatic index 0-11, C = 0.
  pub fn index(&self) -> u8 {
    self.class.index()
  }

  pub fn name(&self) -> &'static str {
    self.class.name()
  }

  pub fn is_black(&self) -> bool {
    self.class.is_black()
  }

  /// Position around the helix. C sits at angle zero and each semitone turns
  /// a further 30° in the negative direction.
  pub fn helix_angle(&self) -> Angle {
    Angle::Degrees(-(self.index() as Float) * 30.0)
  }

  /// Height along the helix with the default rise per semitone.
  pub fn height(&self) -> Float {
    self.height_with(DEFAULT_Y_PER_SEMITONE)
  }

  pub fn height_with(&self, y_per_semitone: Float) -> Float {
    (self.midi - MIDI_LOW) as Float * y_per_semitone
  }

  /// Index of this pitch within [all], 0 for A0.
  pub fn catalog_index(&self) -> usize {
    (self.midi - MIDI_LOW) as usize
  }
}

impl Display for Pitch {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.full_name)
  }
}

lazy_static! {
  static ref PITCHES: Vec<Pitch> = (MIDI_LOW..=MIDI_HIGH).map(Pitch::new).collect();
}

/// Every pitch in the catalog, ascending by MIDI number.
pub fn all() -> &'static [Pitch] {
  &PITCHES
}

/// Looks up a pitch by MIDI number. Returns `None` outside 21 ..= 108.
///
/// ```
/// use spiral_core::pitch;
/// assert_eq!(pitch::by_midi(60).map(|p| p.full_name.as_str()), Some("C4"));
/// assert!(pitch::by_midi(20).is_none());
/// assert!(pitch::by_midi(109).is_none());
/// ```
pub fn by_midi(midi: i32) -> Option<&'static Pitch> {
  if midi < MIDI_LOW as i32 || midi > MIDI_HIGH as i32 {
    return None;
  }
  PITCHES.get((midi - MIDI_LOW as i32) as usize)
}

/// Parses either a MIDI number (`60`) or a note name with octave (`C4`, `F#2`, `Bb3`).
pub fn parse(s: &str) -> Result<&'static Pitch, SpiralError> {
  let s = s.trim();
  let midi = match s.parse::<i32>() {
    Ok(n) => n,
    Err(_) => {
      let split = s
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .ok_or_else(|| report!(SpiralError::InvalidPitchName(s.to_string())))?;
      let (name, octave) = s.split_at(split);
      let class = PitchClass::from_str(name).map_err(|e| report!(e))?;
      let octave: i32 = octave
        .parse()
        .map_err(|_| report!(SpiralError::InvalidPitchName(s.to_string())))?;
      // Cb and B# cross the octave boundary; the letter's octave is what the user wrote
      let natural_octave_shift = match name {
        n if n.eq_ignore_ascii_case("cb") => -1,
        n if n.eq_ignore_ascii_case("b#") => 1,
        _ => 0,
      };
      (octave + 1 + natural_octave_shift) * 12 + class.index() as i32
    }
  };
  by_midi(midi).ok_or_else(|| report!(SpiralError::MidiOutOfRange(midi)))
}
