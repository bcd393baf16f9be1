use std::str::FromStr;

use serde::Serialize;

use crate::error::SpiralError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
  pub name: &'static str,
  pub short_name: &'static str,
  pub semitones: u8,
  /// Overlay line color as `0xRRGGBB`.
  pub color: u32,
}

const fn interval(name: &'static str, short_name: &'static str, semitones: u8, color: u32) -> Interval {
  Interval {
    name,
    short_name,
    semitones,
    color,
  }
}

pub const INTERVALS: [Interval; 12] = [
  interval("Minor 2nd", "m2", 1, 0xff4444),
  interval("Major 2nd", "M2", 2, 0xff8800),
  interval("Minor 3rd", "m3", 3, 0xffcc00),
  interval("Major 3rd", "M3", 4, 0x88ff00),
  interval("Perfect 4th", "P4", 5, 0x00ff88),
  interval("Tritone", "TT", 6, 0x00ffff),
  interval("Perfect 5th", "P5", 7, 0x4488ff),
  interval("Minor 6th", "m6", 8, 0x8844ff),
  interval("Major 6th", "M6", 9, 0xcc44ff),
  interval("Minor 7th", "m7", 10, 0xff44cc),
  interval("Major 7th", "M7", 11, 0xff4488),
  interval("Octave", "P8", 12, 0xffffff),
];

impl Interval {
  pub fn by_semitones(semitones: u8) -> Option<Interval> {
    INTERVALS.iter().copied().find(|i| i.semitones == semitones)
  }
}

impl FromStr for Interval {
  type Err = SpiralError;

  /// Accepts the short name (`P5`, case-sensitive since `m3` ≠ `M3`) or a semitone count.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
      return Interval::by_semitones(n).ok_or_else(|| SpiralError::InvalidInterval(s.to_string()));
    }
    INTERVALS
      .iter()
      .copied()
      .find(|i| i.short_name == s || i.name.eq_ignore_ascii_case(s))
      .ok_or_else(|| SpiralError::InvalidInterval(s.to_string()))
  }
}
