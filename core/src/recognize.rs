//! Chord detection over sets of pitches, and pitch-class shapes for highlighting.
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use error_stack::{report, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SpiralError;
use crate::pitch::chords::{find_chord, CHORDS};
use crate::pitch::scales::find_scale;
use crate::pitch::{self, Pitch, PitchClass};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
  #[default]
  Scale,
  Chord,
}

impl FromStr for ShapeKind {
  type Err = SpiralError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "scale" => Ok(ShapeKind::Scale),
      "chord" => Ok(ShapeKind::Chord),
      _ => Err(SpiralError::InvalidShapeKind(s.to_string())),
    }
  }
}

impl Display for ShapeKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ShapeKind::Scale => write!(f, "scale"),
      ShapeKind::Chord => write!(f, "chord"),
    }
  }
}

/// A scale or chord to highlight: semitone offsets from a root pitch class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSpec {
  pub root: u8,
  pub intervals: Vec<u8>,
  pub kind: ShapeKind,
}

impl ShapeSpec {
  pub fn new(root: u8, intervals: Vec<u8>, kind: ShapeKind) -> ShapeSpec {
    ShapeSpec {
      root: root % 12,
      intervals,
      kind,
    }
  }

  /// Parses a root (pitch class name or 0-11) and either a comma separated list of
  /// intervals, e.g. `("D", "0,3,7")`, or a scale or chord name, e.g. `("D", "dorian")`.
  ///
  /// A name is looked up in the table matching `kind` first, then in the other one;
  /// the returned kind is the table it was found in.
  pub fn parse(root: &str, intervals: &str, kind: ShapeKind) -> Result<ShapeSpec, SpiralError> {
    let root = parse_root(root)?;
    match parse_intervals(intervals) {
      Ok(intervals) => Ok(ShapeSpec::new(root, intervals, kind)),
      Err(e) if intervals.contains(',') => Err(e),
      Err(_) => ShapeSpec::named(root, intervals, kind),
    }
  }

  /// Shape for a named scale or chord rooted at chromatic index `root`.
  ///
  /// ```
  /// use spiral_core::recognize::{ShapeKind, ShapeSpec};
  /// let blues = ShapeSpec::named(9, "Blues", ShapeKind::Scale).unwrap();
  /// assert_eq!(blues.intervals, vec![0, 3, 5, 6, 7, 10]);
  /// let maj7 = ShapeSpec::named(0, "maj7", ShapeKind::Scale).unwrap();
  /// assert_eq!(maj7.kind, ShapeKind::Chord);
  /// ```
  pub fn named(root: u8, name: &str, kind: ShapeKind) -> Result<ShapeSpec, SpiralError> {
    let scale = || find_scale(name).map(|s| (s.intervals, ShapeKind::Scale));
    let chord = || find_chord(name.trim()).map(|c| (c.intervals, ShapeKind::Chord));
    let found = match kind {
      ShapeKind::Scale => scale().or_else(chord),
      ShapeKind::Chord => chord().or_else(scale),
    };
    match found {
      Some((intervals, kind)) => Ok(ShapeSpec::new(root, intervals.to_vec(), kind)),
      None => Err(report!(SpiralError::UnknownScale(name.to_string()))),
    }
  }

  /// Chromatic indices covered by this shape in every octave.
  pub fn pitch_classes(&self) -> BTreeSet<u8> {
    self
      .intervals
      .iter()
      .map(|i| ((self.root as u32 + *i as u32) % 12) as u8)
      .collect()
  }

  /// Does `pitch` belong to this shape in any octave?
  pub fn contains(&self, pitch: &Pitch) -> bool {
    self.pitch_classes().contains(&pitch.index())
  }

  /// One concrete instance of the shape, rooted in `reference_octave`, with pitches
  /// off the keyboard omitted.
  pub fn anchored(&self, reference_octave: i32) -> Vec<&'static Pitch> {
    let base = (reference_octave + 1) * 12 + self.root as i32;
    self
      .intervals
      .iter()
      .filter_map(|i| pitch::by_midi(base + *i as i32))
      .collect()
  }
}

/// Chromatic index of a root given as a pitch class name ("F#") or an integer,
/// reduced modulo 12.
pub fn parse_root(root: &str) -> Result<u8, SpiralError> {
  match root.trim().parse::<i32>() {
    Ok(n) => Ok(n.rem_euclid(12) as u8),
    Err(_) => Ok(PitchClass::from_str(root).map_err(|e| report!(e))?.index()),
  }
}

fn parse_intervals(intervals: &str) -> Result<Vec<u8>, SpiralError> {
  intervals
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse::<u8>()
        .map_err(|_| report!(SpiralError::InvalidInterval(s.to_string())))
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedChord {
  pub name: &'static str,
  pub root: PitchClass,
  /// Display name of `root`, e.g. "F#".
  pub root_name: &'static str,
}

impl DetectedChord {
  pub fn new(name: &'static str, root: PitchClass) -> DetectedChord {
    DetectedChord {
      name,
      root,
      root_name: root.name(),
    }
  }
}

impl Display for DetectedChord {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.root_name, self.name)
  }
}

/// Names the chord formed by a set of MIDI numbers, ignoring octave and doubling.
///
/// Every distinct pitch class is tried as the root, lowest first; for each root the
/// chord table is scanned in order and the first exact match wins.
///
/// ```
/// use spiral_core::recognize::detect_chord;
/// let chord = detect_chord([64, 67, 72]).unwrap();
/// assert_eq!(chord.name, "Major");
/// assert_eq!(chord.root_name, "C");
/// assert!(detect_chord([60]).is_none());
/// ```
pub fn detect_chord<I>(midi: I) -> Option<DetectedChord>
where
  I: IntoIterator<Item = u8>,
{
  let classes: BTreeSet<u8> = midi.into_iter().map(|m| m % 12).collect();
  if classes.len() < 2 {
    return None;
  }

  for root in classes.iter() {
    let mut offsets: Vec<u8> = classes.iter().map(|c| (c + 12 - root) % 12).collect();
    offsets.sort_unstable();

    if let Some(template) = CHORDS.iter().find(|t| t.intervals == offsets.as_slice()) {
      let detected = DetectedChord::new(template.name, PitchClass::from_index(*root));
      debug!("detected chord {detected} from pitch classes {classes:?}");
      return Some(detected);
    }
  }
  None
}
