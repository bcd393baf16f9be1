//! Pure functions placing pitches in 3D for each view mode.
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SpiralConfig;
use crate::error::SpiralError;
use crate::geometry::{on_circle, ring_points, Angle, Float, Point3};
use crate::pitch::{self, Pitch};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
  /// One continuous helix, rising by semitone.
  #[default]
  Spiral,
  /// One flat ring per octave, octaves nested outward.
  Concentric,
  /// Spiral positions, with the connecting line walking each octave by fifths.
  Fifths,
}

impl ViewMode {
  pub fn name(&self) -> &'static str {
    match self {
      ViewMode::Spiral => "spiral",
      ViewMode::Concentric => "concentric",
      ViewMode::Fifths => "fifths",
    }
  }
}

impl Display for ViewMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for ViewMode {
  type Err = SpiralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "spiral" => Ok(ViewMode::Spiral),
      "concentric" => Ok(ViewMode::Concentric),
      "fifths" => Ok(ViewMode::Fifths),
      _ => Err(SpiralError::InvalidViewMode(s.to_string())),
    }
  }
}

/// Rotation of the whole layout in semitones, always within 0 ..= 11.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootOffset(u8);

impl RootOffset {
  /// ```
  /// use spiral_core::layout::RootOffset;
  /// assert_eq!(RootOffset::new(14), RootOffset::new(2));
  /// assert_eq!(RootOffset::new(-1).value(), 11);
  /// ```
  pub fn new(semitones: i32) -> RootOffset {
    RootOffset(semitones.rem_euclid(12) as u8)
  }

  pub fn value(&self) -> u8 {
    self.0
  }

  pub fn angle(&self) -> Angle {
    Angle::Degrees(self.0 as Float * 30.0)
  }
}

impl From<u8> for RootOffset {
  fn from(n: u8) -> Self {
    RootOffset::new(n as i32)
  }
}

impl Display for RootOffset {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Chromatic indices in circle-of-fifths order, starting from C.
pub const FIFTHS_ORDER: [u8; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];

/// Position of a chromatic index within [FIFTHS_ORDER].
pub fn fifths_rank(index: u8) -> usize {
  FIFTHS_ORDER
    .iter()
    .position(|i| *i == index % 12)
    .unwrap_or_default()
}

/// Ring radius for an octave in concentric mode.
pub fn concentric_radius(octave: i32, config: &SpiralConfig) -> Float {
  config.concentric_base_radius + (octave - 1) as Float * config.ring_spacing
}

/// Where `pitch` sits in `mode` with the layout rotated by `root`.
pub fn position(pitch: &Pitch, mode: ViewMode, root: RootOffset, config: &SpiralConfig) -> Point3 {
  let angle = pitch.helix_angle() - root.angle();
  match mode {
    ViewMode::Spiral | ViewMode::Fifths => on_circle(
      config.helix_radius,
      angle,
      pitch.height_with(config.y_per_semitone),
    ),
    ViewMode::Concentric => on_circle(concentric_radius(pitch.octave, config), angle, 0.0),
  }
}

/// Target positions for every pitch in the catalog, in catalog order.
pub fn all_positions(mode: ViewMode, root: RootOffset, config: &SpiralConfig) -> Vec<Point3> {
  pitch::all()
    .iter()
    .map(|p| position(p, mode, root, config))
    .collect()
}

/// MIDI numbers in the order the connecting line visits them. Chromatic for
/// spiral and concentric; for fifths, octaves ascend and each octave is walked
/// in fifths order.
pub fn traversal_order(mode: ViewMode) -> Vec<u8> {
  let mut order: Vec<&Pitch> = pitch::all().iter().collect();
  if mode == ViewMode::Fifths {
    order.sort_by_key(|p| (p.octave, fifths_rank(p.index())));
  }
  order.into_iter().map(|p| p.midi).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct OctaveRing {
  pub octave: i32,
  pub radius: Float,
  pub y: Float,
  /// `segments + 1` points, closed.
  pub points: Vec<Point3>,
}

/// One ring per octave present in the catalog. `positions` are the current node
/// positions in catalog order, used to place spiral rings at the height of each
/// octave's C.
pub fn octave_rings(mode: ViewMode, positions: &[Point3], config: &SpiralConfig) -> Vec<OctaveRing> {
  let first = pitch::all().first().map(|p| p.octave).unwrap_or(0);
  let last = pitch::all().last().map(|p| p.octave).unwrap_or(0);

  (first..=last)
    .map(|octave| {
      let (radius, y) = match mode {
        ViewMode::Concentric => (concentric_radius(octave, config), 0.0),
        ViewMode::Spiral | ViewMode::Fifths => {
          let c_midi = (octave + 1) * 12;
          let y = pitch::by_midi(c_midi)
            .and_then(|p| positions.get(p.catalog_index()))
            .map(|pos| pos.y)
            .unwrap_or(0.0);
          (config.helix_radius, y)
        }
      };
      OctaveRing {
        octave,
        radius,
        y,
        points: ring_points(radius, y, config.ring_segments),
      }
    })
    .collect()
}
