//! A flat 88-key piano keyboard, centred on the origin along +x.
use crate::geometry::{Float, Point3};
use crate::pitch;

pub const WHITE_KEY_WIDTH: Float = 0.8;
pub const WHITE_KEY_HEIGHT: Float = 0.25;
pub const WHITE_KEY_DEPTH: Float = 3.5;
pub const BLACK_KEY_WIDTH: Float = 0.5;
pub const BLACK_KEY_HEIGHT: Float = 0.45;
pub const BLACK_KEY_DEPTH: Float = 2.3;
pub const KEY_GAP: Float = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PianoKey {
  pub midi: u8,
  pub is_black: bool,
  /// Centre of the key box.
  pub position: Point3,
  /// Width, height, depth.
  pub size: Point3,
}

/// Every key of the piano, ascending by MIDI number.
pub fn piano_layout() -> Vec<PianoKey> {
  let white: Vec<u8> = pitch::all()
    .iter()
    .filter(|p| !p.is_black())
    .map(|p| p.midi)
    .collect();
  let pitch_width = WHITE_KEY_WIDTH + KEY_GAP;
  let total_width = white.len() as Float * pitch_width - KEY_GAP;
  let offset = -total_width / 2.0;
  let white_x = |midi: u8| {
    white
      .iter()
      .position(|m| *m == midi)
      .map(|i| offset + i as Float * pitch_width + WHITE_KEY_WIDTH / 2.0)
  };

  pitch::all()
    .iter()
    .map(|p| {
      if p.is_black() {
        // black keys sit between their white neighbours, set back from the front edge
        let x = match (white_x(p.midi - 1), white_x(p.midi + 1)) {
          (Some(left), Some(right)) => (left + right) / 2.0,
          (Some(left), None) => left + WHITE_KEY_WIDTH / 2.0 + KEY_GAP / 2.0,
          _ => offset,
        };
        PianoKey {
          midi: p.midi,
          is_black: true,
          position: Point3::new(
            x,
            BLACK_KEY_HEIGHT / 2.0,
            -(WHITE_KEY_DEPTH - BLACK_KEY_DEPTH) / 2.0,
          ),
          size: Point3::new(BLACK_KEY_WIDTH, BLACK_KEY_HEIGHT, BLACK_KEY_DEPTH),
        }
      } else {
        PianoKey {
          midi: p.midi,
          is_black: false,
          position: Point3::new(white_x(p.midi).unwrap_or(offset), WHITE_KEY_HEIGHT / 2.0, 0.0),
          size: Point3::new(WHITE_KEY_WIDTH, WHITE_KEY_HEIGHT, WHITE_KEY_DEPTH),
        }
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keyboard_is_centred() {
    let keys = piano_layout();
    assert_eq!(keys.len(), 88);
    assert_eq!(keys.iter().filter(|k| !k.is_black).count(), 52);
    let first = keys[0].position.x;
    let last = keys[87].position.x;
    assert!((first + last).abs() < 1e-9);
    assert!(first < 0.0);
  }

  #[test]
  fn black_keys_sit_between_and_behind_white_keys() {
    let keys = piano_layout();
    // A#0 between A0 and B0
    let (a0, a_sharp0, b0) = (keys[0], keys[1], keys[2]);
    assert!(a_sharp0.is_black);
    assert!((a_sharp0.position.x - (a0.position.x + b0.position.x) / 2.0).abs() < 1e-12);
    assert!((a_sharp0.position.z + 0.6).abs() < 1e-12);
    assert_eq!(a_sharp0.position.y, 0.225);
    assert_eq!(a0.position.y, 0.125);
  }
}
