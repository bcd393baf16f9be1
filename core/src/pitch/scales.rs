use serde::Serialize;

/// A named scale as semitone offsets from its root, starting with 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleTemplate {
  pub name: &'static str,
  pub intervals: &'static [u8],
}

const fn scale(name: &'static str, intervals: &'static [u8]) -> ScaleTemplate {
  ScaleTemplate { name, intervals }
}

pub const SCALES: [ScaleTemplate; 15] = [
  scale("Major", &[0, 2, 4, 5, 7, 9, 11]),
  scale("Natural Minor", &[0, 2, 3, 5, 7, 8, 10]),
  scale("Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
  scale("Melodic Minor", &[0, 2, 3, 5, 7, 9, 11]),
  scale("Ionian", &[0, 2, 4, 5, 7, 9, 11]),
  scale("Dorian", &[0, 2, 3, 5, 7, 9, 10]),
  scale("Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
  scale("Lydian", &[0, 2, 4, 6, 7, 9, 11]),
  scale("Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
  scale("Aeolian", &[0, 2, 3, 5, 7, 8, 10]),
  scale("Locrian", &[0, 1, 3, 5, 6, 8, 10]),
  scale("Major Pentatonic", &[0, 2, 4, 7, 9]),
  scale("Minor Pentatonic", &[0, 3, 5, 7, 10]),
  scale("Blues", &[0, 3, 5, 6, 7, 10]),
  scale("Chromatic", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
];

/// Case-insensitive lookup. Dashes and underscores match spaces, so
/// `natural-minor` finds "Natural Minor".
pub fn find_scale(name: &str) -> Option<&'static ScaleTemplate> {
  let wanted = name.trim().replace(['-', '_'], " ");
  SCALES.iter().find(|s| s.name.eq_ignore_ascii_case(&wanted))
}
