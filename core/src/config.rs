//! Geometry and timing constants, with optional overrides from an INI file.
//!
//! ```ini
//! [layout]
//! helix_radius = 6.0
//! y_per_semitone = 0.5
//!
//! [animation]
//! transition_ms = 1000
//!
//! [demo]
//! stagger_ms = 22
//! ```
use std::path::Path;
use std::str::FromStr;

use error_stack::{Context, IntoReport, Result, ResultExt};
use ini::{Ini, Properties};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SpiralError;
use crate::geometry::Float;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralConfig {
  /// Radius of the helix in spiral and fifths modes.
  pub helix_radius: Float,
  /// Vertical rise of the helix per semitone.
  pub y_per_semitone: Float,
  /// Ring radius of octave 1 in concentric mode.
  pub concentric_base_radius: Float,
  /// Radius added per octave in concentric mode.
  pub ring_spacing: Float,
  pub ring_segments: usize,
  /// Octave in which explicit shapes are anchored for outline drawing.
  pub shape_reference_octave: i32,

  pub transition_ms: u64,

  pub demo_stagger_ms: u64,
  pub demo_roll_ms: u64,
  pub demo_phase2_ms: u64,
  pub demo_inner_radius: Float,
  pub demo_outer_radius: Float,
}

impl Default for SpiralConfig {
  fn default() -> Self {
    SpiralConfig {
      helix_radius: 6.0,
      y_per_semitone: 0.5,
      concentric_base_radius: 3.0,
      ring_spacing: 3.0,
      ring_segments: 64,
      shape_reference_octave: 4,
      transition_ms: 1000,
      demo_stagger_ms: 22,
      demo_roll_ms: 2000,
      demo_phase2_ms: 2500,
      demo_inner_radius: 0.3,
      demo_outer_radius: 24.0,
    }
  }
}

/// Overwrites `target` with the parsed value of `key`, if the key is present.
fn read_value<T>(
  props: &Properties,
  section: &str,
  key: &str,
  target: &mut T,
) -> Result<(), SpiralError>
where
  T: FromStr,
  T::Err: Context,
{
  if let Some(raw) = props.get(key) {
    *target = raw
      .trim()
      .parse::<T>()
      .into_report()
      .change_context(SpiralError::InvalidConfigValue {
        section: section.to_string(),
        key: key.to_string(),
        value: raw.to_string(),
      })?;
    debug!("config override [{section}] {key} = {raw}");
  }
  Ok(())
}

impl SpiralConfig {
  /// Reads overrides from INI source text. Keys that are absent keep their default values.
  pub fn from_ini_str<S: AsRef<str>>(source: S) -> Result<SpiralConfig, SpiralError> {
    let ini = Ini::load_from_str(source.as_ref())
      .into_report()
      .change_context(SpiralError::ConfigParseError)?;

    let mut config = SpiralConfig::default();

    if let Some(props) = ini.section(Some("layout")) {
      read_value(props, "layout", "helix_radius", &mut config.helix_radius)?;
      read_value(props, "layout", "y_per_semitone", &mut config.y_per_semitone)?;
      read_value(props, "layout", "concentric_base_radius", &mut config.concentric_base_radius)?;
      read_value(props, "layout", "ring_spacing", &mut config.ring_spacing)?;
      read_value(props, "layout", "ring_segments", &mut config.ring_segments)?;
      read_value(props, "layout", "shape_reference_octave", &mut config.shape_reference_octave)?;
    }

    if let Some(props) = ini.section(Some("animation")) {
      read_value(props, "animation", "transition_ms", &mut config.transition_ms)?;
    }

    if let Some(props) = ini.section(Some("demo")) {
      read_value(props, "demo", "stagger_ms", &mut config.demo_stagger_ms)?;
      read_value(props, "demo", "roll_ms", &mut config.demo_roll_ms)?;
      read_value(props, "demo", "phase2_ms", &mut config.demo_phase2_ms)?;
      read_value(props, "demo", "inner_radius", &mut config.demo_inner_radius)?;
      read_value(props, "demo", "outer_radius", &mut config.demo_outer_radius)?;
    }

    if config.ring_segments == 0 {
      return Err(error_stack::report!(SpiralError::InvalidConfigValue {
        section: "layout".to_string(),
        key: "ring_segments".to_string(),
        value: "0".to_string(),
      }));
    }

    Ok(config)
  }

  pub fn from_ini_file<P: AsRef<Path>>(path: P) -> Result<SpiralConfig, SpiralError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
      .into_report()
      .change_context(SpiralError::ConfigReadError)
      .attach_printable_lazy(|| format!("path: {}", path.display()))?;
    Self::from_ini_str(source).attach_printable_lazy(|| format!("path: {}", path.display()))
  }
}
