use error_stack::Context;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiralError {
  InvalidViewMode(String),
  InvalidShapeKind(String),
  InvalidLabelMode(String),
  InvalidPitchName(String),
  MidiOutOfRange(i32),
  InvalidInterval(String),
  UnknownChord(String),
  UnknownScale(String),
  InvalidCameraPreset(String),

  ConfigReadError,
  ConfigParseError,
  InvalidConfigValue {
    section: String,
    key: String,
    value: String,
  },

  OutputError,
}

impl Context for SpiralError {}

impl Display for SpiralError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use SpiralError::*;
    match self {
      InvalidViewMode(s) => write!(
        f,
        "invalid view mode '{s}'. Expected one of: spiral, concentric, fifths"
      ),

      InvalidShapeKind(s) => write!(f, "invalid shape kind '{s}'. Expected scale or chord"),

      InvalidLabelMode(s) => write!(f, "invalid label mode '{s}'. Expected letters or numbers"),

      InvalidPitchName(s) => write!(f, "unable to parse pitch name '{s}'"),

      MidiOutOfRange(n) => write!(f, "midi note {n} is out of range. Valid range is 21 ..= 108"),

      InvalidInterval(s) => write!(f, "invalid interval '{s}'"),

      UnknownChord(s) => write!(f, "unknown chord '{s}'"),

      UnknownScale(s) => write!(f, "unknown scale or chord '{s}'"),

      InvalidCameraPreset(s) => write!(
        f,
        "invalid camera preset '{s}'. Expected one of: default, top, side, concentric"
      ),

      ConfigReadError => write!(f, "failed to read configuration file"),

      ConfigParseError => write!(f, "failed to parse configuration"),

      InvalidConfigValue {
        section,
        key,
        value,
      } => write!(f, "invalid value for [{section}] {key}: '{value}'"),

      OutputError => write!(f, "failed to serialize output"),
    }
  }
}
