mod chord;
mod demo;
mod detect;
mod layout;
mod shape;
mod simulate;

use clap::Subcommand;
use error_stack::Result;
use spiral_core::config::SpiralConfig;
use spiral_core::error::SpiralError;

use self::{
  chord::run_chord,
  demo::{play_demo, run_demo},
  detect::run_detect,
  layout::run_layout,
  shape::run_shape,
  simulate::run_simulate,
};

#[derive(Subcommand)]
pub enum CliCommand {
  /// Prints the position of every pitch in a view mode
  Layout {
    /// spiral, concentric or fifths
    #[clap(long, default_value = "spiral")]
    mode: String,

    /// Root offset in semitones; any integer, reduced modulo 12
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    root: i32,

    #[clap(long)]
    json: bool,
  },

  /// Names the chord formed by some notes, e.g. `detect C4 E4 G4` or `detect 60 64 67`
  Detect {
    #[clap(required = true)]
    notes: Vec<String>,
  },

  /// Highlights a scale or chord shape, e.g. `shape D 0,2,3,5,7,9,10` or `shape D dorian`
  Shape {
    /// Pitch class name or 0-11
    root: String,

    /// Comma separated semitone offsets from the root, or a scale or chord name
    intervals: String,

    /// scale or chord
    #[clap(long, default_value = "scale")]
    kind: String,

    #[clap(long)]
    json: bool,
  },

  /// Selects a chord voicing and names it, e.g. `chord A minor --inversion 1`
  Chord {
    /// Pitch class name or 0-11
    root: String,

    /// Chord name, e.g. Maj7 or "Half-Dim 7th"
    name: String,

    /// Clamped to the chord's highest inversion
    #[clap(long, default_value_t = 0)]
    inversion: usize,

    #[clap(long, default_value_t = 4, allow_hyphen_values = true)]
    octave: i32,

    #[clap(long)]
    json: bool,
  },

  /// Prints the piano-to-spiral demo at a point in its timeline
  Demo {
    /// 0.0 ..= 1.0
    #[clap(long, default_value_t = 0.0)]
    progress: f64,

    /// Play from `progress` to the end instead of printing one frame
    #[clap(long)]
    play: bool,

    #[clap(long, default_value_t = 60)]
    fps: u32,

    #[clap(long)]
    json: bool,
  },

  /// Runs a view transition on a real frame clock until it settles
  Simulate {
    #[clap(long, default_value = "concentric")]
    mode: String,

    #[clap(long, allow_hyphen_values = true)]
    root: Option<i32>,

    #[clap(long, default_value_t = 60)]
    fps: u32,
  },
}

impl CliCommand {
  pub async fn run(&self, config: &SpiralConfig) -> Result<(), SpiralError> {
    match self {
      Self::Layout { mode, root, json } => run_layout(config, mode, *root, *json),

      Self::Detect { notes } => run_detect(notes),

      Self::Shape {
        root,
        intervals,
        kind,
        json,
      } => run_shape(config, root, intervals, kind, *json),

      Self::Chord {
        root,
        name,
        inversion,
        octave,
        json,
      } => run_chord(config, root, name, *inversion, *octave, *json),

      Self::Demo {
        progress,
        play: true,
        fps,
        ..
      } => play_demo(config, *progress, *fps).await,

      Self::Demo { progress, json, .. } => run_demo(config, *progress, *json),

      Self::Simulate { mode, root, fps } => run_simulate(config, mode, *root, *fps).await,
    }
  }
}
