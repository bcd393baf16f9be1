use error_stack::{IntoReport, Result, ResultExt};
use serde::Serialize;

use spiral_core::color::ToHexColorStr;
use spiral_core::config::SpiralConfig;
use spiral_core::error::SpiralError;
use spiral_core::overlay::outline::Outline;
use spiral_core::recognize::{parse_root, DetectedChord};
use spiral_core::session::Session;

#[derive(Serialize)]
struct ChordReport {
  selected: Vec<String>,
  midi: Vec<u8>,
  chord: Option<DetectedChord>,
  outline_color: String,
  outline: Vec<[f64; 3]>,
}

pub fn run_chord(
  config: &SpiralConfig,
  root: &str,
  name: &str,
  inversion: usize,
  octave: i32,
  json: bool,
) -> Result<(), SpiralError> {
  let root_index = parse_root(root).attach_printable("chord root")?;

  let mut session = Session::new(config.clone());
  let pitches = session
    .apply_chord(root_index, name, octave, inversion)
    .attach_printable_lazy(|| format!("chord {root} {name}"))?;

  let live = session.live_chord();
  let live = live.borrow();
  let outline = match live.outline() {
    Some(Outline::Line { from, to }) => vec![from.to_array(), to.to_array()],
    Some(Outline::Polygon { points, .. }) => points.iter().map(|p| p.to_array()).collect(),
    None => vec![],
  };
  let report = ChordReport {
    selected: pitches.iter().map(|p| p.full_name.clone()).collect(),
    midi: pitches.iter().map(|p| p.midi).collect(),
    chord: session.chord(),
    outline_color: live.line_color().to_hex_color(),
    outline,
  };

  if json {
    let out = serde_json::to_string_pretty(&report)
      .into_report()
      .change_context(SpiralError::OutputError)?;
    println!("{out}");
    return Ok(());
  }

  match report.chord {
    Some(chord) => println!("{}: {chord}", report.selected.join(" ")),
    None => println!("{}: no chord", report.selected.join(" ")),
  }
  println!("outline {} through {} points", report.outline_color, report.outline.len());
  Ok(())
}
