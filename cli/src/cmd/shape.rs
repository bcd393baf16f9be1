use error_stack::{IntoReport, Result, ResultExt};
use serde::Serialize;

use spiral_core::bus::Event;
use spiral_core::config::SpiralConfig;
use spiral_core::error::SpiralError;
use spiral_core::overlay::outline::Outline;
use spiral_core::recognize::{ShapeKind, ShapeSpec};
use spiral_core::session::Session;

#[derive(Serialize)]
struct ShapeReport {
  root: u8,
  intervals: Vec<u8>,
  kind: ShapeKind,
  highlighted: Vec<String>,
  anchored: Vec<String>,
  outline: Vec<[f64; 3]>,
}

pub fn run_shape(
  config: &SpiralConfig,
  root: &str,
  intervals: &str,
  kind: &str,
  json: bool,
) -> Result<(), SpiralError> {
  let kind: ShapeKind = kind
    .parse()
    .into_report()
    .attach_printable("shape --kind")?;
  let spec = ShapeSpec::parse(root, intervals, kind)
    .attach_printable_lazy(|| format!("shape {root} {intervals}"))?;

  let mut session = Session::new(config.clone());
  session.emit(Event::ShapeShow(spec.clone()));

  let highlighted = session
    .nodes()
    .highlighted()
    .into_iter()
    .filter_map(|midi| session.nodes().get(midi))
    .map(|n| n.pitch.full_name.clone())
    .collect();
  let outline = match session.shape().borrow().outline() {
    Some(Outline::Line { from, to }) => vec![from.to_array(), to.to_array()],
    Some(Outline::Polygon { points, .. }) => points.iter().map(|p| p.to_array()).collect(),
    None => vec![],
  };
  let report = ShapeReport {
    root: spec.root,
    intervals: spec.intervals.clone(),
    kind: spec.kind,
    highlighted,
    anchored: spec
      .anchored(config.shape_reference_octave)
      .iter()
      .map(|p| p.full_name.clone())
      .collect(),
    outline,
  };

  if json {
    let out = serde_json::to_string_pretty(&report)
      .into_report()
      .change_context(SpiralError::OutputError)?;
    println!("{out}");
    return Ok(());
  }

  println!(
    "{} {:?} ({}): {} pitches highlighted",
    report.root, report.intervals, report.kind, report.highlighted.len()
  );
  println!("  {}", report.highlighted.join(" "));
  println!("outline through {}", report.anchored.join(" -> "));
  for [x, y, z] in report.outline.iter() {
    println!("  ({x:>7.3}, {y:>7.3}, {z:>7.3})");
  }
  Ok(())
}
