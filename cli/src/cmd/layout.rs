use error_stack::{IntoReport, Result, ResultExt};
use serde::Serialize;

use spiral_core::color::ToHexColorStr;
use spiral_core::config::SpiralConfig;
use spiral_core::error::SpiralError;
use spiral_core::layout::{self, RootOffset, ViewMode};
use spiral_core::node::Node;
use spiral_core::pitch;

#[derive(Serialize)]
struct NodeRow {
  midi: u8,
  name: String,
  frequency: f64,
  position: [f64; 3],
  radius: f64,
  color: String,
}

impl NodeRow {
  fn new(node: &Node) -> NodeRow {
    NodeRow {
      midi: node.midi(),
      name: node.pitch.full_name.clone(),
      frequency: node.pitch.frequency,
      position: node.position.to_array(),
      radius: node.radius(),
      color: node.color().to_hex_color(),
    }
  }
}

pub fn run_layout(config: &SpiralConfig, mode: &str, root: i32, json: bool) -> Result<(), SpiralError> {
  let mode: ViewMode = mode
    .parse()
    .into_report()
    .attach_printable("layout --mode")?;
  let root = RootOffset::new(root);
  log::debug!("laying out {} pitches: mode {mode}, root {root}", pitch::all().len());

  let rows: Vec<NodeRow> = pitch::all()
    .iter()
    .map(|p| NodeRow::new(&Node::new(p, layout::position(p, mode, root, config))))
    .collect();

  if json {
    let out = serde_json::to_string_pretty(&rows)
      .into_report()
      .change_context(SpiralError::OutputError)?;
    println!("{out}");
    return Ok(());
  }

  for row in rows.iter() {
    let [x, y, z] = row.position;
    println!(
      "{:>3} {:<4} {:>9.2} Hz  ({x:>7.3}, {y:>7.3}, {z:>7.3})  {}",
      row.midi, row.name, row.frequency, row.color
    );
  }
  Ok(())
}
