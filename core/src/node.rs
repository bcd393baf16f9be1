use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{self, Color};
use crate::config::SpiralConfig;
use crate::geometry::{Float, Point3};
use crate::layout::{self, RootOffset, ViewMode};
use crate::pitch::{self, Pitch};

/// The single look a node takes, resolved from its flags by priority:
/// sounding > selected > hovered > highlighted > plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
  Sounding,
  Selected,
  Hovered,
  Highlighted,
  Plain,
}

impl VisualStyle {
  pub fn resolve(flags: &NodeFlags) -> VisualStyle {
    if flags.sounding {
      VisualStyle::Sounding
    } else if flags.selected {
      VisualStyle::Selected
    } else if flags.hovered {
      VisualStyle::Hovered
    } else if flags.highlighted {
      VisualStyle::Highlighted
    } else {
      VisualStyle::Plain
    }
  }

  pub fn emissive(&self) -> Color {
    color::from_hex_u32(match self {
      VisualStyle::Sounding => color::SOUNDING,
      VisualStyle::Selected => color::WHITE,
      VisualStyle::Hovered => color::HOVERED,
      VisualStyle::Highlighted => color::HIGHLIGHTED,
      VisualStyle::Plain => color::BLACK,
    })
  }

  pub fn emissive_intensity(&self) -> Float {
    match self {
      VisualStyle::Sounding => 1.2,
      VisualStyle::Selected => 1.0,
      VisualStyle::Hovered => 0.5,
      VisualStyle::Highlighted => 0.3,
      VisualStyle::Plain => 0.0,
    }
  }

  pub fn scale(&self) -> Float {
    match self {
      VisualStyle::Sounding => 1.35,
      VisualStyle::Selected => 1.3,
      VisualStyle::Hovered => 1.1,
      VisualStyle::Highlighted => 1.15,
      VisualStyle::Plain => 1.0,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
  pub sounding: bool,
  pub selected: bool,
  pub hovered: bool,
  pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
  /// Full name with octave, e.g. `C#4`.
  #[default]
  Letters,
  /// Chromatic index, e.g. `1`.
  Numbers,
}

impl Display for LabelMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      LabelMode::Letters => write!(f, "letters"),
      LabelMode::Numbers => write!(f, "numbers"),
    }
  }
}

impl FromStr for LabelMode {
  type Err = crate::error::SpiralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "letters" => Ok(LabelMode::Letters),
      "numbers" => Ok(LabelMode::Numbers),
      _ => Err(crate::error::SpiralError::InvalidLabelMode(s.to_string())),
    }
  }
}

/// The mutable visual entity for one pitch.
#[derive(Debug, Clone)]
pub struct Node {
  pub pitch: &'static Pitch,
  pub position: Point3,
  flags: NodeFlags,
  style: VisualStyle,
}

impl Node {
  pub fn new(pitch: &'static Pitch, position: Point3) -> Node {
    let flags = NodeFlags::default();
    Node {
      pitch,
      position,
      flags,
      style: VisualStyle::resolve(&flags),
    }
  }

  pub fn midi(&self) -> u8 {
    self.pitch.midi
  }

  pub fn flags(&self) -> NodeFlags {
    self.flags
  }

  pub fn style(&self) -> VisualStyle {
    self.style
  }

  /// Sphere radius; black keys are drawn smaller.
  pub fn radius(&self) -> Float {
    if self.pitch.is_black() {
      0.25
    } else {
      0.35
    }
  }

  pub fn color(&self) -> Color {
    color::pitch_class_color(self.pitch.index())
  }

  pub fn label(&self, mode: LabelMode) -> String {
    match mode {
      LabelMode::Letters => self.pitch.full_name.clone(),
      LabelMode::Numbers => self.pitch.index().to_string(),
    }
  }

  fn update(&mut self, f: impl FnOnce(&mut NodeFlags)) {
    f(&mut self.flags);
    self.style = VisualStyle::resolve(&self.flags);
  }

  pub fn set_sounding(&mut self, on: bool) {
    self.update(|f| f.sounding = on);
  }

  pub fn set_selected(&mut self, on: bool) {
    self.update(|f| f.selected = on);
  }

  pub fn set_hovered(&mut self, on: bool) {
    self.update(|f| f.hovered = on);
  }

  pub fn set_highlighted(&mut self, on: bool) {
    self.update(|f| f.highlighted = on);
  }
}

/// Every node, one per catalog pitch, in catalog order.
#[derive(Debug, Clone)]
pub struct NodeSet {
  nodes: Vec<Node>,
  pub label_mode: LabelMode,
}

impl NodeSet {
  /// Creates the nodes on the spiral with root offset 0.
  pub fn new(config: &SpiralConfig) -> NodeSet {
    let nodes = pitch::all()
      .iter()
      .map(|p| {
        Node::new(
          p,
          layout::position(p, ViewMode::Spiral, RootOffset::default(), config),
        )
      })
      .collect();
    NodeSet {
      nodes,
      label_mode: LabelMode::default(),
    }
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn get(&self, midi: u8) -> Option<&Node> {
    pitch::by_midi(midi as i32).and_then(|p| self.nodes.get(p.catalog_index()))
  }

  pub fn get_mut(&mut self, midi: u8) -> Option<&mut Node> {
    pitch::by_midi(midi as i32).and_then(move |p| self.nodes.get_mut(p.catalog_index()))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Node> {
    self.nodes.iter()
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
    self.nodes.iter_mut()
  }

  pub fn positions(&self) -> Vec<Point3> {
    self.nodes.iter().map(|n| n.position).collect()
  }

  pub fn position_of(&self, midi: u8) -> Option<Point3> {
    self.get(midi).map(|n| n.position)
  }

  /// Writes positions in catalog order. Extra or missing entries are ignored.
  pub fn set_positions(&mut self, positions: &[Point3]) {
    for (node, pos) in self.nodes.iter_mut().zip(positions) {
      node.position = *pos;
    }
  }

  pub fn sounding(&self) -> Vec<u8> {
    self.nodes.iter().filter(|n| n.flags.sounding).map(|n| n.midi()).collect()
  }

  pub fn selected(&self) -> Vec<u8> {
    self.nodes.iter().filter(|n| n.flags.selected).map(|n| n.midi()).collect()
  }

  pub fn highlighted(&self) -> Vec<u8> {
    self.nodes.iter().filter(|n| n.flags.highlighted).map(|n| n.midi()).collect()
  }
}
