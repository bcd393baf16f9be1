use std::fmt::Display;

use crate::camera::CameraPreset;
use crate::geometry::Point3;
use crate::layout::{RootOffset, ViewMode};

/// Effects are requests from the state machine to "do something" in the outside world.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
  /// Tell everyone the layout changed.
  AnnounceMode { prev: ViewMode, new: ViewMode },

  MoveCamera(CameraPreset),

  /// Take the octave rings down while nodes are moving.
  ClearRings,

  /// Capture current node positions and compute targets for `mode` and `root`,
  /// then feed a [Begin](super::actions::Action::Begin) action back in.
  StartTransition { mode: ViewMode, root: RootOffset },

  /// Write these positions to the nodes, in catalog order.
  Reposition(Vec<Point3>),

  PositionsUpdated,

  /// Rebuild the octave rings for `mode` around the settled nodes.
  RebuildRings(ViewMode),
}

impl Display for Effect {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use Effect::*;
    match self {
      AnnounceMode { prev, new } => write!(f, "AnnounceMode({prev} -> {new})"),
      MoveCamera(preset) => write!(f, "MoveCamera({preset})"),
      ClearRings => write!(f, "ClearRings"),
      StartTransition { mode, root } => write!(f, "StartTransition({mode}, {root})"),
      Reposition(positions) => write!(f, "Reposition({} nodes)", positions.len()),
      PositionsUpdated => write!(f, "PositionsUpdated"),
      RebuildRings(mode) => write!(f, "RebuildRings({mode})"),
    }
  }
}
