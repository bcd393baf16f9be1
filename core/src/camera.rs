//! Named camera poses. The camera controller itself lives outside this crate
//! and applies whichever preset is announced on the bus.
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpiralError;
use crate::geometry::Point3;
use crate::layout::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPreset {
  Default,
  Top,
  Side,
  Concentric,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
  pub position: Point3,
  pub target: Point3,
}

impl CameraPreset {
  pub fn pose(&self) -> CameraPose {
    let (position, target) = match self {
      CameraPreset::Default => (Point3::new(14.0, 25.0, 14.0), Point3::new(0.0, 20.0, 0.0)),
      CameraPreset::Top => (Point3::new(0.0, 55.0, 0.01), Point3::new(0.0, 20.0, 0.0)),
      CameraPreset::Side => (Point3::new(25.0, 22.0, 0.0), Point3::new(0.0, 22.0, 0.0)),
      // nudged off the vertical axis so the look-at has a defined up direction
      CameraPreset::Concentric => (Point3::new(0.0, 45.0, 0.01), Point3::ZERO),
    };
    CameraPose { position, target }
  }

  /// Preset announced when the view switches to `mode`.
  pub fn for_mode(mode: ViewMode) -> CameraPreset {
    match mode {
      ViewMode::Concentric => CameraPreset::Concentric,
      ViewMode::Spiral | ViewMode::Fifths => CameraPreset::Default,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      CameraPreset::Default => "default",
      CameraPreset::Top => "top",
      CameraPreset::Side => "side",
      CameraPreset::Concentric => "concentric",
    }
  }
}

impl Display for CameraPreset {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for CameraPreset {
  type Err = SpiralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "default" => Ok(CameraPreset::Default),
      "top" => Ok(CameraPreset::Top),
      "side" => Ok(CameraPreset::Side),
      "concentric" => Ok(CameraPreset::Concentric),
      _ => Err(SpiralError::InvalidCameraPreset(s.to_string())),
    }
  }
}
