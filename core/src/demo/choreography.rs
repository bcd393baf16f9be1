use std::f64::consts::TAU;
use std::time::Duration;

use serde::Serialize;

use crate::animation::ease_in_out_cubic;
use crate::camera::CameraPose;
use crate::config::SpiralConfig;
use crate::demo::piano::{piano_layout, PianoKey};
use crate::geometry::{
  cartesian_to_polar, lerp, lerp_point, polar_to_cartesian, Angle, Float, Point3,
};
use crate::layout::{self, RootOffset, ViewMode};
use crate::pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
  /// Keys wind from the piano into a flat spiral around the lowest key.
  Winding,
  /// The flat spiral opens into concentric rings while boxes fade into spheres.
  Opening,
}

/// Where one key is and how it looks at a given moment of the demo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyFrame {
  pub midi: u8,
  pub position: [Float; 3],
  pub rotation_y: Float,
  pub scale: Float,
  pub box_opacity: Float,
  pub sphere_opacity: Float,
  pub label_opacity: Float,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoFrame {
  pub progress: Float,
  pub phase: Phase,
  pub keys: Vec<KeyFrame>,
  pub line_opacity: Float,
  pub camera_position: [Float; 3],
  pub camera_target: [Float; 3],
}

/// Per-key plan, computed once.
#[derive(Debug, Clone)]
struct KeyPlan {
  key: PianoKey,
  index: usize,
  r_piano: Float,
  theta_piano: Float,
  r_spiral: Float,
  theta_spiral: Float,
  flat_spiral: Point3,
  concentric: Point3,
}

/// The piano → spiral → concentric animation, as a pure function of progress.
#[derive(Debug, Clone)]
pub struct Choreography {
  keys: Vec<KeyPlan>,
  anchor: Point3,
  stagger_ms: Float,
  roll_ms: Float,
  phase1_ms: Float,
  total_ms: Float,
  phase1: Duration,
  total: Duration,
  cameras: [CameraPose; 3],
}

impl Choreography {
  pub fn new(config: &SpiralConfig) -> Choreography {
    let layout = piano_layout();
    let anchor = layout.first().map(|k| k.position).unwrap_or(Point3::ZERO);
    let anchor = Point3::new(anchor.x, 0.0, anchor.z);
    let last = (layout.len().max(2) - 1) as Float;

    let keys: Vec<KeyPlan> = layout
      .into_iter()
      .enumerate()
      .map(|(index, key)| {
        let (r_piano, theta_piano) = cartesian_to_polar(anchor, key.position);
        let theta_spiral = index as Float * TAU / 12.0;
        let r_spiral = lerp(
          config.demo_inner_radius,
          config.demo_outer_radius,
          index as Float / last,
        );
        let concentric = pitch::by_midi(key.midi as i32)
          .map(|p| layout::position(p, ViewMode::Concentric, RootOffset::default(), config))
          .unwrap_or(Point3::ZERO);
        KeyPlan {
          key,
          index,
          r_piano,
          theta_piano: theta_piano.as_radians(),
          r_spiral,
          theta_spiral,
          flat_spiral: polar_to_cartesian(anchor, r_spiral, Angle::Radians(theta_spiral), 0.0),
          concentric,
        }
      })
      .collect();

    let phase1 = Duration::from_millis(
      keys.len().saturating_sub(1) as u64 * config.demo_stagger_ms + config.demo_roll_ms,
    );
    let total = phase1 + Duration::from_millis(config.demo_phase2_ms);

    let cameras = [
      CameraPose {
        position: Point3::new(0.0, 28.0, 0.01),
        target: Point3::ZERO,
      },
      CameraPose {
        position: Point3::new(anchor.x, 35.0, 0.01),
        target: Point3::new(anchor.x, 0.0, 0.0),
      },
      CameraPose {
        position: Point3::new(0.0, 45.0, 0.01),
        target: Point3::ZERO,
      },
    ];

    Choreography {
      keys,
      anchor,
      stagger_ms: config.demo_stagger_ms as Float,
      roll_ms: config.demo_roll_ms as Float,
      phase1_ms: phase1.as_millis() as Float,
      total_ms: total.as_millis() as Float,
      phase1,
      total,
      cameras,
    }
  }

  /// `(keys − 1) · stagger + roll + phase 2`.
  pub fn total(&self) -> Duration {
    self.total
  }

  pub fn phase1(&self) -> Duration {
    self.phase1
  }

  pub fn anchor(&self) -> Point3 {
    self.anchor
  }

  /// Full demo state at `progress` (clamped to 0 ..= 1). Depends on nothing else.
  pub fn frame_at(&self, progress: Float) -> DemoFrame {
    let progress = progress.clamp(0.0, 1.0);
    let t_ms = progress * self.total_ms;

    if t_ms <= self.phase1_ms {
      let keys = self.keys.iter().map(|k| self.winding(k, t_ms)).collect();
      let cam_t = if self.phase1_ms > 0.0 {
        ease_in_out_cubic(t_ms / self.phase1_ms)
      } else {
        1.0
      };
      let (position, target) = self.camera_between(0, cam_t);
      DemoFrame {
        progress,
        phase: Phase::Winding,
        keys,
        line_opacity: 1.0,
        camera_position: position.to_array(),
        camera_target: target.to_array(),
      }
    } else {
      let phase2_ms = self.total_ms - self.phase1_ms;
      let t2 = ((t_ms - self.phase1_ms) / phase2_ms).min(1.0);
      let e2 = ease_in_out_cubic(t2);
      let keys = self.keys.iter().map(|k| Self::opening(k, e2)).collect();
      let (position, target) = self.camera_between(1, e2);
      DemoFrame {
        progress,
        phase: Phase::Opening,
        keys,
        line_opacity: (1.0 - e2 * 2.0).max(0.0),
        camera_position: position.to_array(),
        camera_target: target.to_array(),
      }
    }
  }

  fn camera_between(&self, from: usize, t: Float) -> (Point3, Point3) {
    let a = self.cameras[from];
    let b = self.cameras[from + 1];
    (lerp_point(a.position, b.position, t), lerp_point(a.target, b.target, t))
  }

  fn winding(&self, k: &KeyPlan, t_ms: Float) -> KeyFrame {
    let delay = k.index as Float * self.stagger_ms;
    let raw = if self.roll_ms > 0.0 {
      ((t_ms - delay) / self.roll_ms).clamp(0.0, 1.0)
    } else if t_ms >= delay {
      1.0
    } else {
      0.0
    };
    let e = ease_in_out_cubic(raw);

    let theta = lerp(k.theta_piano, k.theta_spiral, e);
    let r = lerp(k.r_piano, k.r_spiral, e);
    let position = polar_to_cartesian(
      self.anchor,
      r,
      Angle::Radians(theta),
      k.key.position.y * (1.0 - e),
    );

    KeyFrame {
      midi: k.key.midi,
      position: position.to_array(),
      rotation_y: -(theta - k.theta_piano),
      scale: 1.0 - e * 0.3,
      box_opacity: 1.0,
      sphere_opacity: 0.0,
      label_opacity: 0.85,
    }
  }

  fn opening(k: &KeyPlan, e2: Float) -> KeyFrame {
    let box_opacity = (1.0 - e2 * 1.8).max(0.0);
    KeyFrame {
      midi: k.key.midi,
      position: lerp_point(k.flat_spiral, k.concentric, e2).to_array(),
      rotation_y: -(k.theta_spiral - k.theta_piano) * (1.0 - e2),
      scale: 0.7 + e2 * 0.3,
      box_opacity,
      sphere_opacity: ((e2 - 0.2) / 0.6).clamp(0.0, 1.0),
      label_opacity: box_opacity * 0.85,
    }
  }
}
