use crate::bus::{Event, Subscriber};
use crate::geometry::{on_circle, Angle, Float, Point3};
use crate::layout::ViewMode;

/// Just outside the outermost concentric ring.
const CLOCK_RADIUS: Float = 26.0;
const CLOCK_HEIGHT: Float = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct ClockLabel {
  pub text: String,
  pub position: Point3,
}

/// Pitch class numbers 0-11 around the concentric view, like a clock face.
/// The labels are fixed: they do not turn with the root offset.
pub struct ClockOverlay {
  enabled: bool,
  mode: ViewMode,
  labels: Vec<ClockLabel>,
}

impl Default for ClockOverlay {
  fn default() -> Self {
    let labels = (0..12)
      .map(|i| ClockLabel {
        text: i.to_string(),
        position: on_circle(CLOCK_RADIUS, Angle::Degrees(-(i as Float) * 30.0), CLOCK_HEIGHT),
      })
      .collect();
    ClockOverlay {
      enabled: false,
      mode: ViewMode::default(),
      labels,
    }
  }
}

impl ClockOverlay {
  pub fn new() -> ClockOverlay {
    ClockOverlay::default()
  }

  pub fn labels(&self) -> &[ClockLabel] {
    &self.labels
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  /// Shown only when switched on and the view is concentric.
  pub fn is_visible(&self) -> bool {
    self.enabled && self.mode == ViewMode::Concentric
  }
}

impl Subscriber for ClockOverlay {
  fn on_event(&mut self, event: &Event, _nodes: &mut crate::node::NodeSet) -> Vec<Event> {
    match event {
      Event::ClockToggle => self.enabled = !self.enabled,
      Event::ViewModeChanged { new, .. } => self.mode = *new,
      _ => {}
    }
    vec![]
  }
}
