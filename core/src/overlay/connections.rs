use std::time::Duration;

use crate::animation::{ease_in_out_cubic, progress};
use crate::bus::{Event, Subscriber};
use crate::color::{lerp_color, pitch_class_color};
use crate::geometry::lerp_point;
use crate::layout::{traversal_order, ViewMode};
use crate::node::NodeSet;
use crate::overlay::Polyline;

/// The line through every node, chromatic or by fifths depending on the mode.
///
/// Spiral and fifths share node positions, so switching between them would not move
/// anything. Instead the line itself morphs: each vertex slides from its slot in the
/// old ordering to its slot in the new one.
pub struct ConnectingLine {
  mode: ViewMode,
  line: Polyline,
  morph: Option<Morph>,
  duration: Duration,
}

struct Morph {
  from: Polyline,
  to: Polyline,
  elapsed: Duration,
}

/// The line through `nodes` in the traversal order for `mode`.
pub fn build_line(mode: ViewMode, nodes: &NodeSet) -> Polyline {
  let (points, colors) = traversal_order(mode)
    .into_iter()
    .filter_map(|midi| nodes.get(midi))
    .map(|n| (n.position, pitch_class_color(n.pitch.index())))
    .unzip();
  Polyline { points, colors }
}

impl ConnectingLine {
  pub fn new(duration: Duration, nodes: &NodeSet) -> ConnectingLine {
    let mode = ViewMode::default();
    ConnectingLine {
      mode,
      line: build_line(mode, nodes),
      morph: None,
      duration,
    }
  }

  pub fn line(&self) -> &Polyline {
    &self.line
  }

  pub fn is_morphing(&self) -> bool {
    self.morph.is_some()
  }

  fn rebuild(&mut self, nodes: &NodeSet) {
    self.line = build_line(self.mode, nodes);
  }

  fn advance(&mut self, elapsed: Duration, nodes: &NodeSet) {
    let Some(morph) = self.morph.as_mut() else {
      return;
    };
    morph.elapsed += elapsed;
    let t = progress(morph.elapsed, self.duration);
    if t >= 1.0 {
      self.morph = None;
      self.rebuild(nodes);
      return;
    }

    let e = ease_in_out_cubic(t);
    let points = morph
      .from
      .points
      .iter()
      .zip(morph.to.points.iter())
      .map(|(a, b)| lerp_point(*a, *b, e))
      .collect();
    let colors = morph
      .from
      .colors
      .iter()
      .zip(morph.to.colors.iter())
      .map(|(a, b)| lerp_color(*a, *b, e as f32))
      .collect();
    self.line = Polyline { points, colors };
  }
}

impl Subscriber for ConnectingLine {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::ViewModeChanged { prev, new } => {
        self.mode = *new;
        if *prev != ViewMode::Concentric && *new != ViewMode::Concentric {
          self.morph = Some(Morph {
            from: build_line(*prev, nodes),
            to: build_line(*new, nodes),
            elapsed: Duration::ZERO,
          });
        } else {
          // nodes are about to move; positionsUpdated keeps the line on them
          self.morph = None;
          self.rebuild(nodes);
        }
      }
      Event::PositionsUpdated if self.morph.is_none() => self.rebuild(nodes),
      Event::Tick(elapsed) => self.advance(*elapsed, nodes),
      _ => {}
    }
    vec![]
  }
}
