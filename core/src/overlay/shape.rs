use log::info;

use crate::bus::{Event, Subscriber};
use crate::node::NodeSet;
use crate::overlay::outline::Outline;
use crate::recognize::ShapeSpec;

/// Highlights every node in the active scale or chord shape, and outlines one
/// instance of it anchored in the reference octave.
pub struct ShapeOverlay {
  reference_octave: i32,
  spec: Option<ShapeSpec>,
  outline: Option<Outline>,
}

impl ShapeOverlay {
  pub fn new(reference_octave: i32) -> ShapeOverlay {
    ShapeOverlay {
      reference_octave,
      spec: None,
      outline: None,
    }
  }

  pub fn spec(&self) -> Option<&ShapeSpec> {
    self.spec.as_ref()
  }

  pub fn outline(&self) -> Option<&Outline> {
    self.outline.as_ref()
  }

  fn show(&mut self, spec: &ShapeSpec, nodes: &mut NodeSet) {
    let classes = spec.pitch_classes();
    for node in nodes.iter_mut() {
      node.set_highlighted(classes.contains(&node.pitch.index()));
    }
    info!(
      "showing {} {:?} rooted at {}",
      spec.kind, spec.intervals, spec.root
    );
    self.spec = Some(spec.clone());
    self.rebuild(nodes);
  }

  fn clear(&mut self, nodes: &mut NodeSet) {
    for node in nodes.iter_mut() {
      node.set_highlighted(false);
    }
    self.spec = None;
    self.outline = None;
  }

  fn rebuild(&mut self, nodes: &NodeSet) {
    self.outline = self.spec.as_ref().and_then(|spec| {
      if spec.intervals.len() < 2 {
        return None;
      }
      let points: Vec<_> = spec
        .anchored(self.reference_octave)
        .iter()
        .filter_map(|p| nodes.position_of(p.midi))
        .collect();
      Outline::through(&points)
    });
  }
}

impl Subscriber for ShapeOverlay {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::ShapeShow(spec) => self.show(spec, nodes),
      Event::ShapeClear => self.clear(nodes),
      Event::PositionsUpdated | Event::RootChanged(_) => self.rebuild(nodes),
      _ => {}
    }
    vec![]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SpiralConfig;
  use crate::recognize::ShapeKind;

  fn setup() -> (ShapeOverlay, NodeSet) {
    (ShapeOverlay::new(4), NodeSet::new(&SpiralConfig::default()))
  }

  #[test]
  fn c_major_highlights_every_c_e_and_g() {
    let (mut overlay, mut nodes) = setup();
    let spec = ShapeSpec::new(0, vec![0, 4, 7], ShapeKind::Chord);
    overlay.on_event(&Event::ShapeShow(spec), &mut nodes);
    assert_eq!(nodes.highlighted().len(), 22);
    match overlay.outline() {
      Some(Outline::Polygon { points, .. }) => {
        assert_eq!(points[0], nodes.position_of(60).unwrap());
        assert_eq!(points[1], nodes.position_of(64).unwrap());
        assert_eq!(points[2], nodes.position_of(67).unwrap());
      }
      o => panic!("Unexpected outline: {:?}", o),
    }
  }

  #[test]
  fn new_shape_replaces_old_highlights() {
    let (mut overlay, mut nodes) = setup();
    overlay.on_event(&Event::ShapeShow(ShapeSpec::new(0, vec![0, 4, 7], ShapeKind::Chord)), &mut nodes);
    overlay.on_event(&Event::ShapeShow(ShapeSpec::new(1, vec![0], ShapeKind::Scale)), &mut nodes);
    let highlighted = nodes.highlighted();
    assert!(highlighted.iter().all(|m| m % 12 == 1));
    // a single interval highlights but draws nothing
    assert!(overlay.outline().is_none());
  }

  #[test]
  fn two_intervals_draw_a_line() {
    let (mut overlay, mut nodes) = setup();
    overlay.on_event(&Event::ShapeShow(ShapeSpec::new(7, vec![0, 7], ShapeKind::Chord)), &mut nodes);
    match overlay.outline() {
      Some(Outline::Line { from, to }) => {
        assert_eq!(*from, nodes.position_of(67).unwrap());
        assert_eq!(*to, nodes.position_of(74).unwrap());
      }
      o => panic!("Unexpected outline: {:?}", o),
    }
  }

  #[test]
  fn empty_shape_does_nothing() {
    let (mut overlay, mut nodes) = setup();
    overlay.on_event(&Event::ShapeShow(ShapeSpec::new(0, vec![], ShapeKind::Scale)), &mut nodes);
    assert!(nodes.highlighted().is_empty());
    assert!(overlay.outline().is_none());
  }

  #[test]
  fn clear_removes_highlights_and_outline() {
    let (mut overlay, mut nodes) = setup();
    overlay.on_event(&Event::ShapeShow(ShapeSpec::new(0, vec![0, 4, 7], ShapeKind::Chord)), &mut nodes);
    overlay.on_event(&Event::ShapeClear, &mut nodes);
    assert!(nodes.highlighted().is_empty());
    assert!(overlay.outline().is_none());
    assert!(overlay.spec().is_none());
  }

  #[test]
  fn outline_follows_moving_nodes() {
    let (mut overlay, mut nodes) = setup();
    overlay.on_event(&Event::ShapeShow(ShapeSpec::new(0, vec![0, 4], ShapeKind::Chord)), &mut nodes);
    let moved: Vec<_> = nodes.positions().iter().map(|p| *p + crate::geometry::Point3::ONE).collect();
    nodes.set_positions(&moved);
    overlay.on_event(&Event::PositionsUpdated, &mut nodes);
    match overlay.outline() {
      Some(Outline::Line { from, .. }) => assert_eq!(*from, nodes.position_of(60).unwrap()),
      o => panic!("Unexpected outline: {:?}", o),
    }
  }
}
