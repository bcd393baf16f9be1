//! Line and label overlays drawn on top of the nodes. Each overlay is a bus
//! [Subscriber](crate::bus::Subscriber) that rebuilds its geometry from live node
//! positions whenever they move.
pub mod clock;
pub mod connections;
pub mod interval;
pub mod live_chord;
pub mod outline;
pub mod shape;

use crate::color::Color;
use crate::geometry::Point3;

/// An open polyline with one color per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
  pub points: Vec<Point3>,
  pub colors: Vec<Color>,
}

impl Polyline {
  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }
}

/// A single colored line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
  pub from: Point3,
  pub to: Point3,
  pub from_color: Color,
  pub to_color: Color,
}
