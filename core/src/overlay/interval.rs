use crate::bus::{Event, Subscriber};
use crate::color::pitch_class_color;
use crate::node::NodeSet;
use crate::overlay::Segment;
use crate::pitch::intervals::Interval;

/// Joins every pitch to the pitch a chosen interval above it.
#[derive(Default)]
pub struct IntervalOverlay {
  interval: Option<Interval>,
  segments: Vec<Segment>,
}

impl IntervalOverlay {
  pub fn new() -> IntervalOverlay {
    IntervalOverlay::default()
  }

  pub fn interval(&self) -> Option<Interval> {
    self.interval
  }

  pub fn segments(&self) -> &[Segment] {
    &self.segments
  }

  fn rebuild(&mut self, nodes: &NodeSet) {
    self.segments = match self.interval {
      None => vec![],
      Some(interval) => nodes
        .iter()
        .filter_map(|low| {
          let high = nodes.get(low.midi().checked_add(interval.semitones)?)?;
          Some(Segment {
            from: low.position,
            to: high.position,
            from_color: pitch_class_color(low.pitch.index()),
            to_color: pitch_class_color(high.pitch.index()),
          })
        })
        .collect(),
    };
  }
}

impl Subscriber for IntervalOverlay {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::IntervalSelect(interval) => {
        self.interval = *interval;
        self.rebuild(nodes);
      }
      Event::PositionsUpdated if self.interval.is_some() => self.rebuild(nodes),
      _ => {}
    }
    vec![]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SpiralConfig;

  #[test]
  fn fifths_join_every_pitch_seven_semitones_up() {
    let mut overlay = IntervalOverlay::new();
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    let fifth = Interval::by_semitones(7).unwrap();
    overlay.on_event(&Event::IntervalSelect(Some(fifth)), &mut nodes);
    assert_eq!(overlay.segments().len(), 88 - 7);
    let first = overlay.segments()[0];
    assert_eq!(first.from, nodes.position_of(21).unwrap());
    assert_eq!(first.to, nodes.position_of(28).unwrap());
  }

  #[test]
  fn deselecting_clears_the_lines() {
    let mut overlay = IntervalOverlay::new();
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    overlay.on_event(&Event::IntervalSelect(Interval::by_semitones(12)), &mut nodes);
    assert_eq!(overlay.segments().len(), 76);
    overlay.on_event(&Event::IntervalSelect(None), &mut nodes);
    assert!(overlay.segments().is_empty());
  }
}
