use std::collections::BTreeSet;

use crate::bus::{Event, Subscriber};
use crate::color::{from_hex_u32, Color, LIVE_CHORD_LINE};
use crate::node::NodeSet;
use crate::overlay::outline::Outline;
use crate::pitch;
use crate::recognize::{detect_chord, DetectedChord};

/// Names and outlines whatever is sounding or selected right now.
#[derive(Default)]
pub struct LiveChord {
  sounding: BTreeSet<u8>,
  selected: BTreeSet<u8>,
  chord: Option<DetectedChord>,
  outline: Option<Outline>,
}

impl LiveChord {
  pub fn new() -> LiveChord {
    LiveChord::default()
  }

  /// Union of sounding and selected notes, ascending.
  pub fn active(&self) -> Vec<u8> {
    self.sounding.union(&self.selected).copied().collect()
  }

  pub fn chord(&self) -> Option<DetectedChord> {
    self.chord
  }

  pub fn outline(&self) -> Option<&Outline> {
    self.outline.as_ref()
  }

  /// Stroke color of the outline.
  pub fn line_color(&self) -> Color {
    from_hex_u32(LIVE_CHORD_LINE)
  }

  fn rebuild(&mut self, nodes: &NodeSet) {
    let points: Vec<_> = self
      .active()
      .into_iter()
      .filter_map(|m| nodes.position_of(m))
      .collect();
    self.outline = Outline::through(&points);
  }

  fn refresh(&mut self, nodes: &NodeSet) -> Vec<Event> {
    self.chord = detect_chord(self.active());
    self.rebuild(nodes);
    vec![Event::ChordDetected(self.chord)]
  }
}

impl Subscriber for LiveChord {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::NoteOn(midi) if pitch::by_midi(*midi as i32).is_some() => {
        if self.sounding.insert(*midi) {
          return self.refresh(nodes);
        }
      }
      Event::NoteOff(midi) => {
        if self.sounding.remove(midi) {
          return self.refresh(nodes);
        }
      }
      Event::SelectionChanged(pitches) => {
        let selected: BTreeSet<u8> = pitches.iter().map(|p| p.midi).collect();
        if selected != self.selected {
          self.selected = selected;
          return self.refresh(nodes);
        }
      }
      Event::PositionsUpdated if self.active().len() >= 2 => {
        self.rebuild(nodes)
      }
      _ => {}
    }
    vec![]
  }
}
