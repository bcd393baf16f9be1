//! Note input: node flags for playing and hovering, plus a computer-keyboard piano.
use std::collections::BTreeMap;

use log::{debug, info};

use crate::bus::{Event, Subscriber};
use crate::node::NodeSet;
use crate::pitch;

/// Applies `note:*` and `labels:mode` events to the nodes. Owns the `sounding` and
/// `hovered` flags.
#[derive(Debug, Default)]
pub struct NoteInput;

impl Subscriber for NoteInput {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::NoteOn(midi) | Event::NoteOff(midi) => {
        if let Some(node) = nodes.get_mut(*midi) {
          node.set_sounding(matches!(event, Event::NoteOn(_)));
        }
      }
      Event::NoteHover(midi) | Event::NoteHoverEnd(midi) => {
        if let Some(node) = nodes.get_mut(*midi) {
          node.set_hovered(matches!(event, Event::NoteHover(_)));
        }
      }
      Event::LabelMode(mode) => {
        debug!("label mode -> {mode}");
        nodes.label_mode = *mode;
      }
      _ => {}
    }
    vec![]
  }
}

pub const MIN_OCTAVE: i32 = 1;
pub const MAX_OCTAVE: i32 = 7;
pub const DEFAULT_OCTAVE: i32 = 4;

/// Semitones above the current octave's C for each mapped key.
///
/// ```text
/// black:  w  e     t  y  u     o  p
/// white: a  s  d  f  g  h  j  k  l  ;
/// ```
pub fn key_semitone(key: char) -> Option<i32> {
  let semitone = match key.to_ascii_lowercase() {
    'a' => 0,
    's' => 2,
    'd' => 4,
    'f' => 5,
    'g' => 7,
    'h' => 9,
    'j' => 11,
    'k' => 12,
    'l' => 14,
    ';' => 16,
    'w' => 1,
    'e' => 3,
    't' => 6,
    'y' => 8,
    'u' => 10,
    'o' => 13,
    'p' => 15,
    _ => return None,
  };
  Some(semitone)
}

/// Turns key presses into note events. `z` and `x` shift the octave down and up.
#[derive(Debug)]
pub struct KeyboardInput {
  octave: i32,
  /// Held keys and the note each one started, so releases stop the right note
  /// even after an octave shift.
  held: BTreeMap<char, u8>,
}

impl Default for KeyboardInput {
  fn default() -> Self {
    KeyboardInput {
      octave: DEFAULT_OCTAVE,
      held: BTreeMap::new(),
    }
  }
}

impl KeyboardInput {
  pub fn new() -> KeyboardInput {
    KeyboardInput::default()
  }

  pub fn octave(&self) -> i32 {
    self.octave
  }

  pub fn held(&self) -> Vec<u8> {
    self.held.values().copied().collect()
  }

  /// MIDI number `key` plays in the current octave, if it is mapped and on the keyboard.
  pub fn key_to_midi(&self, key: char) -> Option<u8> {
    let midi = (self.octave + 1) * 12 + key_semitone(key)?;
    pitch::by_midi(midi).map(|p| p.midi)
  }

  pub fn key_down(&mut self, key: char) -> Vec<Event> {
    let key = key.to_ascii_lowercase();
    match key {
      'z' => return self.shift_octave(-1),
      'x' => return self.shift_octave(1),
      _ => {}
    }
    // key repeat
    if self.held.contains_key(&key) {
      return vec![];
    }
    let Some(midi) = self.key_to_midi(key) else {
      return vec![];
    };
    self.held.insert(key, midi);
    vec![
      Event::NoteOn(midi),
      Event::SelectionAdd {
        midi: vec![midi],
        silent: true,
      },
    ]
  }

  pub fn key_up(&mut self, key: char) -> Vec<Event> {
    match self.held.remove(&key.to_ascii_lowercase()) {
      Some(midi) => vec![Event::NoteOff(midi)],
      None => vec![],
    }
  }

  /// Stops every held note, e.g. when the window loses focus.
  pub fn release_all(&mut self) -> Vec<Event> {
    std::mem::take(&mut self.held)
      .into_values()
      .map(Event::NoteOff)
      .collect()
  }

  /// Moves the keyboard by `delta` octaves within 1 ..= 7. Held notes are released first.
  pub fn shift_octave(&mut self, delta: i32) -> Vec<Event> {
    let octave = (self.octave + delta).clamp(MIN_OCTAVE, MAX_OCTAVE);
    if octave == self.octave {
      return vec![];
    }
    let mut events = self.release_all();
    self.octave = octave;
    info!("keyboard octave -> {octave}");
    events.push(Event::KeyboardOctaveChanged(octave));
    events
  }
}
