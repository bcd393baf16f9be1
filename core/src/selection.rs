//! The set of selected pitches, kept in step with each node's `selected` flag.
//!
//! Every operation ends with exactly one `SelectionChanged` carrying the sorted
//! snapshot, after any per-note events. MIDI numbers off the keyboard are ignored.
use std::collections::BTreeSet;

use log::{debug, warn};

use crate::bus::{Event, Subscriber};
use crate::node::NodeSet;
use crate::pitch::{self, Pitch};

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
  selected: BTreeSet<u8>,
}

fn known(midi: u8) -> Option<&'static Pitch> {
  let found = pitch::by_midi(midi as i32);
  if found.is_none() {
    warn!("ignoring selection of unknown midi note {midi}");
  }
  found
}

impl SelectionCoordinator {
  pub fn new() -> SelectionCoordinator {
    SelectionCoordinator::default()
  }

  /// Selected pitches, ascending by MIDI number.
  pub fn snapshot(&self) -> Vec<&'static Pitch> {
    self
      .selected
      .iter()
      .filter_map(|m| pitch::by_midi(*m as i32))
      .collect()
  }

  pub fn is_selected(&self, midi: u8) -> bool {
    self.selected.contains(&midi)
  }

  fn changed(&self, mut events: Vec<Event>) -> Vec<Event> {
    let snapshot = self.snapshot();
    debug!("selection is now {} notes", snapshot.len());
    events.push(Event::SelectionChanged(snapshot));
    events
  }

  fn mark(&mut self, midi: u8, on: bool, nodes: &mut NodeSet) {
    if on {
      self.selected.insert(midi);
    } else {
      self.selected.remove(&midi);
    }
    if let Some(node) = nodes.get_mut(midi) {
      node.set_selected(on);
    }
  }

  /// Flips one note, announcing `NoteSelect` or `NoteDeselect`.
  pub fn toggle(&mut self, midi: u8, nodes: &mut NodeSet) -> Vec<Event> {
    let Some(pitch) = known(midi) else {
      return vec![];
    };
    let event = if self.is_selected(midi) {
      self.mark(midi, false, nodes);
      Event::NoteDeselect(pitch)
    } else {
      self.mark(midi, true, nodes);
      Event::NoteSelect(pitch)
    };
    self.changed(vec![event])
  }

  /// Replaces the selection. No per-note events.
  pub fn set_by_ids(&mut self, ids: &[u8], nodes: &mut NodeSet) -> Vec<Event> {
    for midi in std::mem::take(&mut self.selected) {
      if let Some(node) = nodes.get_mut(midi) {
        node.set_selected(false);
      }
    }
    for midi in ids {
      if known(*midi).is_some() {
        self.mark(*midi, true, nodes);
      }
    }
    self.changed(vec![])
  }

  /// Adds to the selection, announcing `NoteSelect` for each newly added note unless `silent`.
  pub fn add_by_ids(&mut self, ids: &[u8], silent: bool, nodes: &mut NodeSet) -> Vec<Event> {
    let mut events = vec![];
    for midi in ids {
      let Some(pitch) = known(*midi) else {
        continue;
      };
      if self.is_selected(*midi) {
        continue;
      }
      self.mark(*midi, true, nodes);
      if !silent {
        events.push(Event::NoteSelect(pitch));
      }
    }
    self.changed(events)
  }

  /// Removes from the selection. No per-note events.
  pub fn remove_by_ids(&mut self, ids: &[u8], nodes: &mut NodeSet) -> Vec<Event> {
    for midi in ids {
      if self.is_selected(*midi) {
        self.mark(*midi, false, nodes);
      }
    }
    self.changed(vec![])
  }

  pub fn clear_all(&mut self, nodes: &mut NodeSet) -> Vec<Event> {
    self.set_by_ids(&[], nodes)
  }
}

impl Subscriber for SelectionCoordinator {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::NoteClick(midi) => self.toggle(*midi, nodes),
      Event::SelectionSet(ids) => self.set_by_ids(ids, nodes),
      Event::SelectionAdd { midi, silent } => self.add_by_ids(midi, *silent, nodes),
      Event::SelectionRemove(ids) => self.remove_by_ids(ids, nodes),
      Event::SelectionClear => self.clear_all(nodes),
      _ => vec![],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SpiralConfig;

  fn setup() -> (SelectionCoordinator, NodeSet) {
    (SelectionCoordinator::new(), NodeSet::new(&SpiralConfig::default()))
  }

  fn snapshot_of(events: &[Event]) -> Vec<u8> {
    let changed: Vec<&Event> = events
      .iter()
      .filter(|e| matches!(e, Event::SelectionChanged(_)))
      .collect();
    assert_eq!(changed.len(), 1, "expected exactly one selection:changed");
    match changed[0] {
      Event::SelectionChanged(pitches) => pitches.iter().map(|p| p.midi).collect(),
      e => panic!("Unexpected event: {:?}", e),
    }
  }

  #[test]
  fn toggle_twice_leaves_node_unselected() {
    let (mut sel, mut nodes) = setup();
    let events = sel.toggle(60, &mut nodes);
    assert!(matches!(events[0], Event::NoteSelect(p) if p.midi == 60));
    assert_eq!(snapshot_of(&events), vec![60]);
    assert!(nodes.get(60).unwrap().flags().selected);

    let events = sel.toggle(60, &mut nodes);
    assert!(matches!(events[0], Event::NoteDeselect(p) if p.midi == 60));
    assert_eq!(snapshot_of(&events), Vec::<u8>::new());
    assert!(!nodes.get(60).unwrap().flags().selected);
  }

  #[test]
  fn set_then_set_empty_clears_with_one_event() {
    let (mut sel, mut nodes) = setup();
    let events = sel.set_by_ids(&[67, 60, 64], &mut nodes);
    assert_eq!(events.len(), 1);
    assert_eq!(snapshot_of(&events), vec![60, 64, 67]);

    let events = sel.set_by_ids(&[], &mut nodes);
    assert_eq!(events, vec![Event::SelectionChanged(vec![])]);
    assert!(nodes.selected().is_empty());
  }

  #[test]
  fn silent_add_emits_no_note_select() {
    let (mut sel, mut nodes) = setup();
    let events = sel.add_by_ids(&[60], true, &mut nodes);
    assert_eq!(events.len(), 1);
    assert_eq!(snapshot_of(&events), vec![60]);

    let events = sel.add_by_ids(&[60, 62], false, &mut nodes);
    // only the newly added note is announced
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::NoteSelect(p) if p.midi == 62));
    assert_eq!(snapshot_of(&events), vec![60, 62]);
  }

  #[test]
  fn remove_and_clear_have_no_per_note_events() {
    let (mut sel, mut nodes) = setup();
    sel.set_by_ids(&[60, 62, 64], &mut nodes);
    let events = sel.remove_by_ids(&[62, 99], &mut nodes);
    assert_eq!(events.len(), 1);
    assert_eq!(snapshot_of(&events), vec![60, 64]);

    let events = sel.clear_all(&mut nodes);
    assert_eq!(events.len(), 1);
    assert_eq!(snapshot_of(&events), Vec::<u8>::new());
  }

  #[test]
  fn unknown_notes_are_ignored() {
    let (mut sel, mut nodes) = setup();
    assert!(sel.toggle(5, &mut nodes).is_empty());
    let events = sel.set_by_ids(&[10, 60, 120], &mut nodes);
    assert_eq!(snapshot_of(&events), vec![60]);
  }

  #[test]
  fn click_toggles_through_the_bus_contract() {
    let (mut sel, mut nodes) = setup();
    sel.on_event(&Event::NoteClick(61), &mut nodes);
    assert!(sel.is_selected(61));
    sel.on_event(&Event::SelectionClear, &mut nodes);
    assert!(!sel.is_selected(61));
  }
}
