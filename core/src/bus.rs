//! In-process publish/subscribe channel owned by a single session.
//!
//! Handlers never publish while an event is being delivered. Instead they return
//! follow-up events, which are queued and delivered once every subscriber has seen
//! the current event. Delivery is therefore FIFO and breadth-first.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace, warn};
use uuid::Uuid;

use crate::camera::CameraPreset;
use crate::layout::{RootOffset, ViewMode};
use crate::node::{LabelMode, NodeSet};
use crate::pitch::intervals::Interval;
use crate::pitch::Pitch;
use crate::recognize::{DetectedChord, ShapeSpec};

/// Everything that can travel over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
  /// Replace the selection with these MIDI numbers.
  SelectionSet(Vec<u8>),
  /// Add to the selection. Silent additions do not announce `NoteSelect`.
  SelectionAdd { midi: Vec<u8>, silent: bool },
  SelectionRemove(Vec<u8>),
  SelectionClear,
  /// Canonical selection snapshot, sorted by MIDI number.
  SelectionChanged(Vec<&'static Pitch>),

  ViewToggle(ViewMode),
  ViewModeChanged { prev: ViewMode, new: ViewMode },
  /// Node positions moved during a transition frame.
  PositionsUpdated,
  RootChanged(RootOffset),

  ShapeShow(ShapeSpec),
  ShapeClear,

  NoteOn(u8),
  NoteOff(u8),
  NoteClick(u8),
  NoteSelect(&'static Pitch),
  NoteDeselect(&'static Pitch),
  NoteHover(u8),
  NoteHoverEnd(u8),

  ChordDetected(Option<DetectedChord>),
  CameraPreset(CameraPreset),
  IntervalSelect(Option<Interval>),
  ClockToggle,
  LabelMode(LabelMode),
  KeyboardOctaveChanged(i32),

  /// Frame clock; carries the time since the previous tick.
  Tick(Duration),
}

impl Event {
  /// The wire-style name of this event, e.g. `selection:changed`.
  pub fn name(&self) -> &'static str {
    use Event::*;
    match self {
      SelectionSet(_) => "selection:set",
      SelectionAdd { .. } => "selection:add",
      SelectionRemove(_) => "selection:remove",
      SelectionClear => "selection:clear",
      SelectionChanged(_) => "selection:changed",
      ViewToggle(_) => "view:toggle",
      ViewModeChanged { .. } => "view:modeChanged",
      PositionsUpdated => "view:positionsUpdated",
      RootChanged(_) => "root:changed",
      ShapeShow(_) => "shape:show",
      ShapeClear => "shape:clear",
      NoteOn(_) => "note:on",
      NoteOff(_) => "note:off",
      NoteClick(_) => "note:click",
      NoteSelect(_) => "note:select",
      NoteDeselect(_) => "note:deselect",
      NoteHover(_) => "note:hover",
      NoteHoverEnd(_) => "note:hoverEnd",
      ChordDetected(_) => "chord:detected",
      Event::CameraPreset(_) => "camera:preset",
      IntervalSelect(_) => "interval:select",
      ClockToggle => "clock:toggle",
      Event::LabelMode(_) => "labels:mode",
      KeyboardOctaveChanged(_) => "keyboard:octaveChanged",
      Tick(_) => "tick",
    }
  }
}

impl Display for Event {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use Event::*;
    match self {
      SelectionChanged(pitches) => write!(f, "{}({} notes)", self.name(), pitches.len()),
      ViewModeChanged { prev, new } => write!(f, "{}({prev} -> {new})", self.name()),
      ChordDetected(Some(chord)) => write!(f, "{}({chord})", self.name()),
      ChordDetected(None) => write!(f, "{}(none)", self.name()),
      RootChanged(r) => write!(f, "{}({r})", self.name()),
      NoteOn(m) | NoteOff(m) | NoteClick(m) | NoteHover(m) | NoteHoverEnd(m) => {
        write!(f, "{}({m})", self.name())
      }
      _ => write!(f, "{}", self.name()),
    }
  }
}

/// A component that reacts to bus traffic.
///
/// `nodes` is the session's node set. Each subscriber writes only the node
/// fields it owns. Follow-up events are returned rather than published directly.
pub trait Subscriber {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event>;
}

/// Adapts a closure into a [Subscriber] that observes events but never replies.
struct Listener<F> {
  callback: F,
}

impl<F> Subscriber for Listener<F>
where
  F: FnMut(&Event),
{
  fn on_event(&mut self, event: &Event, _nodes: &mut NodeSet) -> Vec<Event> {
    (self.callback)(event);
    vec![]
  }
}

/// Upper bound on deliveries per [EventBus::dispatch] call, to cut off feedback loops.
const MAX_DELIVERIES: usize = 100_000;

#[derive(Default)]
pub struct EventBus {
  subscribers: Vec<(Uuid, Rc<RefCell<dyn Subscriber>>)>,
  queue: VecDeque<Event>,
}

impl EventBus {
  pub fn new() -> EventBus {
    EventBus::default()
  }

  /// Registers a subscriber. Subscribers see each event in registration order.
  pub fn subscribe(&mut self, subscriber: Rc<RefCell<dyn Subscriber>>) -> Uuid {
    let id = Uuid::new_v4();
    self.subscribers.push((id, subscriber));
    id
  }

  /// Registers a closure that is called with every event.
  pub fn on<F>(&mut self, callback: F) -> Uuid
  where
    F: FnMut(&Event) + 'static,
  {
    self.subscribe(Rc::new(RefCell::new(Listener { callback })))
  }

  /// Returns `true` if a subscriber with this id was registered.
  pub fn unsubscribe(&mut self, id: Uuid) -> bool {
    let before = self.subscribers.len();
    self.subscribers.retain(|(sid, _)| *sid != id);
    before != self.subscribers.len()
  }

  pub fn subscriber_count(&self) -> usize {
    self.subscribers.len()
  }

  /// Queues an event without delivering it.
  pub fn publish(&mut self, event: Event) {
    self.queue.push_back(event);
  }

  pub fn pending(&self) -> usize {
    self.queue.len()
  }

  /// Delivers queued events, including any follow-ups they produce, until the
  /// queue is empty. Returns the number of events delivered.
  pub fn dispatch(&mut self, nodes: &mut NodeSet) -> usize {
    let mut delivered = 0;
    while let Some(event) = self.queue.pop_front() {
      if delivered >= MAX_DELIVERIES {
        warn!(
          "event bus delivered {MAX_DELIVERIES} events in one dispatch; dropping {} queued events",
          self.queue.len() + 1
        );
        self.queue.clear();
        break;
      }

      if matches!(event, Event::Tick(_)) {
        trace!("delivering {event}");
      } else {
        debug!("delivering {event}");
      }

      for (_, subscriber) in self.subscribers.iter() {
        let replies = subscriber.borrow_mut().on_event(&event, nodes);
        self.queue.extend(replies);
      }
      delivered += 1;
    }
    delivered
  }

  /// Publishes `event` and delivers it along with everything it triggers.
  pub fn emit(&mut self, event: Event, nodes: &mut NodeSet) -> usize {
    self.publish(event);
    self.dispatch(nodes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SpiralConfig;

  /// Replies to `ClockToggle` with `ShapeClear`, and records everything it sees.
  struct Echo {
    seen: Rc<RefCell<Vec<&'static str>>>,
  }

  impl Subscriber for Echo {
    fn on_event(&mut self, event: &Event, _nodes: &mut NodeSet) -> Vec<Event> {
      self.seen.borrow_mut().push(event.name());
      match event {
        Event::ClockToggle => vec![Event::ShapeClear],
        _ => vec![],
      }
    }
  }

  fn recorder(bus: &mut EventBus) -> Rc<RefCell<Vec<&'static str>>> {
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = seen.clone();
    bus.on(move |e| sink.borrow_mut().push(e.name()));
    seen
  }

  #[test]
  fn replies_are_delivered_after_the_current_fan_out() {
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    let mut bus = EventBus::new();
    let echo_seen = Rc::new(RefCell::new(vec![]));
    bus.subscribe(Rc::new(RefCell::new(Echo {
      seen: echo_seen.clone(),
    })));
    let seen = recorder(&mut bus);

    let delivered = bus.emit(Event::ClockToggle, &mut nodes);
    assert_eq!(delivered, 2);
    // the recorder sees clock:toggle before the reply, even though Echo replied first
    assert_eq!(*seen.borrow(), vec!["clock:toggle", "shape:clear"]);
    assert_eq!(*echo_seen.borrow(), vec!["clock:toggle", "shape:clear"]);
  }

  #[test]
  fn published_events_wait_for_dispatch() {
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    let mut bus = EventBus::new();
    let seen = recorder(&mut bus);
    bus.publish(Event::SelectionClear);
    bus.publish(Event::ShapeClear);
    assert!(seen.borrow().is_empty());
    assert_eq!(bus.pending(), 2);
    bus.dispatch(&mut nodes);
    assert_eq!(*seen.borrow(), vec!["selection:clear", "shape:clear"]);
  }

  #[test]
  fn unsubscribed_listeners_stop_hearing_events() {
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    let mut bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let id = bus.on(move |_| *c.borrow_mut() += 1);
    bus.emit(Event::ClockToggle, &mut nodes);
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.emit(Event::ClockToggle, &mut nodes);
    assert_eq!(*count.borrow(), 1);
  }

  #[test]
  fn separate_buses_are_isolated() {
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    let mut a = EventBus::new();
    let mut b = EventBus::new();
    let seen_a = recorder(&mut a);
    let seen_b = recorder(&mut b);
    a.emit(Event::SelectionClear, &mut nodes);
    assert_eq!(seen_a.borrow().len(), 1);
    assert!(seen_b.borrow().is_empty());
  }

  struct Feedback;

  impl Subscriber for Feedback {
    fn on_event(&mut self, _event: &Event, _nodes: &mut NodeSet) -> Vec<Event> {
      vec![Event::ClockToggle]
    }
  }

  #[test]
  fn feedback_loops_are_cut_off() {
    let mut nodes = NodeSet::new(&SpiralConfig::default());
    let mut bus = EventBus::new();
    bus.subscribe(Rc::new(RefCell::new(Feedback)));
    assert_eq!(bus.emit(Event::ClockToggle, &mut nodes), MAX_DELIVERIES);
    assert_eq!(bus.pending(), 0);
  }
}
