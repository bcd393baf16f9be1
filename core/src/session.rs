//! Composition root: one set of nodes, one bus, and every component subscribed to it.
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use error_stack::{report, Result};
use log::{info, warn};
use uuid::Uuid;

use crate::bus::{Event, EventBus, Subscriber};
use crate::camera::CameraPreset;
use crate::config::SpiralConfig;
use crate::error::SpiralError;
use crate::input::{KeyboardInput, NoteInput};
use crate::layout::{OctaveRing, RootOffset, ViewMode};
use crate::node::NodeSet;
use crate::overlay::clock::ClockOverlay;
use crate::overlay::connections::ConnectingLine;
use crate::overlay::interval::IntervalOverlay;
use crate::overlay::live_chord::LiveChord;
use crate::overlay::shape::ShapeOverlay;
use crate::pitch::chords::find_chord;
use crate::pitch::Pitch;
use crate::recognize::DetectedChord;
use crate::selection::SelectionCoordinator;
use crate::view::ViewController;

pub struct Session {
  config: SpiralConfig,
  nodes: NodeSet,
  bus: EventBus,
  keyboard: KeyboardInput,
  camera: Rc<Cell<CameraPreset>>,

  view: Rc<RefCell<ViewController>>,
  selection: Rc<RefCell<SelectionCoordinator>>,
  line: Rc<RefCell<ConnectingLine>>,
  shape: Rc<RefCell<ShapeOverlay>>,
  live_chord: Rc<RefCell<LiveChord>>,
  interval: Rc<RefCell<IntervalOverlay>>,
  clock: Rc<RefCell<ClockOverlay>>,
}

impl Session {
  pub fn new(config: SpiralConfig) -> Session {
    let nodes = NodeSet::new(&config);
    let mut bus = EventBus::new();

    let view = Rc::new(RefCell::new(ViewController::new(config.clone(), &nodes)));
    let selection = Rc::new(RefCell::new(SelectionCoordinator::new()));
    let line = Rc::new(RefCell::new(ConnectingLine::new(
      Duration::from_millis(config.transition_ms),
      &nodes,
    )));
    let shape = Rc::new(RefCell::new(ShapeOverlay::new(config.shape_reference_octave)));
    let live_chord = Rc::new(RefCell::new(LiveChord::new()));
    let interval = Rc::new(RefCell::new(IntervalOverlay::new()));
    let clock = Rc::new(RefCell::new(ClockOverlay::new()));

    let note_input: Rc<RefCell<dyn Subscriber>> = Rc::new(RefCell::new(NoteInput));
    bus.subscribe(note_input);
    bus.subscribe(selection.clone());
    bus.subscribe(view.clone());
    bus.subscribe(line.clone());
    bus.subscribe(shape.clone());
    bus.subscribe(live_chord.clone());
    bus.subscribe(interval.clone());
    bus.subscribe(clock.clone());

    let camera = Rc::new(Cell::new(CameraPreset::Default));
    let camera_handle = camera.clone();
    bus.on(move |event| {
      if let Event::CameraPreset(preset) = event {
        camera_handle.set(*preset);
      }
    });

    info!("session ready with {} nodes", nodes.len());
    Session {
      config,
      nodes,
      bus,
      keyboard: KeyboardInput::new(),
      camera,
      view,
      selection,
      line,
      shape,
      live_chord,
      interval,
      clock,
    }
  }

  /// Publishes `event` and delivers everything it triggers. Returns the number of
  /// events delivered.
  pub fn emit(&mut self, event: Event) -> usize {
    self.bus.emit(event, &mut self.nodes)
  }

  fn emit_all(&mut self, events: Vec<Event>) -> usize {
    for event in events {
      self.bus.publish(event);
    }
    self.bus.dispatch(&mut self.nodes)
  }

  /// Advances the frame clock.
  pub fn tick(&mut self, elapsed: Duration) -> usize {
    self.emit(Event::Tick(elapsed))
  }

  /// Ticks in `step` increments until no transition or line morph is running.
  /// Gives up after `limit` of simulated time.
  pub fn settle(&mut self, step: Duration, limit: Duration) -> Duration {
    let mut spent = Duration::ZERO;
    while self.is_animating() && spent < limit {
      self.tick(step);
      spent += step;
    }
    spent
  }

  /// Selects a voicing of the named chord rooted at chromatic index `root` in
  /// `base_octave`. Inversions past the chord's last are clamped, and notes off the
  /// keyboard are dropped. Returns the pitches selected.
  pub fn apply_chord(
    &mut self,
    root: u8,
    name: &str,
    base_octave: i32,
    inversion: usize,
  ) -> Result<Vec<&'static Pitch>, SpiralError> {
    let template = find_chord(name.trim())
      .ok_or_else(|| report!(SpiralError::UnknownChord(name.to_string())))?;
    let max = template.max_inversion();
    if inversion > max {
      warn!("{} has no inversion {inversion}, using {max}", template.name);
    }
    let pitches = template.pitches(root, base_octave, inversion.min(max));
    self.emit(Event::SelectionSet(pitches.iter().map(|p| p.midi).collect()));
    Ok(pitches)
  }

  pub fn key_down(&mut self, key: char) -> usize {
    let events = self.keyboard.key_down(key);
    self.emit_all(events)
  }

  pub fn key_up(&mut self, key: char) -> usize {
    let events = self.keyboard.key_up(key);
    self.emit_all(events)
  }

  pub fn release_keys(&mut self) -> usize {
    let events = self.keyboard.release_all();
    self.emit_all(events)
  }

  /// Registers an external listener for every event on this session's bus.
  pub fn on<F>(&mut self, callback: F) -> Uuid
  where
    F: FnMut(&Event) + 'static,
  {
    self.bus.on(callback)
  }

  pub fn off(&mut self, id: Uuid) -> bool {
    self.bus.unsubscribe(id)
  }

  pub fn config(&self) -> &SpiralConfig {
    &self.config
  }

  pub fn nodes(&self) -> &NodeSet {
    &self.nodes
  }

  pub fn keyboard_octave(&self) -> i32 {
    self.keyboard.octave()
  }

  pub fn camera(&self) -> CameraPreset {
    self.camera.get()
  }

  pub fn mode(&self) -> ViewMode {
    self.view.borrow().mode()
  }

  pub fn root(&self) -> RootOffset {
    self.view.borrow().root()
  }

  pub fn is_animating(&self) -> bool {
    self.view.borrow().is_animating() || self.line.borrow().is_morphing()
  }

  pub fn rings(&self) -> Vec<OctaveRing> {
    self.view.borrow().rings().to_vec()
  }

  pub fn selection(&self) -> Vec<&'static Pitch> {
    self.selection.borrow().snapshot()
  }

  pub fn chord(&self) -> Option<DetectedChord> {
    self.live_chord.borrow().chord()
  }

  pub fn line(&self) -> Rc<RefCell<ConnectingLine>> {
    self.line.clone()
  }

  pub fn shape(&self) -> Rc<RefCell<ShapeOverlay>> {
    self.shape.clone()
  }

  pub fn live_chord(&self) -> Rc<RefCell<LiveChord>> {
    self.live_chord.clone()
  }

  pub fn interval(&self) -> Rc<RefCell<IntervalOverlay>> {
    self.interval.clone()
  }

  pub fn clock(&self) -> Rc<RefCell<ClockOverlay>> {
    self.clock.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::layout;
  use crate::pitch::intervals::Interval;
  use crate::recognize::{ShapeKind, ShapeSpec};

  const FRAME: Duration = Duration::from_millis(16);
  const LIMIT: Duration = Duration::from_secs(5);

  fn session() -> Session {
    Session::new(SpiralConfig::default())
  }

  fn recorder(session: &mut Session) -> Rc<RefCell<Vec<&'static str>>> {
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = seen.clone();
    session.on(move |e| {
      if !matches!(e, Event::Tick(_)) {
        sink.borrow_mut().push(e.name())
      }
    });
    seen
  }

  #[test]
  fn toggling_to_concentric_lands_on_concentric_positions() {
    let mut s = session();
    let seen = recorder(&mut s);
    s.emit(Event::ViewToggle(ViewMode::Concentric));
    assert_eq!(s.mode(), ViewMode::Concentric);
    assert_eq!(s.camera(), CameraPreset::Concentric);
    assert!(s.is_animating());
    assert!(s.rings().is_empty());

    s.settle(FRAME, LIMIT);
    assert!(!s.is_animating());

    let expected = layout::all_positions(ViewMode::Concentric, RootOffset::default(), s.config());
    assert_eq!(s.nodes().positions(), expected);
    assert!(!s.rings().is_empty());
    assert!(!s.clock().borrow().is_visible());
    s.emit(Event::ClockToggle);
    assert!(s.clock().borrow().is_visible());

    let seen = seen.borrow();
    assert_eq!(seen[0], "view:toggle");
    assert!(seen.contains(&"view:modeChanged"));
    assert!(seen.contains(&"camera:preset"));
    assert!(seen.contains(&"view:positionsUpdated"));
    assert_eq!(seen.last(), Some(&"clock:toggle"));
  }

  #[test]
  fn spiral_to_fifths_keeps_nodes_and_morphs_the_line() {
    let mut s = session();
    let before = s.nodes().positions();
    s.emit(Event::ViewToggle(ViewMode::Fifths));
    assert!(s.line().borrow().is_morphing());
    s.settle(FRAME, LIMIT);
    assert_eq!(s.nodes().positions(), before);
    assert!(!s.line().borrow().is_morphing());
  }

  #[test]
  fn keyboard_selects_and_detects_chords() {
    let mut s = session();
    for key in ['a', 'd', 'g'] {
      s.key_down(key);
    }
    let midi: Vec<u8> = s.selection().iter().map(|p| p.midi).collect();
    assert_eq!(midi, vec![60, 64, 67]);
    assert_eq!(s.nodes().sounding(), vec![60, 64, 67]);
    match s.chord() {
      Some(chord) => assert_eq!(chord.name, "Major"),
      None => panic!("expected a chord"),
    }

    s.release_keys();
    assert!(s.nodes().sounding().is_empty());
    // selection survives key release
    assert_eq!(s.selection().len(), 3);
    s.emit(Event::SelectionClear);
    assert!(s.selection().is_empty());
    assert!(s.chord().is_none());
  }

  #[test]
  fn shapes_follow_root_changes() {
    let mut s = session();
    let spec = ShapeSpec::new(0, vec![0, 4, 7], ShapeKind::Chord);
    s.emit(Event::ShapeShow(spec));
    assert_eq!(s.nodes().highlighted().len(), 22);
    let before = s.shape().borrow().outline().map(|o| o.vertex_count());
    assert!(before.is_some());

    s.emit(Event::RootChanged(RootOffset::new(5)));
    s.settle(FRAME, LIMIT);
    assert_eq!(s.root().value(), 5);
    assert_eq!(s.nodes().highlighted().len(), 22);
    assert!(s.shape().borrow().outline().is_some());

    s.emit(Event::ShapeClear);
    assert!(s.nodes().highlighted().is_empty());
    assert!(s.shape().borrow().outline().is_none());
  }

  #[test]
  fn applying_a_chord_selects_its_voicing() {
    let mut s = session();
    let seen = recorder(&mut s);
    let pitches = s.apply_chord(0, "Major", 4, 0).unwrap();
    let midi: Vec<u8> = s.selection().iter().map(|p| p.midi).collect();
    assert_eq!(midi, vec![60, 64, 67]);
    assert_eq!(pitches.len(), 3);
    assert_eq!(s.chord().map(|c| c.name), Some("Major"));
    assert_eq!(seen.borrow()[0], "selection:set");

    // second inversion of A minor, and a clamped inversion of a power chord
    s.apply_chord(9, "minor", 3, 2).unwrap();
    let midi: Vec<u8> = s.selection().iter().map(|p| p.midi).collect();
    assert_eq!(midi, vec![64, 69, 72]);
    assert_eq!(s.chord().map(|c| c.root_name), Some("A"));
    s.apply_chord(7, "Power (5th)", 2, 5).unwrap();
    let midi: Vec<u8> = s.selection().iter().map(|p| p.midi).collect();
    assert_eq!(midi, vec![50, 55]);
  }

  #[test]
  fn applying_a_chord_off_the_keyboard_keeps_what_fits() {
    let mut s = session();
    let pitches = s.apply_chord(0, "Dom9", 8, 0).unwrap();
    assert_eq!(pitches.len(), 1);
    assert_eq!(s.selection().len(), 1);
    assert!(s.chord().is_none());

    match s.apply_chord(0, "Mystery", 4, 0) {
      Err(e) => assert_eq!(e.current_context(), &SpiralError::UnknownChord("Mystery".to_string())),
      Ok(p) => panic!("Unexpected voicing: {:?}", p),
    }
    assert_eq!(s.selection().len(), 1);
  }

  #[test]
  fn interval_overlay_tracks_selection_of_interval() {
    let mut s = session();
    s.emit(Event::IntervalSelect(Interval::by_semitones(7)));
    assert_eq!(s.interval().borrow().segments().len(), 81);
    s.emit(Event::IntervalSelect(None));
    assert!(s.interval().borrow().segments().is_empty());
  }

  #[test]
  fn sessions_are_isolated() {
    let mut a = session();
    let mut b = session();
    let seen_a = recorder(&mut a);
    let seen_b = recorder(&mut b);

    a.emit(Event::SelectionSet(vec![60]));
    assert_eq!(a.selection().len(), 1);
    assert!(b.selection().is_empty());
    assert!(!seen_a.borrow().is_empty());
    assert!(seen_b.borrow().is_empty());
  }

  #[test]
  fn removed_listeners_stop_hearing_events() {
    let mut s = session();
    let count = Rc::new(Cell::new(0));
    let sink = count.clone();
    let id = s.on(move |_| sink.set(sink.get() + 1));
    s.emit(Event::ClockToggle);
    let heard = count.get();
    assert!(heard > 0);
    assert!(s.off(id));
    s.emit(Event::ClockToggle);
    assert_eq!(count.get(), heard);
  }
}
