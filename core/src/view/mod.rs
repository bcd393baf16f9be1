//! Owns the view mode and root offset, and animates every node to its new target.
//!
//! ## State machine internals
//!
//! Same shape as a classic "pretty state machine": a [State] is advanced by [Action]s,
//! and each step hands back a list of [Effect]s that the [ViewController] carries out
//! (moving nodes, publishing bus events, rebuilding rings). One of those effects,
//! `StartTransition`, feeds a `Begin` action back into the machine once the start and
//! target positions have been captured.
//!
//! ```text
//!                 ToggleMode / ChangeRoot
//!            ┌───────────────────────────────┐
//!            │                               │
//!        ┌───▼─────┐   Begin        ┌────────┴────────┐
//!   ────►│ Resting ├───────────────►│  Transitioning  │◄──┐
//!        └───▲─────┘                └────────┬────┬───┘   │ Frame (t < 1)
//!            │       Frame (t = 1)           │    └───────┘
//!            └───────────────────────────────┘
//! ```
//!
//! Every `Begin` carries a fresh [Generation]; frames for an older generation are
//! dropped, so the newest request always wins.

pub mod actions;
pub mod effects;
pub mod state;
pub mod transition;

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;

use crate::animation::Generation;
use crate::bus::{Event, Subscriber};
use crate::config::SpiralConfig;
use crate::layout::{self, octave_rings, OctaveRing, RootOffset, ViewMode};
use crate::node::NodeSet;

use self::actions::Action;
use self::effects::Effect;
use self::state::State;
use self::transition::Transition;

pub struct ViewController {
  state: State,
  config: SpiralConfig,
  generation: Generation,
  /// Time accumulated from ticks.
  now: Duration,
  rings: Vec<OctaveRing>,
}

impl ViewController {
  /// Starts at rest in spiral mode with root 0, with rings built around `nodes`.
  pub fn new(config: SpiralConfig, nodes: &NodeSet) -> ViewController {
    let state = State::default();
    let rings = octave_rings(state.mode(), &nodes.positions(), &config);
    ViewController {
      state,
      config,
      generation: Generation::default(),
      now: Duration::ZERO,
      rings,
    }
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  pub fn mode(&self) -> ViewMode {
    self.state.mode()
  }

  pub fn root(&self) -> RootOffset {
    self.state.root()
  }

  pub fn is_animating(&self) -> bool {
    self.state.is_transitioning()
  }

  /// Octave rings; empty while a transition is running.
  pub fn rings(&self) -> &[OctaveRing] {
    &self.rings
  }

  pub fn generation(&self) -> Generation {
    self.generation
  }

  /// Runs `action` through the state machine, carrying out effects until no more
  /// actions are produced. Returns the bus events the effects asked for.
  pub fn dispatch(&mut self, action: Action, nodes: &mut NodeSet) -> Vec<Event> {
    let mut actions = VecDeque::from([action]);
    let mut events = vec![];

    while let Some(action) = actions.pop_front() {
      let state = std::mem::take(&mut self.state);
      let (next, effects) = state.next(action);
      self.state = next;

      for effect in effects {
        debug!("view effect: {effect}");
        match effect {
          Effect::AnnounceMode { prev, new } => events.push(Event::ViewModeChanged { prev, new }),
          Effect::MoveCamera(preset) => events.push(Event::CameraPreset(preset)),
          Effect::ClearRings => self.rings.clear(),
          Effect::StartTransition { mode, root } => {
            let transition = Transition::new(
              self.generation.bump(),
              self.now,
              Duration::from_millis(self.config.transition_ms),
              nodes.positions(),
              layout::all_positions(mode, root, &self.config),
            );
            actions.push_back(Action::Begin(transition));
          }
          Effect::Reposition(positions) => nodes.set_positions(&positions),
          Effect::PositionsUpdated => events.push(Event::PositionsUpdated),
          Effect::RebuildRings(mode) => {
            self.rings = octave_rings(mode, &nodes.positions(), &self.config)
          }
        }
      }
    }
    events
  }
}

impl Subscriber for ViewController {
  fn on_event(&mut self, event: &Event, nodes: &mut NodeSet) -> Vec<Event> {
    match event {
      Event::ViewToggle(mode) => self.dispatch(Action::ToggleMode(*mode), nodes),
      Event::RootChanged(root) => self.dispatch(Action::ChangeRoot(*root), nodes),
      Event::Tick(elapsed) => {
        self.now += *elapsed;
        if self.is_animating() {
          let frame = Action::Frame {
            now: self.now,
            generation: self.generation,
          };
          self.dispatch(frame, nodes)
        } else {
          vec![]
        }
      }
      _ => vec![],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::camera::CameraPreset;
  use crate::geometry::Point3;

  fn setup() -> (ViewController, NodeSet, SpiralConfig) {
    let config = SpiralConfig::default();
    let nodes = NodeSet::new(&config);
    (ViewController::new(config.clone(), &nodes), nodes, config)
  }

  fn tick(view: &mut ViewController, nodes: &mut NodeSet, ms: u64) -> Vec<Event> {
    view.on_event(&Event::Tick(Duration::from_millis(ms)), nodes)
  }

  fn transition(generation: u64) -> Transition {
    let mut g = Generation::default();
    for _ in 0..generation {
      g.bump();
    }
    Transition::new(
      g,
      Duration::ZERO,
      Duration::from_millis(1000),
      vec![Point3::ZERO],
      vec![Point3::ONE],
    )
  }

// region State transition tests

  #[test]
  fn toggle_to_current_mode_is_ignored() {
    let init = State::default();
    let (next, effects) = init.clone().next(Action::ToggleMode(ViewMode::Spiral));
    assert_eq!(next, init);
    assert!(effects.is_empty());
  }

  #[test]
  fn toggle_while_resting_announces_and_starts_a_transition() {
    let init = State::default();
    let (next, effects) = init.next(Action::ToggleMode(ViewMode::Concentric));
    match next {
      State::Resting { mode, .. } => assert_eq!(mode, ViewMode::Concentric),
      s => panic!("Unexpected state: {:?}", s),
    }
    assert_eq!(
      effects,
      vec![
        Effect::AnnounceMode {
          prev: ViewMode::Spiral,
          new: ViewMode::Concentric
        },
        Effect::MoveCamera(CameraPreset::Concentric),
        Effect::ClearRings,
        Effect::StartTransition {
          mode: ViewMode::Concentric,
          root: RootOffset::default()
        },
      ]
    );
  }

  #[test]
  fn begin_while_resting_transitions_to_transitioning() {
    let (next, effects) = State::default().next(Action::Begin(transition(1)));
    assert!(effects.is_empty());
    match next {
      State::Transitioning { transition, .. } => assert_eq!(transition.target, vec![Point3::ONE]),
      s => panic!("Unexpected state: {:?}", s),
    }
  }

  #[test]
  fn stale_frame_is_a_no_op() {
    let init = State::Transitioning {
      mode: ViewMode::Spiral,
      root: RootOffset::default(),
      transition: transition(2),
    };
    let mut stale = Generation::default();
    stale.bump();
    let (next, effects) = init.clone().next(Action::Frame {
      now: Duration::from_millis(500),
      generation: stale,
    });
    assert_eq!(next, init);
    assert!(effects.is_empty());
  }

  #[test]
  fn final_frame_lands_on_target_and_rests() {
    let t = transition(1);
    let generation = t.generation;
    let init = State::Transitioning {
      mode: ViewMode::Fifths,
      root: RootOffset::new(3),
      transition: t,
    };
    let (next, effects) = init.next(Action::Frame {
      now: Duration::from_millis(1200),
      generation,
    });
    match next {
      State::Resting { mode, root } => {
        assert_eq!(mode, ViewMode::Fifths);
        assert_eq!(root, RootOffset::new(3));
      }
      s => panic!("Unexpected state: {:?}", s),
    }
    assert_eq!(
      effects,
      vec![
        Effect::Reposition(vec![Point3::ONE]),
        Effect::PositionsUpdated,
        Effect::RebuildRings(ViewMode::Fifths),
      ]
    );
  }

  #[test]
  fn frame_while_resting_is_ignored() {
    let (next, effects) = State::default().next(Action::Frame {
      now: Duration::from_millis(10),
      generation: Generation::default(),
    });
    assert_eq!(next, State::default());
    assert!(effects.is_empty());
  }

// endregion

  #[test]
  fn toggle_to_concentric_animates_nodes_onto_targets() {
    let (mut view, mut nodes, config) = setup();
    let start = nodes.positions();

    let events = view.on_event(&Event::ViewToggle(ViewMode::Concentric), &mut nodes);
    assert_eq!(
      events,
      vec![
        Event::ViewModeChanged {
          prev: ViewMode::Spiral,
          new: ViewMode::Concentric
        },
        Event::CameraPreset(CameraPreset::Concentric),
      ]
    );
    assert!(view.is_animating());
    assert!(view.rings().is_empty());
    assert_eq!(nodes.positions(), start);

    let events = tick(&mut view, &mut nodes, 500);
    assert_eq!(events, vec![Event::PositionsUpdated]);
    assert_ne!(nodes.positions(), start);

    let events = tick(&mut view, &mut nodes, 500);
    assert_eq!(events, vec![Event::PositionsUpdated]);
    assert!(!view.is_animating());
    assert_eq!(
      nodes.positions(),
      layout::all_positions(ViewMode::Concentric, RootOffset::default(), &config)
    );
    assert_eq!(view.rings().len(), 9);

    // no more frames once settled
    assert!(tick(&mut view, &mut nodes, 16).is_empty());
  }

  #[test]
  fn spiral_fifths_toggle_leaves_positions_alone() {
    let (mut view, mut nodes, _) = setup();
    let start = nodes.positions();
    view.on_event(&Event::ViewToggle(ViewMode::Fifths), &mut nodes);
    for _ in 0..70 {
      tick(&mut view, &mut nodes, 16);
      assert_eq!(nodes.positions(), start);
    }
    assert_eq!(view.mode(), ViewMode::Fifths);
    assert!(!view.is_animating());
  }

  #[test]
  fn newer_transition_wins() {
    let (mut view, mut nodes, config) = setup();
    view.on_event(&Event::ViewToggle(ViewMode::Concentric), &mut nodes);
    tick(&mut view, &mut nodes, 300);
    let first = view.generation();

    view.on_event(&Event::RootChanged(RootOffset::new(5)), &mut nodes);
    assert!(view.generation() > first);

    tick(&mut view, &mut nodes, 1000);
    assert_eq!(
      nodes.positions(),
      layout::all_positions(ViewMode::Concentric, RootOffset::new(5), &config)
    );
  }

  #[test]
  fn root_change_retargets_current_mode() {
    let (mut view, mut nodes, config) = setup();
    let events = view.on_event(&Event::RootChanged(RootOffset::new(14)), &mut nodes);
    assert!(events.is_empty());
    assert_eq!(view.root(), RootOffset::new(2));
    tick(&mut view, &mut nodes, 1000);
    assert_eq!(
      nodes.positions(),
      layout::all_positions(ViewMode::Spiral, RootOffset::new(2), &config)
    );
  }
}
