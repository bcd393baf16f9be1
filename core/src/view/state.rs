use std::fmt::Display;

use log::{debug, info};

use crate::animation::ease_in_out_cubic;
use crate::camera::CameraPreset;
use crate::layout::{RootOffset, ViewMode};
use crate::view::actions::Action;
use crate::view::effects::Effect;
use crate::view::transition::Transition;

/// One of the possible states the view can be in at any given time.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
  /// No transition is running. Once settled, every node sits on its target for
  /// `mode` and `root` and the octave rings are up.
  Resting { mode: ViewMode, root: RootOffset },

  /// Nodes are moving toward the layout for `mode` and `root`.
  Transitioning {
    mode: ViewMode,
    root: RootOffset,
    transition: Transition,
  },
}

impl Default for State {
  fn default() -> Self {
    State::Resting {
      mode: ViewMode::default(),
      root: RootOffset::default(),
    }
  }
}

impl Display for State {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use State::*;
    match self {
      Resting { mode, root } => write!(f, "Resting({mode}, root {root})"),
      Transitioning {
        mode,
        root,
        transition,
      } => write!(
        f,
        "Transitioning({mode}, root {root}, {:?})",
        transition.generation
      ),
    }
  }
}

impl State {
  pub fn mode(&self) -> ViewMode {
    match self {
      State::Resting { mode, .. } | State::Transitioning { mode, .. } => *mode,
    }
  }

  pub fn root(&self) -> RootOffset {
    match self {
      State::Resting { root, .. } | State::Transitioning { root, .. } => *root,
    }
  }

  pub fn is_transitioning(&self) -> bool {
    matches!(self, State::Transitioning { .. })
  }

  /// Applies an [Action] to the current [State] and returns the new State, along with
  /// any [Effect]s the change calls for. Actions that don't apply leave the state as is.
  pub fn next(self, action: Action) -> (State, Vec<Effect>) {
    use Action::*;
    use State::*;

    debug!("view state: {} --- action: {}", self, action);

    match (action, self) {
      // Toggling to the mode we're already in (or heading to) does nothing.
      (ToggleMode(new), state) if new == state.mode() => {
        debug!("ignoring toggle to current mode {new}");
        (state, vec![])
      }

      // A new mode from any state supersedes whatever was in flight.
      (ToggleMode(new), state) => {
        let prev = state.mode();
        let root = state.root();
        info!("view mode {prev} -> {new}");
        (
          Resting { mode: new, root },
          vec![
            Effect::AnnounceMode { prev, new },
            Effect::MoveCamera(CameraPreset::for_mode(new)),
            Effect::ClearRings,
            Effect::StartTransition { mode: new, root },
          ],
        )
      }

      // A root change always re-targets, even to the same root.
      (ChangeRoot(root), state) => {
        let mode = state.mode();
        info!("root offset -> {root}");
        (
          Resting { mode, root },
          vec![Effect::ClearRings, Effect::StartTransition { mode, root }],
        )
      }

      // Begin replaces any previous transition: last write wins.
      (Begin(transition), state) => {
        let mode = state.mode();
        let root = state.root();
        (
          Transitioning {
            mode,
            root,
            transition,
          },
          vec![],
        )
      }

      (
        Frame { now, generation },
        Transitioning {
          mode,
          root,
          transition,
        },
      ) => {
        if transition.generation != generation {
          debug!(
            "dropping stale frame for {:?}, current is {:?}",
            generation, transition.generation
          );
          return (
            Transitioning {
              mode,
              root,
              transition,
            },
            vec![],
          );
        }

        let t = transition.progress(now);
        if t >= 1.0 {
          debug!("transition to {mode} complete");
          (
            Resting { mode, root },
            vec![
              Effect::Reposition(transition.target),
              Effect::PositionsUpdated,
              Effect::RebuildRings(mode),
            ],
          )
        } else {
          let positions = transition.positions_at(ease_in_out_cubic(t));
          (
            Transitioning {
              mode,
              root,
              transition,
            },
            vec![Effect::Reposition(positions), Effect::PositionsUpdated],
          )
        }
      }

      (Frame { .. }, state @ Resting { .. }) => (state, vec![]),
    }
  }
}
