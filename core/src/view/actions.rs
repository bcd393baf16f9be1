use std::fmt::Display;
use std::time::Duration;

use crate::animation::Generation;
use crate::layout::{RootOffset, ViewMode};
use crate::view::transition::Transition;

/// Actions are inputs into the view state machine.
/// See [`State::next`](super::state::State::next) for the valid (action, state) pairings.
#[derive(Debug, Clone)]
pub enum Action {
  /// The user asked for a different layout.
  ToggleMode(ViewMode),

  /// The user rotated the layout to a new root.
  ChangeRoot(RootOffset),

  /// Start positions and targets have been captured and the move can begin.
  Begin(Transition),

  /// An animation frame at time `now`, on behalf of the transition with `generation`.
  Frame { now: Duration, generation: Generation },
}

impl Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use Action::*;
    match self {
      ToggleMode(mode) => write!(f, "ToggleMode({mode})"),
      ChangeRoot(root) => write!(f, "ChangeRoot({root})"),
      Begin(t) => write!(f, "Begin({:?})", t.generation),
      Frame { now, generation } => write!(f, "Frame({}ms, {:?})", now.as_millis(), generation),
    }
  }
}
