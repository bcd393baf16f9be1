use std::time::Duration;

use crate::animation::{ease_in_out_cubic, progress, Generation};
use crate::geometry::{lerp_point, Float, Point3};

/// An in-flight move of every node from where it was to where the new layout wants it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
  pub generation: Generation,
  pub started_at: Duration,
  pub duration: Duration,
  pub start: Vec<Point3>,
  pub target: Vec<Point3>,
}

impl Transition {
  pub fn new(
    generation: Generation,
    started_at: Duration,
    duration: Duration,
    start: Vec<Point3>,
    target: Vec<Point3>,
  ) -> Transition {
    Transition {
      generation,
      started_at,
      duration,
      start,
      target,
    }
  }

  /// Linear progress at time `now`, clamped to 0 ..= 1.
  pub fn progress(&self, now: Duration) -> Float {
    progress(now.saturating_sub(self.started_at), self.duration)
  }

  pub fn is_complete(&self, now: Duration) -> bool {
    self.progress(now) >= 1.0
  }

  /// Node positions at eased fraction `e`. `e = 0` is the start and `e = 1` the target, exactly.
  pub fn positions_at(&self, e: Float) -> Vec<Point3> {
    self
      .start
      .iter()
      .zip(self.target.iter())
      .map(|(a, b)| lerp_point(*a, *b, e))
      .collect()
  }

  /// Node positions at time `now`.
  pub fn frame(&self, now: Duration) -> Vec<Point3> {
    self.positions_at(ease_in_out_cubic(self.progress(now)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn transition() -> Transition {
    Transition::new(
      Generation::default(),
      Duration::from_millis(100),
      Duration::from_millis(1000),
      vec![Point3::new(0.3, 1.7, -2.9), Point3::new(5.0, 5.0, 5.0)],
      vec![Point3::new(-4.1, 0.0, 1.0 / 3.0), Point3::new(5.0, 5.0, 5.0)],
    )
  }

  #[test]
  fn endpoints_are_exact() {
    let t = transition();
    assert_eq!(t.positions_at(0.0), t.start);
    assert_eq!(t.positions_at(1.0), t.target);
    assert_eq!(t.frame(Duration::from_millis(100)), t.start);
    assert_eq!(t.frame(Duration::from_millis(1100)), t.target);
    assert_eq!(t.frame(Duration::from_millis(5000)), t.target);
  }

  #[test]
  fn halfway_in_time_is_halfway_in_space() {
    let t = transition();
    assert_eq!(t.progress(Duration::from_millis(600)), 0.5);
    let mid = t.frame(Duration::from_millis(600));
    assert!((mid[0].x - (0.3 - 4.1) / 2.0).abs() < 1e-12);
    assert!(!t.is_complete(Duration::from_millis(600)));
    assert!(t.is_complete(Duration::from_millis(1100)));
  }

  #[test]
  fn frames_before_the_start_stay_at_the_start() {
    let t = transition();
    assert_eq!(t.frame(Duration::ZERO), t.start);
  }
}
