use std::time::Duration;

use crate::geometry::Float;

/// Cubic ease-in-out: `4t³` for the first half, `1 − (−2t + 2)³ / 2` after.
///
/// ```
/// use spiral_core::animation::ease_in_out_cubic;
/// assert_eq!(ease_in_out_cubic(0.0), 0.0);
/// assert_eq!(ease_in_out_cubic(0.5), 0.5);
/// assert_eq!(ease_in_out_cubic(1.0), 1.0);
/// ```
pub fn ease_in_out_cubic(t: Float) -> Float {
  if t < 0.5 {
    4.0 * t * t * t
  } else {
    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
  }
}

/// Fraction of `duration` covered by `elapsed`, clamped to 0 ..= 1.
/// A zero duration is complete immediately.
pub fn progress(elapsed: Duration, duration: Duration) -> Float {
  if duration.is_zero() {
    return 1.0;
  }
  (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Monotonic counter used to invalidate animations that have been superseded.
/// Each call to [bump](Generation::bump) returns a value no earlier frame can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
  pub fn bump(&mut self) -> Generation {
    self.0 += 1;
    *self
  }

  pub fn is_current(&self, other: Generation) -> bool {
    self.0 == other.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ease_is_monotonic() {
    let samples: Vec<Float> = (0..=100).map(|i| ease_in_out_cubic(i as Float / 100.0)).collect();
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(ease_in_out_cubic(0.25), 0.0625);
  }

  #[test]
  fn progress_clamps() {
    let d = Duration::from_millis(1000);
    assert_eq!(progress(Duration::from_millis(250), d), 0.25);
    assert_eq!(progress(Duration::from_millis(2500), d), 1.0);
    assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
  }

  #[test]
  fn bumped_generation_invalidates_older_ones() {
    let mut g = Generation::default();
    let first = g.bump();
    assert!(g.is_current(first));
    let second = g.bump();
    assert!(!g.is_current(first));
    assert!(g.is_current(second));
  }
}
