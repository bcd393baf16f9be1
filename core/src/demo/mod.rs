//! The piano-to-concentric demo.
//!
//! [Choreography] turns a progress value in `[0, 1]` into a full frame, so
//! scrubbing and playback share one code path. [DemoPlayer] adds the playback
//! clock on top of it.

use std::time::Duration;

use log::debug;

use crate::animation::Generation;
use crate::config::SpiralConfig;
use crate::geometry::Float;

pub mod choreography;
pub mod piano;

pub use choreography::{Choreography, DemoFrame, KeyFrame, Phase};

/// Playback clock over a [Choreography].
///
/// Progress is derived from the time played since the last resume point rather than
/// summed per frame, so any split of the same elapsed time lands on the same frame.
#[derive(Debug)]
pub struct DemoPlayer {
  choreography: Choreography,
  /// Progress at the moment playback last (re)started.
  resume_progress: Float,
  /// Time played since `resume_progress`.
  played: Duration,
  playing: bool,
  generation: Generation,
}

impl DemoPlayer {
  pub fn new(config: &SpiralConfig) -> DemoPlayer {
    DemoPlayer {
      choreography: Choreography::new(config),
      resume_progress: 0.0,
      played: Duration::ZERO,
      playing: false,
      generation: Generation::default(),
    }
  }

  pub fn choreography(&self) -> &Choreography {
    &self.choreography
  }

  pub fn progress(&self) -> Float {
    let total = self.choreography.total();
    if total.is_zero() {
      return if self.played.is_zero() { self.resume_progress } else { 1.0 };
    }
    (self.resume_progress + self.played.as_secs_f64() / total.as_secs_f64()).min(1.0)
  }

  pub fn is_playing(&self) -> bool {
    self.playing
  }

  /// Folds the time played into the resume point.
  fn rebase(&mut self, progress: Float) {
    self.resume_progress = progress.clamp(0.0, 1.0);
    self.played = Duration::ZERO;
  }

  /// Starts playback, restarting from the beginning if the demo already finished.
  /// The returned token must be passed to [advance](DemoPlayer::advance).
  pub fn play(&mut self) -> Generation {
    let progress = self.progress();
    self.rebase(if progress >= 1.0 { 0.0 } else { progress });
    self.playing = true;
    let token = self.generation.bump();
    debug!("demo playing from {:.3}", self.resume_progress);
    token
  }

  /// Stops playback. Any outstanding token becomes stale.
  pub fn pause(&mut self) {
    self.playing = false;
    self.generation.bump();
    self.rebase(self.progress());
  }

  pub fn reset(&mut self) {
    self.pause();
    self.rebase(0.0);
  }

  /// Jumps to `progress`, pausing playback.
  pub fn seek(&mut self, progress: Float) -> DemoFrame {
    self.pause();
    self.rebase(progress);
    self.frame()
  }

  /// Moves playback forward by `elapsed`. Returns `None` when paused or when
  /// `token` belongs to an earlier `play` call.
  pub fn advance(&mut self, token: Generation, elapsed: Duration) -> Option<DemoFrame> {
    if !self.playing || !self.generation.is_current(token) {
      return None;
    }
    self.played = self.played.saturating_add(elapsed);
    if self.progress() >= 1.0 {
      debug!("demo finished");
      self.playing = false;
    }
    Some(self.frame())
  }

  pub fn frame(&self) -> DemoFrame {
    self.choreography.frame_at(self.progress())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn player() -> DemoPlayer {
    DemoPlayer::new(&SpiralConfig::default())
  }

  #[test]
  fn seeking_is_repeatable() {
    let mut p = player();
    let a = p.seek(0.42);
    p.seek(0.9);
    let b = p.seek(0.42);
    assert_eq!(a, b);
    assert!(!p.is_playing());
  }

  #[test]
  fn seek_clamps() {
    let mut p = player();
    assert_eq!(p.seek(1.5).progress, 1.0);
    assert_eq!(p.seek(-0.5).progress, 0.0);
  }

  #[test]
  fn stale_token_is_ignored() {
    let mut p = player();
    let token = p.play();
    assert!(p.advance(token, Duration::from_millis(100)).is_some());
    p.pause();
    assert!(p.advance(token, Duration::from_millis(100)).is_none());

    let fresh = p.play();
    assert!(p.advance(token, Duration::from_millis(100)).is_none());
    assert!(p.advance(fresh, Duration::from_millis(100)).is_some());
  }

  #[test]
  fn playback_stops_at_the_end() {
    let mut p = player();
    let token = p.play();
    let total = p.choreography().total();
    let frame = p.advance(token, total * 2);
    match frame {
      Some(f) => assert_eq!(f.progress, 1.0),
      None => panic!("expected a frame"),
    }
    assert!(!p.is_playing());
    assert!(p.advance(token, Duration::from_millis(16)).is_none());
  }

  #[test]
  fn play_from_the_end_restarts() {
    let mut p = player();
    p.seek(1.0);
    p.play();
    assert_eq!(p.progress(), 0.0);
    assert!(p.is_playing());
  }

  #[test]
  fn playback_progress_tracks_elapsed_time() {
    let mut p = player();
    let token = p.play();
    let total = p.choreography().total().as_secs_f64();
    let step = Duration::from_micros(16_667);
    for n in 1..=200u32 {
      let frame = match p.advance(token, step) {
        Some(f) => f,
        None => panic!("Unexpected stop at frame {n}"),
      };
      let expected = (step * n).as_secs_f64() / total;
      assert_eq!(p.progress(), expected, "frame {n}");
      assert_eq!(frame.progress, expected, "frame {n}");
    }
  }

  #[test]
  fn split_advances_match_one_long_advance() {
    let mut a = player();
    let mut b = player();
    let ta = a.play();
    let tb = b.play();
    for _ in 0..60 {
      a.advance(ta, Duration::from_millis(10));
    }
    b.advance(tb, Duration::from_millis(600));
    assert_eq!(a.frame(), b.frame());
  }

  #[test]
  fn pause_and_resume_keep_position() {
    let mut p = player();
    let token = p.play();
    p.advance(token, Duration::from_millis(400));
    let before = p.progress();
    p.pause();
    assert_eq!(p.progress(), before);

    let token = p.play();
    assert_eq!(p.progress(), before);
    p.advance(token, Duration::from_millis(400));
    assert!(p.progress() > before);

    p.seek(0.25);
    let token = p.play();
    let total = p.choreography().total();
    p.advance(token, total / 4);
    assert!((p.progress() - 0.5).abs() < 1e-12);
  }

  #[test]
  fn reset_rewinds() {
    let mut p = player();
    let token = p.play();
    p.advance(token, Duration::from_millis(500));
    assert!(p.progress() > 0.0);
    p.reset();
    assert_eq!(p.progress(), 0.0);
    assert!(!p.is_playing());
  }
}
