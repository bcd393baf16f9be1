use std::time::Duration;

use error_stack::{IntoReport, Result, ResultExt};
use log::{debug, info};
use tokio::time::{interval, Instant, MissedTickBehavior};

use spiral_core::config::SpiralConfig;
use spiral_core::demo::DemoPlayer;
use spiral_core::error::SpiralError;

/// Plays the demo from `progress` to the end on a real frame clock.
pub async fn play_demo(config: &SpiralConfig, progress: f64, fps: u32) -> Result<(), SpiralError> {
  let mut player = DemoPlayer::new(config);
  player.seek(progress);
  let token = player.play();

  let mut ticker = interval(Duration::from_secs_f64(1.0 / fps.max(1) as f64));
  ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

  let started = Instant::now();
  let mut last = started;
  let mut frames = 0;
  while player.is_playing() {
    let now = ticker.tick().await;
    let elapsed = now.saturating_duration_since(last);
    last = now;
    if let Some(frame) = player.advance(token, elapsed) {
      frames += 1;
      debug!("frame {frames}: {:.3} ({:?})", frame.progress, frame.phase);
    }
  }

  info!(
    "demo finished in {frames} frames ({:.2}s of {:.2}s)",
    started.elapsed().as_secs_f64(),
    player.choreography().total().as_secs_f64()
  );
  Ok(())
}

pub fn run_demo(config: &SpiralConfig, progress: f64, json: bool) -> Result<(), SpiralError> {
  let mut player = DemoPlayer::new(config);
  let frame = player.seek(progress);

  if json {
    let out = serde_json::to_string_pretty(&frame)
      .into_report()
      .change_context(SpiralError::OutputError)?;
    println!("{out}");
    return Ok(());
  }

  let total = player.choreography().total();
  let [cx, cy, cz] = frame.camera_position;
  println!(
    "{:.3} of {:.2}s ({:?}), line opacity {:.2}, camera ({cx:.2}, {cy:.2}, {cz:.2})",
    frame.progress,
    total.as_secs_f64(),
    frame.phase,
    frame.line_opacity
  );
  for key in frame.keys.iter() {
    let [x, y, z] = key.position;
    println!(
      "{:>3}  ({x:>7.3}, {y:>7.3}, {z:>7.3})  rot {:>7.3}  scale {:.2}  box {:.2}  sphere {:.2}",
      key.midi, key.rotation_y, key.scale, key.box_opacity, key.sphere_opacity
    );
  }
  Ok(())
}
