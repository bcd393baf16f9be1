use std::time::Duration;

use error_stack::{IntoReport, Result, ResultExt};
use log::{debug, info};
use tokio::time::{interval, Instant, MissedTickBehavior};

use spiral_core::bus::Event;
use spiral_core::config::SpiralConfig;
use spiral_core::error::SpiralError;
use spiral_core::layout::{RootOffset, ViewMode};
use spiral_core::session::Session;

/// Longest a simulation may run before it is abandoned.
const TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run_simulate(
  config: &SpiralConfig,
  mode: &str,
  root: Option<i32>,
  fps: u32,
) -> Result<(), SpiralError> {
  let mode: ViewMode = mode
    .parse()
    .into_report()
    .attach_printable("simulate --mode")?;

  let mut session = Session::new(config.clone());
  session.on(|e| {
    if !matches!(e, Event::Tick(_) | Event::PositionsUpdated) {
      info!("event: {e}");
    }
  });

  if let Some(r) = root {
    session.emit(Event::RootChanged(RootOffset::new(r)));
  }
  session.emit(Event::ViewToggle(mode));

  let mut ticker = interval(Duration::from_secs_f64(1.0 / fps.max(1) as f64));
  ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

  let started = Instant::now();
  let mut last = started;
  let mut frames = 0;
  while session.is_animating() && started.elapsed() < TIMEOUT {
    let now = ticker.tick().await;
    let elapsed = now.saturating_duration_since(last);
    last = now;
    session.tick(elapsed);
    frames += 1;
    debug!("frame {frames}: +{}ms", elapsed.as_millis());
  }

  info!(
    "settled in {frames} frames ({:.2}s): mode {}, root {}, {} rings",
    started.elapsed().as_secs_f64(),
    session.mode(),
    session.root(),
    session.rings().len()
  );
  Ok(())
}
