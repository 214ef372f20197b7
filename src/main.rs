//! Headless playback of a particle dataset
//!
//! Run with: cargo run --features cli --bin particle-cli -- particle_data.py

use std::time::Duration;

use particle_anim::config::DEFAULT_LOG_FILTER;
use particle_anim::{load_dataset, Config, Player};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// tokio intervals reject a zero period
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = Config::from_env_and_args()?;
    let dataset = load_dataset(&config.data_path).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "Failed to load dataset");
        e
    })?;

    let mut player = Player::new(dataset, config.playback());
    let mut frame_interval = tokio::time::interval(config.interval.max(MIN_INTERVAL));
    frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    stats_interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frames_drawn = 0u64;
    let mut frames_last_interval = 0u64;
    let mut loops = 0u64;

    info!("Playing, press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let Some(view) = player.tick() else {
                    info!("Playback finished");
                    break;
                };
                let frame = view.frame().unwrap_or_default();
                if frame == 0 && frames_drawn > 0 {
                    loops += 1;
                }
                match view.centroid() {
                    Some(c) => debug!(frame, points = view.len(), cx = c.x, cy = c.y, "frame"),
                    None => debug!(frame, points = 0, "frame"),
                }
                frames_drawn += 1;
                frames_last_interval += 1;
            }
            _ = stats_interval.tick() => {
                info!(
                    frame = ?player.current_frame(),
                    frames = player.dataset().frame_count(),
                    drawn = frames_drawn,
                    loops,
                    "/sec" = format!("{:.1}", frames_last_interval as f64 / 5.0),
                    "stats"
                );
                frames_last_interval = 0;
            }
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    error!(error = %e, "Failed to listen for Ctrl-C");
                }
                player.stop();
                info!(drawn = frames_drawn, loops, "Interrupted");
                break;
            }
        }
    }
    Ok(())
}
