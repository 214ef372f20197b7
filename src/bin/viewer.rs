//! Native particle viewer
//!
//! Run with: cargo run --features gui --bin particle-viewer -- particle_data.py

use eframe::egui;
use particle_anim::app::{ParticleViewer, WINDOW_TITLE};
use particle_anim::config::DEFAULT_LOG_FILTER;
use particle_anim::{load_dataset, Config};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = Config::from_env_and_args()?;
    let dataset = load_dataset(&config.data_path).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "Failed to load dataset");
        e
    })?;
    let playback = config.playback();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([720.0, 760.0]),
        ..Default::default()
    };

    info!("Opening viewer window");
    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(ParticleViewer::new(cc, dataset, playback)))),
    )
    .map_err(|e| {
        error!(error = %e, "Viewer failed");
        e
    })?;

    Ok(())
}
