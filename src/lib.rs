//! Particle animation viewer
//!
//! Loads precomputed particle positions (all frames concatenated, a fixed
//! number of particles per frame) and plays them back as a looping 2D
//! scatter animation:
//! - `particle-viewer` (feature `gui`): native eframe window
//! - `particle-cli` (feature `cli`): headless playback that logs each frame

pub mod config;
pub mod core;
pub mod time;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod theme;

pub use config::{Config, ConfigError};
pub use crate::core::{load_dataset, FrameView, LoadError, ParticleDataset, PlaybackOptions, Player};
