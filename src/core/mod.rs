//! Platform-agnostic core module - shared between the viewer and CLI

pub mod dataset;
pub mod frame;
pub mod loader;
pub mod player;

pub use dataset::{DatasetError, DisplayBounds, ParticleDataset, Point2, DISPLAY_MARGIN};
pub use frame::{FrameRenderer, FrameView};
pub use loader::{load_dataset, parse_json, parse_particle_module, LoadError};
pub use player::{PlaybackOptions, PlaybackState, Player, DEFAULT_INTERVAL};
