//! Particle dataset - all frames' positions in one flat buffer
//!
//! Positions are stored frame after frame: rows `[i*P, i*P + P)` belong to
//! frame `i`, where `P` is the particle count per frame.

use thiserror::Error;
use tracing::debug;

/// Margin added around the simulation box when displaying it
pub const DISPLAY_MARGIN: f64 = 2.0;

/// A single particle position in the XY plane
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("particle count per frame must be at least 1")]
    ZeroParticles,
    #[error("{len} positions do not split into frames of {per_frame} particles")]
    RaggedFrames { len: usize, per_frame: usize },
}

/// Fixed viewing rectangle, identical on both axes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayBounds {
    pub min: f64,
    pub max: f64,
}

impl DisplayBounds {
    /// `[-margin, box_size + margin]`
    pub fn from_box(box_size: f64, margin: f64) -> Self {
        Self {
            min: -margin,
            max: box_size + margin,
        }
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Immutable positions of every particle in every frame
#[derive(Clone, Debug)]
pub struct ParticleDataset {
    box_size: f64,
    per_frame: usize,
    positions: Vec<Point2>,
}

impl ParticleDataset {
    pub fn new(
        box_size: f64,
        per_frame: usize,
        positions: Vec<Point2>,
    ) -> Result<Self, DatasetError> {
        if per_frame == 0 {
            return Err(DatasetError::ZeroParticles);
        }
        if positions.len() % per_frame != 0 {
            return Err(DatasetError::RaggedFrames {
                len: positions.len(),
                per_frame,
            });
        }

        debug!(
            box_size,
            per_frame,
            rows = positions.len(),
            frames = positions.len() / per_frame,
            "Dataset assembled"
        );

        Ok(Self {
            box_size,
            per_frame,
            positions,
        })
    }

    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Particles per frame (P)
    pub fn particles_per_frame(&self) -> usize {
        self.per_frame
    }

    pub fn frame_count(&self) -> usize {
        self.positions.len() / self.per_frame
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    /// Rows `[i*P, i*P + P)`, clamped to the dataset length.
    ///
    /// An index past the end yields a short or empty slice instead of panicking.
    pub fn frame(&self, index: usize) -> &[Point2] {
        let len = self.positions.len();
        let start = index.saturating_mul(self.per_frame).min(len);
        let end = start.saturating_add(self.per_frame).min(len);
        &self.positions[start..end]
    }

    pub fn bounds(&self) -> DisplayBounds {
        DisplayBounds::from_box(self.box_size, DISPLAY_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point2> {
        (0..n).map(|i| Point2::new(i as f64, i as f64 * 10.0)).collect()
    }

    #[test]
    fn test_frame_count() {
        let ds = ParticleDataset::new(10.0, 3, points(9)).unwrap();
        assert_eq!(ds.frame_count(), 3);
        assert_eq!(ds.particles_per_frame(), 3);
        assert_eq!(ds.len(), 9);
    }

    #[test]
    fn test_rejects_ragged_frames() {
        let err = ParticleDataset::new(10.0, 4, points(9)).unwrap_err();
        assert_eq!(err, DatasetError::RaggedFrames { len: 9, per_frame: 4 });
    }

    #[test]
    fn test_rejects_zero_particles() {
        assert_eq!(
            ParticleDataset::new(10.0, 0, Vec::new()).unwrap_err(),
            DatasetError::ZeroParticles
        );
    }

    #[test]
    fn test_empty_dataset_has_no_frames() {
        let ds = ParticleDataset::new(10.0, 5, Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.frame_count(), 0);
        assert!(ds.frame(0).is_empty());
    }

    #[test]
    fn test_frame_slices_consecutive_rows() {
        let ds = ParticleDataset::new(10.0, 3, points(9)).unwrap();
        assert_eq!(ds.frame(1), &ds.positions()[3..6]);
        assert_eq!(ds.frame(2)[0], Point2::new(6.0, 60.0));
    }

    #[test]
    fn test_frame_out_of_range_is_empty() {
        let ds = ParticleDataset::new(10.0, 3, points(9)).unwrap();
        assert!(ds.frame(3).is_empty());
        assert!(ds.frame(usize::MAX).is_empty());
    }

    #[test]
    fn test_bounds_include_margin() {
        let ds = ParticleDataset::new(10.0, 3, points(9)).unwrap();
        let bounds = ds.bounds();
        assert_eq!(bounds.x_range(), (-2.0, 12.0));
        assert_eq!(bounds.y_range(), (-2.0, 12.0));
    }
}
