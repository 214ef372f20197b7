//! Frame renderer - turns a frame index into the point set on screen

use tracing::trace;

use super::dataset::{ParticleDataset, Point2};

/// Points currently displayed, split into coordinate arrays
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameView {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Index of the frame these points came from (None before the first render)
    frame: Option<usize>,
}

impl FrameView {
    pub fn frame(&self) -> Option<usize> {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(&self.ys).map(|(&x, &y)| [x, y])
    }

    /// Mean position of the displayed points
    pub fn centroid(&self) -> Option<Point2> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let (sx, sy) = self
            .points()
            .fold((0.0, 0.0), |(sx, sy), [x, y]| (sx + x, sy + y));
        Some(Point2::new(sx / n, sy / n))
    }
}

/// Owns the dataset and the single visual element drawn from it
pub struct FrameRenderer {
    dataset: ParticleDataset,
    view: FrameView,
}

impl FrameRenderer {
    pub fn new(dataset: ParticleDataset) -> Self {
        Self {
            dataset,
            view: FrameView::default(),
        }
    }

    pub fn dataset(&self) -> &ParticleDataset {
        &self.dataset
    }

    pub fn view(&self) -> &FrameView {
        &self.view
    }

    /// Clear the visual element before the first frame is shown
    pub fn init(&mut self) -> &FrameView {
        self.view.xs.clear();
        self.view.ys.clear();
        self.view.frame = None;
        &self.view
    }

    /// Replace the displayed points with frame `index`
    pub fn render(&mut self, index: usize) -> &FrameView {
        let block = self.dataset.frame(index);

        self.view.xs.clear();
        self.view.ys.clear();
        self.view.xs.extend(block.iter().map(|p| p.x));
        self.view.ys.extend(block.iter().map(|p| p.y));
        self.view.frame = Some(index);

        trace!(frame = index, points = block.len(), "Frame rendered");
        &self.view
    }
}
