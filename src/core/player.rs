//! Playback driver - steps the frame renderer on a fixed interval
//!
//! Pure state, no window or timer: callers feed it ticks (CLI) or elapsed
//! wall-clock time (viewer) and draw whatever view it hands back.

use std::time::Duration;
use tracing::{debug, info};

use super::dataset::ParticleDataset;
use super::frame::{FrameRenderer, FrameView};

/// Time between frames unless configured otherwise
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackOptions {
    pub interval: Duration,
    /// Wrap to frame 0 after the last frame
    pub repeat: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            repeat: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Stopped,
}

pub struct Player {
    renderer: FrameRenderer,
    options: PlaybackOptions,
    state: PlaybackState,
    /// Frame drawn by the next tick
    next_frame: usize,
    /// Elapsed time not yet consumed by a whole interval
    pending: Duration,
}

impl Player {
    pub fn new(dataset: ParticleDataset, options: PlaybackOptions) -> Self {
        let mut renderer = FrameRenderer::new(dataset);
        renderer.init();

        info!(
            frames = renderer.dataset().frame_count(),
            particles = renderer.dataset().particles_per_frame(),
            interval_ms = options.interval.as_millis() as u64,
            repeat = options.repeat,
            "Playback ready"
        );

        Self {
            renderer,
            options,
            state: PlaybackState::Running,
            next_frame: 0,
            pending: Duration::ZERO,
        }
    }

    pub fn dataset(&self) -> &ParticleDataset {
        self.renderer.dataset()
    }

    pub fn view(&self) -> &FrameView {
        self.renderer.view()
    }

    pub fn interval(&self) -> Duration {
        self.options.interval
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Frame currently on screen, None until the first tick
    pub fn current_frame(&self) -> Option<usize> {
        self.renderer.view().frame()
    }

    pub fn stop(&mut self) {
        if self.state == PlaybackState::Running {
            debug!(frame = ?self.current_frame(), "Playback stopped");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Draw the next frame. Returns None once stopped.
    pub fn tick(&mut self) -> Option<&FrameView> {
        if self.state == PlaybackState::Stopped {
            return None;
        }

        let frame = self.next_frame;
        match self.successor(frame) {
            Some(next) => {
                if next == 0 && frame != 0 {
                    debug!(frames = self.dataset().frame_count(), "Looping to first frame");
                }
                self.next_frame = next;
            }
            None => {
                info!(frame, "Reached last frame");
                self.state = PlaybackState::Stopped;
            }
        }

        Some(self.renderer.render(frame))
    }

    /// Consume wall-clock time and draw the next frame once an interval has passed.
    ///
    /// Moves at most one frame per call: a slow redraw slows playback down
    /// but never leaves a frame undrawn. Backlog beyond one interval is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> Option<&FrameView> {
        if self.state == PlaybackState::Stopped {
            return None;
        }

        self.pending += elapsed;
        if self.options.interval.is_zero() {
            self.pending = Duration::ZERO;
        } else {
            if self.pending < self.options.interval {
                return None;
            }
            let interval = self.options.interval.as_nanos();
            self.pending = Duration::from_nanos((self.pending.as_nanos() % interval) as u64);
        }

        self.tick()
    }

    fn successor(&self, frame: usize) -> Option<usize> {
        let next = frame + 1;
        if next < self.dataset().frame_count() {
            Some(next)
        } else if self.options.repeat {
            Some(0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Point2;

    fn dataset() -> ParticleDataset {
        let positions = (0..9).map(|i| Point2::new(i as f64, -(i as f64))).collect();
        ParticleDataset::new(10.0, 3, positions).unwrap()
    }

    fn frame_of(view: Option<&FrameView>) -> Option<usize> {
        view.and_then(|v| v.frame())
    }

    #[test]
    fn test_starts_running_with_empty_view() {
        let player = Player::new(dataset(), PlaybackOptions::default());
        assert!(player.is_running());
        assert!(player.view().is_empty());
        assert_eq!(player.current_frame(), None);
        assert_eq!(player.interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_first_tick_matches_explicit_frame_zero() {
        let mut player = Player::new(dataset(), PlaybackOptions::default());
        let first = player.tick().cloned().unwrap();

        let mut renderer = FrameRenderer::new(dataset());
        assert_eq!(&first, renderer.render(0));
    }

    #[test]
    fn test_ticks_in_order_and_wraps() {
        let mut player = Player::new(dataset(), PlaybackOptions::default());
        let first = player.tick().cloned().unwrap();
        assert_eq!(frame_of(player.tick()), Some(1));
        assert_eq!(frame_of(player.tick()), Some(2));

        let wrapped = player.tick().cloned().unwrap();
        assert_eq!(wrapped, first);
        assert!(player.is_running());
    }

    #[test]
    fn test_without_repeat_stops_on_last_frame() {
        let options = PlaybackOptions {
            repeat: false,
            ..Default::default()
        };
        let mut player = Player::new(dataset(), options);
        player.tick();
        player.tick();
        assert_eq!(frame_of(player.tick()), Some(2));
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert!(player.tick().is_none());
        assert_eq!(player.current_frame(), Some(2));
    }

    #[test]
    fn test_stop_halts_playback() {
        let mut player = Player::new(dataset(), PlaybackOptions::default());
        player.tick();
        player.stop();
        assert!(player.tick().is_none());
        assert!(player.advance(Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_advance_waits_for_full_interval() {
        let mut player = Player::new(dataset(), PlaybackOptions::default());
        assert!(player.advance(Duration::from_millis(4)).is_none());
        assert!(player.advance(Duration::from_millis(4)).is_none());
        assert_eq!(frame_of(player.advance(Duration::from_millis(4))), Some(0));
        // 2ms carried over
        assert_eq!(frame_of(player.advance(Duration::from_millis(8))), Some(1));
    }

    #[test]
    fn test_display_rate_slower_than_interval_draws_every_frame() {
        let positions = (0..10).map(|i| Point2::new(i as f64, 0.0)).collect();
        let dataset = ParticleDataset::new(10.0, 1, positions).unwrap();
        let mut player = Player::new(dataset, PlaybackOptions::default());

        // ~60 Hz redraws against a 10ms interval
        let refresh = Duration::from_micros(16_667);
        let mut shown = vec![frame_of(player.tick()).unwrap()];
        for _ in 0..11 {
            shown.push(frame_of(player.advance(refresh)).unwrap());
        }
        assert_eq!(shown, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1]);
    }

    #[test]
    fn test_long_stall_draws_only_the_next_frame() {
        let options = PlaybackOptions {
            repeat: false,
            ..Default::default()
        };
        let mut player = Player::new(dataset(), options);
        assert_eq!(frame_of(player.advance(Duration::from_secs(10))), Some(0));
        assert_eq!(frame_of(player.advance(Duration::from_millis(10))), Some(1));
        assert!(player.is_running());
        // stall backlog was dropped, a short update does not draw
        assert!(player.advance(Duration::from_millis(1)).is_none());
    }

    #[test]
    fn test_zero_interval_draws_every_call() {
        let options = PlaybackOptions {
            interval: Duration::ZERO,
            repeat: true,
        };
        let mut player = Player::new(dataset(), options);
        assert_eq!(frame_of(player.advance(Duration::ZERO)), Some(0));
        assert_eq!(frame_of(player.advance(Duration::ZERO)), Some(1));
    }

    #[test]
    fn test_empty_dataset_keeps_drawing_nothing() {
        let empty = ParticleDataset::new(10.0, 3, Vec::new()).unwrap();
        let mut player = Player::new(empty, PlaybackOptions::default());
        assert!(player.tick().unwrap().is_empty());
        assert!(player.tick().unwrap().is_empty());
        assert!(player.is_running());
    }
}
