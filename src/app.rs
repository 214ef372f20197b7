//! Particle viewer window
//!
//! Hosts the playback driver inside the eframe event loop: every update
//! advances playback by the wall-clock time since the previous update and
//! redraws the current frame as a scatter plot with fixed bounds.

use eframe::egui;
use egui_plot::{Plot, PlotBounds, PlotPoints, Points};
use tracing::{info, trace};

use crate::core::{ParticleDataset, PlaybackOptions, Player};
use crate::theme::{colors, viewer_visuals, MARKER_RADIUS};
use crate::time::{now_seconds, FrameClock};

pub const WINDOW_TITLE: &str = "particle-anim";

pub struct ParticleViewer {
    player: Player,
    clock: FrameClock,
    fps_counter: FpsCounter,
}

impl ParticleViewer {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        dataset: ParticleDataset,
        options: PlaybackOptions,
    ) -> Self {
        cc.egui_ctx.set_visuals(viewer_visuals());
        Self::with_player(Player::new(dataset, options))
    }

    fn with_player(player: Player) -> Self {
        Self {
            player,
            clock: FrameClock::new(),
            fps_counter: FpsCounter::new(),
        }
    }

    /// Advance playback by the time since the last update
    fn step(&mut self) {
        let elapsed = self.clock.lap();
        // Draw frame 0 right away instead of waiting one interval
        let drawn = if self.player.current_frame().is_none() {
            self.player.tick()
        } else {
            self.player.advance(elapsed)
        };

        if let Some(view) = drawn {
            trace!(frame = ?view.frame(), points = view.len(), "Frame drawn");
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        self.fps_counter.tick();

        let dataset = self.player.dataset();
        let frame_text = match self.player.current_frame() {
            Some(frame) => format!("frame {} / {}", frame + 1, dataset.frame_count()),
            None => format!("frame - / {}", dataset.frame_count()),
        };

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(frame_text)
                    .color(colors::TEXT_SECONDARY)
                    .monospace()
                    .size(11.0),
            );
            ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED).size(11.0));
            ui.label(
                egui::RichText::new(format!("{} particles", dataset.particles_per_frame()))
                    .color(colors::TEXT_MUTED)
                    .monospace()
                    .size(11.0),
            );
            ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED).size(11.0));
            ui.label(
                egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                    .color(colors::TEXT_MUTED)
                    .monospace()
                    .size(11.0),
            );

            if !self.player.is_running() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new("stopped").color(colors::TEXT_MUTED).size(11.0));
                });
            }
        });
    }

    fn render_particles(&self, ui: &mut egui::Ui) {
        let bounds = self.player.dataset().bounds();
        let (min, max) = bounds.x_range();
        let view = self.player.view();

        Plot::new("particles")
            .show_axes([true, true])
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_background(false)
            .include_x(min)
            .include_x(max)
            .include_y(min)
            .include_y(max)
            .label_formatter(|_name, value| format!("x={:.2} y={:.2}", value.x, value.y))
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([min, min], [max, max]));

                let points: PlotPoints = view.points().collect();
                plot_ui.points(
                    Points::new(points)
                        .color(colors::PARTICLE)
                        .radius(MARKER_RADIUS)
                        .filled(true),
                );
            });
    }
}

impl eframe::App for ParticleViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step();

        if self.player.is_running() {
            ctx.request_repaint_after(self.player.interval());
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(6.0))
            .show(ctx, |ui| self.render_header(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| self.render_particles(ui));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.player.stop();
        info!(frame = ?self.player.current_frame(), "Viewer closed");
    }
}

/// FPS counter over the last 60 updates
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    pub fn tick(&mut self) {
        self.push(now_seconds());
    }

    fn push(&mut self, at_seconds: f64) {
        self.frames.push(at_seconds);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) if self.frames.len() >= 2 && last > first => {
                (self.frames.len() as f64 - 1.0) / (last - first)
            }
            _ => 0.0,
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
