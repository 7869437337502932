//! Main application loop - eframe::App implementation.
//!
//! Each frame:
//! 1. Feed viewport geometry through the resize coordinator
//! 2. Apply scroll input to the span offset and push progress into the player
//! 3. Drain preload completions and pending redraw requests
//! 4. Paint the frame canvas, overlay bands, and loading indicator
//! 5. Render the thought switcher and the note capture modal

use std::time::Duration;

use eframe::egui;
use eframe::glow;
use log::trace;

use crate::app::BloomApp;
use crate::app::overlay::{
    CAPTURE_ACTIVE_AT, CAPTURE_FADE, SECTIONS_FADE, STATS_FADE, SUBTITLE_FADE, TITLE_FADE, fade,
    title_shift,
};
use crate::core::player::PlayerState;
use crate::core::scroll::ScrollSpan;
use crate::core::surface::Surface;

impl eframe::App for BloomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rect = ctx.screen_rect();
        let pixel_ratio = ctx.pixels_per_point();

        // Geometry changes are debounced; a commit forces a repaint of the
        // current frame at the new dimensions.
        self.resize
            .observe(Surface::from_viewport(rect.width(), rect.height(), pixel_ratio));
        if let Some(surface) = self.resize.tick() {
            let viewport_pts = surface.height as f32 / surface.pixel_ratio;
            let span = ScrollSpan::new(viewport_pts, self.settings.span_multiplier);
            self.scroll_offset = span.clamp_offset(self.scroll_offset);
            self.span = Some(span);
            self.player.on_surface_resized();
            self.player.set_progress(span.progress(self.scroll_offset));
            trace!(
                "Surface committed: {}x{}, span {}pt",
                surface.width, surface.height, span.span_height
            );
        }

        if !self.note_modal_open {
            self.handle_scroll_input(ctx);
            self.handle_keyboard_input(ctx);
        }

        // Preload completions: state machine may flip to Ready here, which
        // queues the forced first paint.
        if self.player.poll() {
            ctx.request_repaint();
        }

        // Pixel uploads happen only on an actual redraw request
        if let Some(index) = self.player.take_redraw() {
            self.renderer.render(ctx, index, self.player.frame(index));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.renderer.paint(ui.painter(), rect, pixel_ratio);
                match self.player.state() {
                    PlayerState::Ready => self.render_overlays(ui, rect),
                    PlayerState::Loading => self.render_loading_indicator(ui, rect),
                    PlayerState::Uninitialized => {}
                }
            });

        self.render_switcher(ctx);
        self.render_capture_cta(ctx);
        self.render_note_modal(ctx);

        // Keep ticking while loads settle or a resize is still debouncing;
        // otherwise input-driven repaints suffice.
        if !self.player.is_loaded() || self.resize.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }

    /// Save app settings to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(&self.settings) {
            storage.set_string(eframe::APP_KEY, json);
            trace!(
                "Settings saved: thought '{}', span x{}",
                self.settings.active_thought, self.settings.span_multiplier
            );
        }
    }

    /// Cleanup on application exit.
    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        // Abandon the in-flight batch so workers skip stale loads on shutdown
        self.player.abandon(&self.preloader);
        trace!("Pending frame loads abandoned for fast shutdown");
    }
}

impl BloomApp {
    /// Wheel/trackpad scroll advances the offset through the span. No span yet
    /// (first frame) means no scrollable distance; input is dropped.
    fn handle_scroll_input(&mut self, ctx: &egui::Context) {
        let delta = ctx.input(|i| i.raw_scroll_delta.y);
        if delta == 0.0 {
            return;
        }
        let Some(span) = self.span else {
            return;
        };

        // Scrolling down (negative egui delta) moves forward through the span
        self.scroll_offset = span.clamp_offset(self.scroll_offset - delta);
        self.player.set_progress(span.progress(self.scroll_offset));
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (next, prev) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        let count = self.archive.len();
        if count < 2 {
            return;
        }
        if next {
            self.switch_thought((self.active_idx + 1) % count);
        } else if prev {
            self.switch_thought((self.active_idx + count - 1) % count);
        }
    }

    /// Text bands faded by the same progress scalar that selects the frame.
    fn render_overlays(&self, ui: &mut egui::Ui, rect: egui::Rect) {
        let Some(thought) = self.active_thought() else {
            return;
        };
        let progress = self.player.progress();
        let theme = self.theme_color();
        let painter = ui.painter();
        let center = rect.center();

        let title_alpha = fade(progress, &TITLE_FADE);
        if title_alpha > 0.0 {
            let pos = center + egui::vec2(0.0, title_shift(progress) - 40.0);
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                &thought.title,
                egui::FontId::proportional(64.0),
                theme.gamma_multiply(title_alpha),
            );
            painter.text(
                pos + egui::vec2(0.0, 52.0),
                egui::Align2::CENTER_CENTER,
                &thought.description,
                egui::FontId::proportional(18.0),
                egui::Color32::GRAY.gamma_multiply(title_alpha),
            );
        }

        let subtitle_alpha = fade(progress, &SUBTITLE_FADE);
        if subtitle_alpha > 0.0 {
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                &thought.subtitle,
                egui::FontId::proportional(40.0),
                egui::Color32::WHITE.gamma_multiply(subtitle_alpha),
            );
        }

        let sections_alpha = fade(progress, &SECTIONS_FADE);
        if sections_alpha > 0.0 && !thought.sections.is_empty() {
            let column_width = (rect.width() * 0.55).min(520.0);
            let left = rect.center().x - column_width / 2.0;
            let mut y = rect.top() + rect.height() * 0.16;
            for section in &thought.sections {
                painter.text(
                    egui::pos2(left, y),
                    egui::Align2::LEFT_TOP,
                    &section.title,
                    egui::FontId::proportional(24.0),
                    theme.gamma_multiply(sections_alpha),
                );
                y += 34.0;
                let galley = painter.layout(
                    section.body.clone(),
                    egui::FontId::proportional(15.0),
                    egui::Color32::LIGHT_GRAY.gamma_multiply(sections_alpha),
                    column_width,
                );
                let height = galley.size().y;
                painter.galley(egui::pos2(left, y), galley, egui::Color32::LIGHT_GRAY);
                y += height + 28.0;
            }
        }

        let stats_alpha = fade(progress, &STATS_FADE);
        if stats_alpha > 0.0 && !thought.stats.is_empty() {
            let baseline = rect.bottom() - rect.height() * 0.22;
            let step = rect.width() / (thought.stats.len() + 1) as f32;
            for (i, stat) in thought.stats.iter().enumerate() {
                let x = step * (i + 1) as f32;
                painter.text(
                    egui::pos2(x, baseline),
                    egui::Align2::CENTER_BOTTOM,
                    &stat.val,
                    egui::FontId::proportional(32.0),
                    theme.gamma_multiply(stats_alpha),
                );
                painter.text(
                    egui::pos2(x, baseline + 6.0),
                    egui::Align2::CENTER_TOP,
                    &stat.label,
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY.gamma_multiply(stats_alpha),
                );
            }
        }
    }

    fn render_loading_indicator(&self, ui: &mut egui::Ui, rect: egui::Rect) {
        let progress = self.player.load_progress();
        let painter = ui.painter();
        let center = rect.center();

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            format!("Initializing Neural Pathways... {:.0}%", progress),
            egui::FontId::monospace(16.0),
            egui::Color32::LIGHT_GRAY,
        );

        // Thin progress bar under the text
        let bar_width = 240.0;
        let bar = egui::Rect::from_min_size(
            center + egui::vec2(-bar_width / 2.0, 24.0),
            egui::vec2(bar_width, 2.0),
        );
        painter.rect_filled(bar, egui::CornerRadius::ZERO, egui::Color32::DARK_GRAY);
        let filled = egui::Rect::from_min_size(
            bar.min,
            egui::vec2(bar_width * (progress / 100.0).clamp(0.0, 1.0), 2.0),
        );
        painter.rect_filled(filled, egui::CornerRadius::ZERO, self.theme_color());
    }

    /// Clickable thought titles along the top edge.
    fn render_switcher(&mut self, ctx: &egui::Context) {
        if self.archive.len() < 2 {
            return;
        }

        let mut clicked = None;
        egui::Area::new(egui::Id::new("thought-switcher"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (idx, thought) in self.archive.iter().enumerate() {
                        let active = idx == self.active_idx;
                        let label = egui::RichText::new(&thought.id).monospace().color(
                            if active {
                                super::parse_hex_color(&thought.theme_color)
                                    .unwrap_or(egui::Color32::WHITE)
                            } else {
                                egui::Color32::GRAY
                            },
                        );
                        if ui.selectable_label(active, label).clicked() && !active {
                            clicked = Some(idx);
                        }
                    }
                });
            });

        if let Some(idx) = clicked {
            self.switch_thought(idx);
        }
    }

    /// The capture call-to-action fades in near the end of the scroll and
    /// accepts clicks once past the activation threshold.
    fn render_capture_cta(&mut self, ctx: &egui::Context) {
        if self.player.state() != PlayerState::Ready {
            return;
        }
        let progress = self.player.progress();
        let alpha = fade(progress, &CAPTURE_FADE);
        if alpha <= 0.0 {
            return;
        }

        egui::Area::new(egui::Id::new("capture-cta"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
            .show(ctx, |ui| {
                ui.set_opacity(alpha);
                let enabled = progress >= CAPTURE_ACTIVE_AT && !self.note_modal_open;
                let button = egui::Button::new(
                    egui::RichText::new("Capture This Thought").size(18.0),
                );
                if ui.add_enabled(enabled, button).clicked() {
                    self.note_modal_open = true;
                }
            });
    }

    fn render_note_modal(&mut self, ctx: &egui::Context) {
        if !self.note_modal_open {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.note_draft.clear();
            self.note_modal_open = false;
            return;
        }

        egui::Window::new("Capture This Thought")
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Preserve this moment in the archive.");
                ui.add(
                    egui::TextEdit::multiline(&mut self.note_draft)
                        .hint_text("What are you thinking?")
                        .desired_rows(4)
                        .desired_width(320.0),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let can_preserve = !self.note_draft.trim().is_empty();
                    if ui
                        .add_enabled(can_preserve, egui::Button::new("Preserve"))
                        .clicked()
                    {
                        self.preserve_note();
                    }
                    if ui.button("Discard").clicked() {
                        self.note_draft.clear();
                        self.note_modal_open = false;
                    }
                });
            });
    }
}
