//! Frame rendering onto the egui surface.
//!
//! The renderer uploads pixel data only when the player hands it a redraw
//! request (index change, first paint, or post-resize repaint); painting the
//! already-uploaded texture each UI frame is free. Every paint clears the
//! surface and draws the single selected frame cover-fit - no cross-fade, no
//! accumulation of previous frames.

use eframe::egui;
use log::trace;

use crate::core::surface::{Surface, cover_fit};
use crate::entities::frame::Frame;

pub struct FrameRenderer {
    texture: Option<egui::TextureHandle>,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self { texture: None }
    }

    /// Upload the selected frame. `None` (pending or absent slot) renders
    /// nothing: prior pixels stay, per the degrade-to-missing-visual policy.
    pub fn render(&mut self, ctx: &egui::Context, index: usize, frame: Option<&Frame>) {
        let Some(frame) = frame else {
            trace!("Redraw {} skipped: slot has no frame", index);
            return;
        };

        // Re-upload even when the index matches: a forced redraw after resize
        // must not be short-circuited here (texture filtering is resolution
        // independent, but the contract is a full clear + redraw).
        let (w, h) = frame.resolution();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [w as usize, h as usize],
            frame.pixels(),
        );

        match &mut self.texture {
            Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("bloom-frame", image, egui::TextureOptions::LINEAR));
            }
        }
        trace!("Frame {} uploaded ({}x{})", index, w, h);
    }

    /// Clear the given screen rect and paint the current frame cover-fit.
    /// With no frame uploaded yet (or an unusable surface) this leaves a blank
    /// surface - an inert visual state, never an error.
    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect, pixel_ratio: f32) {
        // Full clear before the new frame
        painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::BLACK);

        let Some(texture) = &self.texture else {
            return;
        };

        let surface = Surface::from_viewport(rect.width(), rect.height(), pixel_ratio);
        let size = texture.size();
        let Some(fit) = cover_fit(&surface, size[0] as u32, size[1] as u32) else {
            return;
        };

        // Crop in texture space: the draw rect is the whole surface, the uv
        // rect selects the centered cover crop of the source.
        let [u0, v0, u1, v1] = fit.uv_rect();
        let uv = egui::Rect::from_min_max(egui::pos2(u0, v0), egui::pos2(u1, v1));
        painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
    }
}
