//! Drawing surface geometry and the cover-fit mapping.
//!
//! The surface is sized in device pixels (logical size times pixel ratio) and is
//! resized only by the resize coordinator, never mid-draw. Cover-fit scales a
//! frame so the surface is always fully covered with no letterboxing, cropping
//! the frame's relatively longer dimension and centering the crop.

/// The drawing target, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    /// Device pixels per logical point
    pub pixel_ratio: f32,
}

impl Surface {
    /// Build a surface from a logical viewport size and pixel ratio.
    pub fn from_viewport(width_pts: f32, height_pts: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Self {
            width: (width_pts * pixel_ratio).round().max(0.0) as u32,
            height: (height_pts * pixel_ratio).round().max(0.0) as u32,
            pixel_ratio,
        }
    }

    /// A zero-area surface cannot be drawn to.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Result of the cover-fit computation, in device pixels.
///
/// `scaled_w x scaled_h` is the frame scaled to cover the surface; `crop_x` /
/// `crop_y` are the amounts cropped off each side (`(scaled - surface) / 2` on
/// the cropped axis, 0 on the other).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub scaled_w: f32,
    pub scaled_h: f32,
    pub crop_x: f32,
    pub crop_y: f32,
}

impl CoverFit {
    /// Top-left of the draw rectangle relative to the surface origin (non-positive).
    pub fn draw_origin(&self) -> (f32, f32) {
        (-self.crop_x, -self.crop_y)
    }

    /// Normalized source crop `[u0, v0, u1, v1]` selecting the visible part of
    /// the frame, for renderers that crop in texture space instead of drawing
    /// oversized.
    pub fn uv_rect(&self) -> [f32; 4] {
        let u = if self.scaled_w > 0.0 {
            self.crop_x / self.scaled_w
        } else {
            0.0
        };
        let v = if self.scaled_h > 0.0 {
            self.crop_y / self.scaled_h
        } else {
            0.0
        };
        [u, v, 1.0 - u, 1.0 - v]
    }
}

/// Compute the cover-fit of a `frame_w x frame_h` image onto a surface.
///
/// If the image is relatively wider than the surface, it is scaled to the
/// surface height and cropped horizontally; if relatively taller, scaled to the
/// surface width and cropped vertically. Pure geometry, no pixel work.
pub fn cover_fit(surface: &Surface, frame_w: u32, frame_h: u32) -> Option<CoverFit> {
    if !surface.is_drawable() || frame_w == 0 || frame_h == 0 {
        return None;
    }

    let sw = surface.width as f32;
    let sh = surface.height as f32;
    let surface_ratio = sw / sh;
    let frame_ratio = frame_w as f32 / frame_h as f32;

    let fit = if frame_ratio > surface_ratio {
        // Relatively wider: match height, crop left/right
        let scaled_h = sh;
        let scaled_w = frame_w as f32 * (sh / frame_h as f32);
        CoverFit {
            scaled_w,
            scaled_h,
            crop_x: (scaled_w - sw) / 2.0,
            crop_y: 0.0,
        }
    } else {
        // Relatively taller (or equal): match width, crop top/bottom
        let scaled_w = sw;
        let scaled_h = frame_h as f32 * (sw / frame_w as f32);
        CoverFit {
            scaled_w,
            scaled_h,
            crop_x: 0.0,
            crop_y: (scaled_h - sh) / 2.0,
        }
    };

    Some(fit)
}
