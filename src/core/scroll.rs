//! Scroll progress tracking.
//!
//! The player owns a dedicated scroll span taller than the viewport; progress is
//! 0.0 when the span's top edge meets the viewport's top edge and 1.0 when the
//! span's bottom edge meets the viewport's bottom edge (start-start to end-end
//! tracking). Progress is a plain scalar recomputed from geometry on every
//! sample, never stored state with its own lifecycle.

/// Geometry of the scroll span the animation is keyed to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpan {
    /// Total span height in logical points
    pub span_height: f32,
    /// Viewport height in logical points
    pub viewport_height: f32,
}

impl ScrollSpan {
    pub fn new(viewport_height: f32, span_multiplier: f32) -> Self {
        Self {
            span_height: viewport_height * span_multiplier.max(1.0),
            viewport_height,
        }
    }

    /// Scrollable distance: offset at which the span's bottom edge reaches the
    /// viewport's bottom edge.
    pub fn scrollable(&self) -> f32 {
        (self.span_height - self.viewport_height).max(0.0)
    }

    /// Progress in [0, 1] for a scroll offset from the span's start.
    ///
    /// A degenerate span (no taller than the viewport) reports 0.0: there is no
    /// distance to traverse, so the first frame shows.
    pub fn progress(&self, offset: f32) -> f32 {
        let scrollable = self.scrollable();
        if scrollable <= 0.0 {
            return 0.0;
        }
        (offset / scrollable).clamp(0.0, 1.0)
    }

    /// Clamp a raw scroll offset to the span's valid range.
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.scrollable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_start_is_zero() {
        let span = ScrollSpan::new(1000.0, 3.0);
        assert_eq!(span.progress(0.0), 0.0);
    }

    #[test]
    fn test_end_end_is_one() {
        let span = ScrollSpan::new(1000.0, 3.0);
        // 3000pt span, 1000pt viewport: bottom edges meet after 2000pt of scroll
        assert_eq!(span.scrollable(), 2000.0);
        assert_eq!(span.progress(2000.0), 1.0);
    }

    #[test]
    fn test_linear_in_between() {
        let span = ScrollSpan::new(1000.0, 3.0);
        assert!((span.progress(1000.0) - 0.5).abs() < f32::EPSILON);
        assert!((span.progress(500.0) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamped_outside_span() {
        let span = ScrollSpan::new(1000.0, 3.0);
        assert_eq!(span.progress(-50.0), 0.0);
        assert_eq!(span.progress(99_999.0), 1.0);
        assert_eq!(span.clamp_offset(-50.0), 0.0);
        assert_eq!(span.clamp_offset(99_999.0), 2000.0);
    }

    #[test]
    fn test_degenerate_span() {
        let span = ScrollSpan {
            span_height: 500.0,
            viewport_height: 1000.0,
        };
        assert_eq!(span.scrollable(), 0.0);
        assert_eq!(span.progress(0.0), 0.0);
        assert_eq!(span.progress(100.0), 0.0);
    }

    #[test]
    fn test_multiplier_floor() {
        // Multipliers below 1.0 would make the span shorter than the viewport
        let span = ScrollSpan::new(1000.0, 0.5);
        assert_eq!(span.span_height, 1000.0);
    }
}
