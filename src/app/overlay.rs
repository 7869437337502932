//! Overlay fade curves keyed to scroll progress.
//!
//! The overlay layer consumes the same progress scalar as the frame selector;
//! nothing else couples it to the player. Each band is a piecewise-linear
//! opacity curve over progress stops, clamped flat outside its stop range.

/// Progress/opacity stops for the title band (fades in early, out by 0.4)
pub const TITLE_FADE: [(f32, f32); 3] = [(0.0, 0.0), (0.2, 1.0), (0.4, 0.0)];

/// Subtitle band, centered mid-scroll
pub const SUBTITLE_FADE: [(f32, f32); 3] = [(0.3, 0.0), (0.5, 1.0), (0.7, 0.0)];

/// Stats band, late in the scroll
pub const STATS_FADE: [(f32, f32); 3] = [(0.7, 0.0), (0.8, 1.0), (1.0, 0.0)];

/// Capture-a-thought call to action, only at the very end
pub const CAPTURE_FADE: [(f32, f32); 3] = [(0.85, 0.0), (0.95, 0.5), (1.0, 1.0)];

/// Longer content sections, revealed once the frame scrub has finished
pub const SECTIONS_FADE: [(f32, f32); 2] = [(0.9, 0.0), (1.0, 1.0)];

/// Progress above which the capture CTA accepts interaction
pub const CAPTURE_ACTIVE_AT: f32 = 0.9;

/// Piecewise-linear interpolation over `(progress, value)` stops.
///
/// Stops must be sorted by progress. Input outside the stop range clamps to
/// the first/last value.
pub fn fade(progress: f32, stops: &[(f32, f32)]) -> f32 {
    let Some(&(first_p, first_v)) = stops.first() else {
        return 0.0;
    };
    let &(last_p, last_v) = stops.last().expect("non-empty");

    if progress <= first_p {
        return first_v;
    }
    if progress >= last_p {
        return last_v;
    }

    for pair in stops.windows(2) {
        let (p0, v0) = pair[0];
        let (p1, v1) = pair[1];
        if progress <= p1 {
            if p1 <= p0 {
                return v1;
            }
            let t = (progress - p0) / (p1 - p0);
            return v0 + (v1 - v0) * t;
        }
    }

    last_v
}

/// Vertical drift of the title block: +50 points at progress 0, -50 at 1.
pub fn title_shift(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    50.0 - 100.0 * p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_title_band_shape() {
        assert!(close(fade(0.0, &TITLE_FADE), 0.0));
        assert!(close(fade(0.1, &TITLE_FADE), 0.5));
        assert!(close(fade(0.2, &TITLE_FADE), 1.0));
        assert!(close(fade(0.3, &TITLE_FADE), 0.5));
        assert!(close(fade(0.4, &TITLE_FADE), 0.0));
        // Flat outside the band
        assert!(close(fade(0.9, &TITLE_FADE), 0.0));
    }

    #[test]
    fn test_bands_do_not_fully_overlap() {
        // At mid-scroll only the subtitle is fully visible
        assert!(close(fade(0.5, &SUBTITLE_FADE), 1.0));
        assert!(close(fade(0.5, &TITLE_FADE), 0.0));
        assert!(close(fade(0.5, &STATS_FADE), 0.0));
    }

    #[test]
    fn test_sections_band_reveals_after_scrub() {
        // Hidden through the whole frame scrub, fully visible at the end
        assert!(close(fade(0.0, &SECTIONS_FADE), 0.0));
        assert!(close(fade(0.5, &SECTIONS_FADE), 0.0));
        assert!(close(fade(0.9, &SECTIONS_FADE), 0.0));
        assert!(close(fade(0.95, &SECTIONS_FADE), 0.5));
        assert!(close(fade(1.0, &SECTIONS_FADE), 1.0));
    }

    #[test]
    fn test_capture_band_only_at_end() {
        assert!(close(fade(0.0, &CAPTURE_FADE), 0.0));
        assert!(close(fade(0.85, &CAPTURE_FADE), 0.0));
        assert!(close(fade(0.95, &CAPTURE_FADE), 0.5));
        assert!(close(fade(1.0, &CAPTURE_FADE), 1.0));
    }

    #[test]
    fn test_clamps_outside_range() {
        assert!(close(fade(-1.0, &TITLE_FADE), 0.0));
        assert!(close(fade(2.0, &CAPTURE_FADE), 1.0));
    }

    #[test]
    fn test_title_shift_endpoints() {
        assert!(close(title_shift(0.0), 50.0));
        assert!(close(title_shift(0.5), 0.0));
        assert!(close(title_shift(1.0), -50.0));
        assert!(close(title_shift(5.0), -50.0));
    }

    #[test]
    fn test_empty_stops() {
        assert_eq!(fade(0.5, &[]), 0.0);
    }
}
