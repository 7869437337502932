//! Frame selection - map scroll progress onto a frame index.
//!
//! Pure and positional: `select(p, n) = clamp(floor(lerp(1, n, p)), 1, n)`.
//! The mapping is monotonically non-decreasing with plateaus (several progress
//! values share one integer frame), so strictly increasing progress never moves
//! the animation backwards. Note that an unchanged index is not the same as "no
//! redraw": the player forces repaints after preload completion and after
//! resizes, where rendering output changes without the index moving.

/// Select a 1-based frame index for a progress value in [0, 1].
///
/// `select(0.0, n) == 1` and `select(1.0, n) == n`. Out-of-range progress is
/// clamped. `frame_count == 0` returns 0 (inert configuration, nothing to
/// select).
pub fn select(progress: f32, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }

    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };

    // lerp(1, frame_count, p)
    let lerped = 1.0 + (frame_count - 1) as f32 * p;
    (lerped.floor() as usize).clamp(1, frame_count)
}

/// Convert a 1-based frame index to its 0-based slot offset.
pub fn slot_index(frame_index: usize) -> usize {
    frame_index.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for n in [1usize, 2, 3, 30, 90, 999] {
            assert_eq!(select(0.0, n), 1, "n={}", n);
            assert_eq!(select(1.0, n), n, "n={}", n);
        }
    }

    #[test]
    fn test_always_in_range() {
        for n in [1usize, 2, 7, 90] {
            for step in 0..=1000 {
                let p = step as f32 / 1000.0;
                let idx = select(p, n);
                assert!((1..=n).contains(&idx), "select({}, {}) = {}", p, n, idx);
            }
        }
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let n = 90;
        let mut last = 0;
        for step in 0..=10_000 {
            let p = step as f32 / 10_000.0;
            let idx = select(p, n);
            assert!(idx >= last, "regressed at p={}: {} < {}", p, idx, last);
            last = idx;
        }
        assert_eq!(last, n);
    }

    #[test]
    fn test_plateaus_exist() {
        // With 2 frames, everything below 0.5 floors to frame 1
        assert_eq!(select(0.0, 2), 1);
        assert_eq!(select(0.49, 2), 1);
        assert_eq!(select(0.999, 2), 1);
        assert_eq!(select(1.0, 2), 2);
    }

    #[test]
    fn test_single_frame() {
        assert_eq!(select(0.0, 1), 1);
        assert_eq!(select(0.5, 1), 1);
        assert_eq!(select(1.0, 1), 1);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(select(-0.5, 10), 1);
        assert_eq!(select(1.5, 10), 10);
        assert_eq!(select(f32::NAN, 10), 1);
    }

    #[test]
    fn test_zero_frames_inert() {
        assert_eq!(select(0.5, 0), 0);
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index(1), 0);
        assert_eq!(slot_index(90), 89);
        assert_eq!(slot_index(0), 0);
    }
}
