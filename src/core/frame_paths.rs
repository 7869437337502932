//! Frame path generation - the on-disk numbering contract.
//!
//! For a set with base folder `P` and count `N`, the player fetches exactly
//! `P/ezgif-frame-{i:03}.{ext}` for `i = 1..=N`. Generation is a pure function
//! of its inputs; a gap in the numbering on disk degrades to an absent frame at
//! load time, never a generation-time error.

use std::path::{Path, PathBuf};

/// Fixed filename stem shared by every frame
pub const FRAME_STEM: &str = "ezgif-frame-";

/// Zero-padding width of the frame number ("001".."999")
pub const FRAME_PAD: usize = 3;

/// Generate the ordered fetch paths for a frame set.
///
/// Index `i` (0-based) maps to on-disk frame number `i + 1`. `frame_count == 0`
/// yields an empty sequence; enforcing `frame_count >= 1` is the configuring
/// caller's job.
pub fn generate(base_path: &Path, frame_count: usize, ext: &str) -> Vec<PathBuf> {
    (1..=frame_count)
        .map(|n| base_path.join(format!("{}{:0pad$}.{}", FRAME_STEM, n, ext, pad = FRAME_PAD)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count_and_order() {
        let paths = generate(Path::new("/images/blooms/gold"), 90, "webp");
        assert_eq!(paths.len(), 90);
        assert_eq!(
            paths[0],
            PathBuf::from("/images/blooms/gold/ezgif-frame-001.webp")
        );
        assert_eq!(
            paths[89],
            PathBuf::from("/images/blooms/gold/ezgif-frame-090.webp")
        );
    }

    #[test]
    fn test_suffixes_strictly_increase_no_duplicates() {
        let paths = generate(Path::new("seq"), 120, "webp");
        for pair in paths.windows(2) {
            assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_padding_saturates_at_three_digits() {
        let paths = generate(Path::new("seq"), 999, "webp");
        assert!(paths[8].to_string_lossy().ends_with("ezgif-frame-009.webp"));
        assert!(paths[98].to_string_lossy().ends_with("ezgif-frame-099.webp"));
        assert!(paths[998].to_string_lossy().ends_with("ezgif-frame-999.webp"));
    }

    #[test]
    fn test_zero_count_yields_empty() {
        assert!(generate(Path::new("seq"), 0, "webp").is_empty());
    }

    #[test]
    fn test_extension_agnostic() {
        let jpg = generate(Path::new("seq"), 1, "jpg");
        assert!(jpg[0].to_string_lossy().ends_with("ezgif-frame-001.jpg"));
    }

    #[test]
    fn test_deterministic() {
        let a = generate(Path::new("seq"), 30, "webp");
        let b = generate(Path::new("seq"), 30, "webp");
        assert_eq!(a, b);
    }
}
