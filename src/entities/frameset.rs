//! FrameSet - one playable animation described at configuration time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::frame_paths::generate;

/// Default frame extension. The source material evolved from JPEG to WebP;
/// the numbering contract is extension-agnostic as long as all frames agree.
pub const DEFAULT_EXT: &str = "webp";

/// Descriptor for an ordered, fixed-size set of still frames on disk.
///
/// `frame_count >= 1` is a configuration-layer invariant: a zero-count set is
/// accepted without panicking, but the player treats it as inert (see
/// `ScrollPlayer::new`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSet {
    /// Folder containing the numbered frames
    pub base_path: PathBuf,
    /// Number of frames, fixed at configuration time
    pub frame_count: usize,
    /// Image format extension shared by all frames
    #[serde(default = "default_ext")]
    pub ext: String,
}

fn default_ext() -> String {
    DEFAULT_EXT.to_string()
}

impl FrameSet {
    pub fn new(base_path: impl Into<PathBuf>, frame_count: usize, ext: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            frame_count,
            ext: ext.into(),
        }
    }

    /// Whether this set satisfies the `frame_count >= 1` invariant.
    pub fn is_playable(&self) -> bool {
        self.frame_count >= 1
    }

    /// Ordered fetch paths for all frames. Index 0 is the first displayed frame.
    pub fn frame_paths(&self) -> Vec<PathBuf> {
        generate(&self.base_path, self.frame_count, &self.ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playable() {
        assert!(FrameSet::new("/frames", 1, "webp").is_playable());
        assert!(!FrameSet::new("/frames", 0, "webp").is_playable());
    }

    #[test]
    fn test_frame_paths_delegation() {
        let set = FrameSet::new("/frames/gold", 2, "webp");
        let paths = set.frame_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], PathBuf::from("/frames/gold/ezgif-frame-001.webp"));
        assert_eq!(paths[1], PathBuf::from("/frames/gold/ezgif-frame-002.webp"));
    }

    #[test]
    fn test_serde_default_ext() {
        let set: FrameSet =
            serde_json::from_str(r#"{"base_path": "/frames", "frame_count": 9}"#).unwrap();
        assert_eq!(set.ext, DEFAULT_EXT);
    }
}
