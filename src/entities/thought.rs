//! Thought categories - the archive entries the viewer scrolls through.
//!
//! Each category pairs a FrameSet with the copy the overlay layer fades in and
//! out: title, subtitle, description, stats, and longer content sections. The
//! built-in archive mirrors the original three-category demo set; a custom
//! archive can be loaded from JSON instead.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::frameset::FrameSet;

/// One labelled statistic shown in the stats overlay band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtStat {
    pub label: String,
    pub val: String,
}

/// A titled block of longer copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub title: String,
    pub body: String,
}

/// One scrubbable archive entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtCategory {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub frames: FrameSet,
    /// Theme accent as "#RRGGBB"
    pub theme_color: String,
    pub stats: Vec<ThoughtStat>,
    pub sections: Vec<ContentSection>,
}

fn stat(label: &str, val: &str) -> ThoughtStat {
    ThoughtStat {
        label: label.to_string(),
        val: val.to_string(),
    }
}

fn section(title: &str, body: &str) -> ContentSection {
    ContentSection {
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// The built-in archive. All three categories reuse the same frame folder, the
/// way the demo content shipped with only the gold bloom rendered.
pub fn builtin_archive(frames: &FrameSet) -> Vec<ThoughtCategory> {
    vec![
        ThoughtCategory {
            id: "philosophy".to_string(),
            title: "Deep Logic.".to_string(),
            subtitle: "The architecture of 'Why'.".to_string(),
            description: "Exploring the foundational structures of human reasoning.".to_string(),
            frames: frames.clone(),
            theme_color: "#FFD700".to_string(),
            stats: vec![
                stat("Depth", "9/10"),
                stat("Frequency", "Daily"),
                stat("Type", "Abstract"),
            ],
            sections: vec![
                section(
                    "The Neural Spark",
                    "Every great idea starts with a single synaptic firing. It is the moment \
                     where chaos organizes into structure, where noise becomes signal. In this \
                     archive, we trace the lineage of these sparks.",
                ),
                section(
                    "The Luminous Void",
                    "Thoughts exist in the vacuum between biology and data. They are weightless \
                     yet carry the heaviest of consequences. Here, we explore the abstract \
                     geometry of the mind.",
                ),
            ],
        },
        ThoughtCategory {
            id: "creative".to_string(),
            title: "Neon Dreams.".to_string(),
            subtitle: "Fabricating reality.".to_string(),
            description: "Where imagination bleeds into the tangible world.".to_string(),
            frames: frames.clone(),
            theme_color: "#00FFFF".to_string(),
            stats: vec![
                stat("Vibrancy", "Max"),
                stat("Source", "REM"),
                stat("Medium", "Visual"),
            ],
            sections: vec![
                section(
                    "Synthetic Horizons",
                    "We build worlds that never were, to understand the one that is. Creativity \
                     is not just decoration; it is the source code of the future.",
                ),
                section(
                    "Color Theory of the Soul",
                    "Emotions are the palette. Experience is the canvas. We paint with light and \
                     shadow, crafting experiences that resonate on a cellular level.",
                ),
            ],
        },
        ThoughtCategory {
            id: "technical".to_string(),
            title: "Silicon Core.".to_string(),
            subtitle: "The language of machines.".to_string(),
            description: "Deconstructing the algorithms that govern our digital existence."
                .to_string(),
            frames: frames.clone(),
            theme_color: "#9370DB".to_string(),
            stats: vec![
                stat("Complexity", "O(n)"),
                stat("Uptime", "99.9%"),
                stat("Stack", "Full"),
            ],
            sections: vec![
                section(
                    "Binary Poetry",
                    "Code is the modern incantation. With the right words, we summon demons and \
                     angels alike. We structure logic to bend reality to our will.",
                ),
                section(
                    "The Ghost in the Machine",
                    "As systems grow complex, they exhibit emergent behaviors. Are we programming \
                     them, or are they evolving? The line blurs with every commit.",
                ),
            ],
        },
    ]
}

/// Load an archive from a JSON file (array of categories).
pub fn load_archive(path: &Path) -> Result<Vec<ThoughtCategory>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;
    let archive: Vec<ThoughtCategory> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse archive: {}", path.display()))?;
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_archive_shape() {
        let frames = FrameSet::new("/frames/gold", 90, "webp");
        let archive = builtin_archive(&frames);
        assert_eq!(archive.len(), 3);
        for thought in &archive {
            assert!(thought.frames.is_playable());
            assert_eq!(thought.stats.len(), 3);
            assert_eq!(thought.sections.len(), 2);
        }
        assert_eq!(archive[0].id, "philosophy");
        assert_eq!(archive[2].theme_color, "#9370DB");
    }

    #[test]
    fn test_archive_roundtrip_through_json() {
        let frames = FrameSet::new("/frames/gold", 9, "webp");
        let archive = builtin_archive(&frames);
        let json = serde_json::to_string(&archive).unwrap();
        let parsed: Vec<ThoughtCategory> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, archive);
    }
}
