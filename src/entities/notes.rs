//! Captured-note journal - the "preserve a thought" feature.
//!
//! An explicit append-only log keyed by capture timestamp, persisted as a JSON
//! array under the data directory. The journal is constructed once and injected
//! into the app; nothing reaches for it as ambient global state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

/// One captured note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedNote {
    /// Capture time in epoch milliseconds, also the entry key
    pub id: i64,
    pub text: String,
    /// ISO-8601 capture timestamp
    pub timestamp: String,
}

/// Append-only journal backed by a JSON file.
#[derive(Debug)]
pub struct NoteJournal {
    path: PathBuf,
    notes: Vec<SavedNote>,
}

impl NoteJournal {
    /// Open a journal, loading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let notes = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read journal: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse journal: {}", path.display()))?
        } else {
            Vec::new()
        };

        info!("Journal opened: {} ({} notes)", path.display(), notes.len());
        Ok(Self { path, notes })
    }

    /// Append a note keyed by the current capture time and persist.
    ///
    /// Whitespace-only text is rejected; nothing is written in that case.
    pub fn append(&mut self, text: &str) -> Result<&SavedNote> {
        let text = text.trim();
        anyhow::ensure!(!text.is_empty(), "Refusing to save an empty note");

        let now = Utc::now();
        let note = SavedNote {
            id: now.timestamp_millis(),
            text: text.to_string(),
            timestamp: now.to_rfc3339(),
        };

        self.notes.push(note);
        self.persist()?;

        info!("Note preserved ({} total)", self.notes.len());
        Ok(self.notes.last().expect("just pushed"))
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create journal dir: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&self.notes)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write journal: {}", self.path.display()))?;
        Ok(())
    }

    pub fn notes(&self) -> &[SavedNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
