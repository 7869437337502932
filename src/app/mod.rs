//! Application module - BloomApp and the presentation shell.
//!
//! The shell owns the scroll offset, the overlay chrome, and the note modal;
//! everything frame-related lives in the core player it drives. Submodules:
//! - `overlay` - pure fade math for the text bands
//! - `run` - the eframe::App implementation

pub mod overlay;
mod run;

use eframe::egui;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::core::player::ScrollPlayer;
use crate::core::preloader::Preloader;
use crate::core::renderer::FrameRenderer;
use crate::core::resize::ResizeCoordinator;
use crate::core::scroll::ScrollSpan;
use crate::entities::frameset::FrameSet;
use crate::entities::notes::NoteJournal;
use crate::entities::thought::ThoughtCategory;

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Scroll span height as a multiple of the viewport height
    pub span_multiplier: f32,
    /// Id of the thought category shown last session
    pub active_thought: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            span_multiplier: 3.0,
            active_thought: "philosophy".to_string(),
        }
    }
}

/// Main application state.
pub struct BloomApp {
    pub settings: AppSettings,
    pub path_config: config::PathConfig,
    /// The archive entries the viewer can page through
    pub archive: Vec<ThoughtCategory>,
    pub active_idx: usize,
    pub preloader: Preloader,
    pub player: ScrollPlayer,
    pub renderer: FrameRenderer,
    pub resize: ResizeCoordinator,
    /// Set once the first surface commit arrives
    pub span: Option<ScrollSpan>,
    /// Scroll offset in logical points from the span's start
    pub scroll_offset: f32,
    pub journal: NoteJournal,
    pub note_modal_open: bool,
    pub note_draft: String,
}

impl BloomApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        archive: Vec<ThoughtCategory>,
        preloader: Preloader,
        journal: NoteJournal,
        path_config: config::PathConfig,
        span_multiplier: f32,
        fullscreen: bool,
    ) -> Self {
        // Restore settings from previous session; CLI span wins
        let mut settings: AppSettings = cc
            .storage
            .and_then(|storage| storage.get_string(eframe::APP_KEY))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        settings.span_multiplier = span_multiplier;

        let active_idx = archive
            .iter()
            .position(|thought| thought.id == settings.active_thought)
            .unwrap_or(0);
        let frame_set = archive
            .get(active_idx)
            .map(|thought| thought.frames.clone())
            .unwrap_or_else(|| FrameSet::new("", 0, "webp"));

        let player = ScrollPlayer::new(&preloader, frame_set);

        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        if fullscreen {
            cc.egui_ctx
                .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        }

        info!(
            "Archive opened: {} thoughts, starting at '{}'",
            archive.len(),
            archive
                .get(active_idx)
                .map(|t| t.id.as_str())
                .unwrap_or("<none>")
        );

        Self {
            settings,
            path_config,
            archive,
            active_idx,
            preloader,
            player,
            renderer: FrameRenderer::new(),
            resize: ResizeCoordinator::default(),
            span: None,
            scroll_offset: 0.0,
            journal,
            note_modal_open: false,
            note_draft: String::new(),
        }
    }

    /// The thought category currently on screen.
    pub fn active_thought(&self) -> Option<&ThoughtCategory> {
        self.archive.get(self.active_idx)
    }

    /// Switch to another archive entry. The old player's batch is abandoned and
    /// a fresh player instance starts preloading; the old one is never reset in
    /// place.
    pub fn switch_thought(&mut self, idx: usize) {
        if idx == self.active_idx || idx >= self.archive.len() {
            return;
        }

        self.player.abandon(&self.preloader);

        let thought = &self.archive[idx];
        info!("Switching thought: '{}'", thought.id);
        self.settings.active_thought = thought.id.clone();
        self.active_idx = idx;
        self.player = ScrollPlayer::new(&self.preloader, thought.frames.clone());
        self.renderer = FrameRenderer::new();
        self.scroll_offset = 0.0;
        self.player.set_progress(0.0);
    }

    /// Accent color of the active thought.
    pub fn theme_color(&self) -> egui::Color32 {
        self.active_thought()
            .and_then(|thought| parse_hex_color(&thought.theme_color))
            .unwrap_or(egui::Color32::WHITE)
    }

    /// Append the drafted note to the journal and close the modal. A journal
    /// write failure is logged, never surfaced as a crash.
    pub fn preserve_note(&mut self) {
        match self.journal.append(&self.note_draft) {
            Ok(note) => info!("Thought preserved at {}", note.timestamp),
            Err(err) => warn!("Failed to preserve thought: {err:#}"),
        }
        self.note_draft.clear();
        self.note_modal_open = false;
    }
}

/// Parse a "#RRGGBB" accent string.
pub fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(egui::Color32::from_rgb(r, g, b))
}
