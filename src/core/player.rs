//! The scroll-linked player state machine.
//!
//! One `ScrollPlayer` instance drives one FrameSet through
//! `Uninitialized -> Loading -> Ready`. `Loading -> Ready` is one-way;
//! switching to a different FrameSet means constructing a fresh player, never
//! resetting this one in place.
//!
//! The player converts progress samples into a selected frame index and hands
//! the renderer exactly one redraw request per actual change. Two events force
//! a redraw even when the index value did not move, because the rendered output
//! changes anyway: preload completion (first paint) and a surface resize
//! (repaint at the new dimensions).

use log::{debug, info};

use crate::core::preloader::{PreloadBatch, Preloader};
use crate::core::selector::{select, slot_index};
use crate::entities::frame::Frame;
use crate::entities::frameset::FrameSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No playable FrameSet configured; permanently inert
    Uninitialized,
    /// Frames are being fetched; nothing is rendered yet
    Loading,
    /// All load attempts settled; rendering follows the selected index
    Ready,
}

pub struct ScrollPlayer {
    frame_set: FrameSet,
    batch: PreloadBatch,
    state: PlayerState,
    progress: f32,
    /// 1-based selected frame index (0 while uninitialized)
    selected: usize,
    pending_redraw: Option<usize>,
}

impl ScrollPlayer {
    /// Create a player and immediately start preloading its frames.
    ///
    /// A zero-frame set produces a permanently `Uninitialized` player rather
    /// than an error: the configuring layer owns the `frame_count >= 1`
    /// invariant and the core only has to not crash.
    pub fn new(preloader: &Preloader, frame_set: FrameSet) -> Self {
        if !frame_set.is_playable() {
            debug!("FrameSet {:?} has no frames; player inert", frame_set.base_path);
            let batch = preloader.begin(Vec::new());
            return Self::with_batch(frame_set, batch, PlayerState::Uninitialized);
        }

        info!(
            "Player starting: {} frames from {}",
            frame_set.frame_count,
            frame_set.base_path.display()
        );
        let batch = preloader.begin(frame_set.frame_paths());
        Self::with_batch(frame_set, batch, PlayerState::Loading)
    }

    pub(crate) fn with_batch(frame_set: FrameSet, batch: PreloadBatch, state: PlayerState) -> Self {
        let selected = if state == PlayerState::Uninitialized {
            0
        } else {
            select(0.0, frame_set.frame_count)
        };
        Self {
            frame_set,
            batch,
            state,
            progress: 0.0,
            selected,
            pending_redraw: None,
        }
    }

    /// Drain preload completions and advance the state machine. Returns true
    /// if anything changed (the UI should repaint its loading indicator).
    pub fn poll(&mut self) -> bool {
        let mut changed = self.batch.poll();

        if self.state == PlayerState::Loading && self.batch.is_complete() {
            self.state = PlayerState::Ready;
            // First paint: forced even though the index has not moved
            self.pending_redraw = Some(self.selected);
            info!(
                "Player ready: {}/{} frames loaded",
                self.batch.loaded_count(),
                self.batch.len()
            );
            changed = true;
        }

        changed
    }

    /// Feed a progress sample in [0, 1]. Requests a redraw only when the
    /// selected frame index actually changes.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
        if self.state == PlayerState::Uninitialized {
            return;
        }

        let next = select(progress, self.frame_set.frame_count);
        if next != self.selected {
            self.selected = next;
            if self.state == PlayerState::Ready {
                self.pending_redraw = Some(next);
            }
        }
    }

    /// The surface was just resized: force a repaint of the currently selected
    /// frame even though the index is numerically unchanged.
    pub fn on_surface_resized(&mut self) {
        if self.state == PlayerState::Ready {
            self.pending_redraw = Some(self.selected);
        }
    }

    /// Take the pending redraw request, if any. At most one per change; the
    /// renderer calls this once per UI frame.
    pub fn take_redraw(&mut self) -> Option<usize> {
        self.pending_redraw.take()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Exposed to collaborators (loading indicator): has every load settled?
    pub fn is_loaded(&self) -> bool {
        self.state == PlayerState::Ready
    }

    /// Exposed to collaborators (loading indicator): live progress 0..100.
    pub fn load_progress(&self) -> f32 {
        self.batch.progress()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Currently selected 1-based frame index.
    pub fn selected_frame(&self) -> usize {
        self.selected
    }

    pub fn frame_count(&self) -> usize {
        self.frame_set.frame_count
    }

    pub fn frame_set(&self) -> &FrameSet {
        &self.frame_set
    }

    /// Decoded frame for a 1-based index, if preloading settled it successfully.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        if index == 0 {
            return None;
        }
        self.batch.frame(slot_index(index))
    }

    /// The currently selected frame, if available to draw.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frame(self.selected)
    }

    /// Abandon this player's preload batch (switching FrameSets). No state
    /// mutation from in-flight loads will be observed afterwards.
    pub fn abandon(&mut self, preloader: &Preloader) {
        preloader.abandon(&mut self.batch);
    }
}
