//! Resize coordination - debounced surface reallocation.
//!
//! Continuous drag-resizes fire geometry changes every frame; reallocating the
//! surface for each one is wasted work. Changes are coalesced within a short
//! window and committed once the geometry settles. Committing yields the new
//! surface so the caller can force a redraw of the currently selected frame -
//! resizing without redrawing leaves stale, wrongly scaled pixels.

use std::time::{Duration, Instant};

use log::trace;

use crate::core::surface::Surface;

/// Debounce window for resize bursts
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct ResizeCoordinator {
    delay: Duration,
    current: Option<Surface>,
    /// Pending commit: (target surface, trigger time)
    pending: Option<(Surface, Instant)>,
}

impl Default for ResizeCoordinator {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeCoordinator {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            current: None,
            pending: None,
        }
    }

    /// Report the latest viewport geometry. Called every frame; scheduling only
    /// reacts to actual changes, so a stable viewport costs nothing.
    pub fn observe(&mut self, viewport: Surface) {
        if self.current == Some(viewport) {
            // Back to the committed geometry; drop any pending change
            if self.pending.take().is_some() {
                trace!("Resize settled back to current surface, pending dropped");
            }
            return;
        }

        match &self.pending {
            Some((target, _)) if *target == viewport => {
                // Same target still settling; let the timer run
            }
            _ => {
                // First observation commits immediately; later ones debounce
                let trigger_at = if self.current.is_none() {
                    Instant::now()
                } else {
                    Instant::now() + self.delay
                };
                trace!(
                    "Resize scheduled: {}x{} @ {}",
                    viewport.width, viewport.height, viewport.pixel_ratio
                );
                self.pending = Some((viewport, trigger_at));
            }
        }
    }

    /// Commit a settled resize. Returns the new surface once per change; the
    /// caller must force a redraw of the current frame with it.
    pub fn tick(&mut self) -> Option<Surface> {
        let (surface, trigger_at) = self.pending?;
        if Instant::now() < trigger_at {
            return None;
        }

        self.pending = None;
        self.current = Some(surface);
        trace!(
            "Resize committed: {}x{} @ {}",
            surface.width, surface.height, surface.pixel_ratio
        );
        Some(surface)
    }

    /// The committed surface, if any resize has settled yet.
    pub fn surface(&self) -> Option<&Surface> {
        self.current.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(w: u32, h: u32) -> Surface {
        Surface {
            width: w,
            height: h,
            pixel_ratio: 1.0,
        }
    }

    #[test]
    fn test_first_observation_commits_immediately() {
        let mut coord = ResizeCoordinator::new(100);
        coord.observe(viewport(800, 600));
        assert_eq!(coord.tick(), Some(viewport(800, 600)));
        assert_eq!(coord.surface(), Some(&viewport(800, 600)));
    }

    #[test]
    fn test_change_waits_for_debounce_window() {
        let mut coord = ResizeCoordinator::new(50);
        coord.observe(viewport(800, 600));
        coord.tick();

        coord.observe(viewport(1024, 768));
        assert!(coord.tick().is_none());
        assert!(coord.is_pending());

        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(coord.tick(), Some(viewport(1024, 768)));
        assert!(!coord.is_pending());
    }

    #[test]
    fn test_burst_coalesces_to_last_value() {
        let mut coord = ResizeCoordinator::new(30);
        coord.observe(viewport(800, 600));
        coord.tick();

        // Drag-resize burst
        coord.observe(viewport(810, 600));
        coord.observe(viewport(850, 620));
        coord.observe(viewport(900, 700));
        assert!(coord.tick().is_none());

        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(coord.tick(), Some(viewport(900, 700)));
        // Exactly one commit for the whole burst
        assert!(coord.tick().is_none());
    }

    #[test]
    fn test_settling_back_cancels_pending() {
        let mut coord = ResizeCoordinator::new(30);
        coord.observe(viewport(800, 600));
        coord.tick();

        coord.observe(viewport(900, 700));
        coord.observe(viewport(800, 600)); // back where we started
        assert!(!coord.is_pending());

        std::thread::sleep(Duration::from_millis(40));
        assert!(coord.tick().is_none());
    }

    #[test]
    fn test_stable_geometry_is_free() {
        let mut coord = ResizeCoordinator::new(30);
        coord.observe(viewport(800, 600));
        coord.tick();

        for _ in 0..10 {
            coord.observe(viewport(800, 600));
        }
        assert!(!coord.is_pending());
        assert!(coord.tick().is_none());
    }
}
