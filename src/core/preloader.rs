//! Concurrent best-effort frame preloading.
//!
//! One decode job per path, all outstanding at once up to the worker-pool cap.
//! Completions arrive in any order (decode-time dependent) but land in fixed,
//! pre-assigned slots by original index, so the final array is always in
//! declared frame order. A failed decode marks its slot Absent and the batch
//! still completes; only an abandoned batch stops mutating.
//!
//! Cancellation is double-guarded: abandoning bumps the shared epoch (queued
//! jobs skip themselves) and every completion message is tagged with its batch
//! id (late arrivals from executed jobs are dropped before any state mutation).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, unbounded};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::core::workers::Workers;
use crate::entities::frame::{Frame, FrameError, FrameSlot};

/// Tunable preload behavior. Left configurable rather than hardcoded: frame
/// counts in the tens need no cap, but nothing prevents larger sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreloadPolicy {
    /// Maximum concurrent decodes (worker thread count)
    pub max_concurrent: usize,
    /// Extra attempts per frame after a failed decode
    pub retry_count: u32,
}

impl Default for PreloadPolicy {
    fn default() -> Self {
        Self {
            // Leave a share of cores for the UI thread
            max_concurrent: (num_cpus::get() * 3 / 4).max(1),
            retry_count: 1,
        }
    }
}

/// One settled load attempt, tagged with the batch it belongs to.
#[derive(Debug)]
pub(crate) struct Settled {
    pub(crate) batch: Uuid,
    pub(crate) index: usize,
    pub(crate) result: Result<Frame, FrameError>,
}

/// Issues preload batches onto a shared worker pool.
pub struct Preloader {
    workers: Arc<Workers>,
    epoch: Arc<AtomicU64>,
    retry_count: u32,
}

impl Preloader {
    pub fn new(policy: PreloadPolicy) -> Self {
        let epoch = Arc::new(AtomicU64::new(0));
        let workers = Arc::new(Workers::new(policy.max_concurrent, Arc::clone(&epoch)));
        info!(
            "Preloader: {} workers, {} retries",
            workers.num_threads(),
            policy.retry_count
        );
        Self {
            workers,
            epoch,
            retry_count: policy.retry_count,
        }
    }

    /// Start loading every path concurrently. Returns the batch immediately;
    /// drive it with `PreloadBatch::poll` from the UI loop.
    pub fn begin(&self, paths: Vec<PathBuf>) -> PreloadBatch {
        let id = Uuid::new_v4();
        let (tx, rx) = unbounded();
        let epoch = self.epoch.load(Ordering::SeqCst);

        debug!("Preload batch {} started: {} frames", id, paths.len());

        for (index, path) in paths.iter().cloned().enumerate() {
            let tx = tx.clone();
            let retries = self.retry_count;
            self.workers.execute_with_epoch(epoch, move || {
                let result = load_with_retry(&path, retries);
                // Receiver gone means the batch was dropped; nothing to report
                let _ = tx.send(Settled {
                    batch: id,
                    index,
                    result,
                });
            });
        }

        PreloadBatch::with_channel(id, paths.len(), rx)
    }

    /// Abandon a batch: bump the epoch so queued jobs cancel themselves, and
    /// seal the batch so in-flight completions can no longer mutate it.
    pub fn abandon(&self, batch: &mut PreloadBatch) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        batch.abandoned = true;
        debug!(
            "Preload batch {} abandoned at {}/{} settled",
            batch.id,
            batch.settled,
            batch.slots.len()
        );
    }
}

fn load_with_retry(path: &Path, retries: u32) -> Result<Frame, FrameError> {
    let mut attempt = 0u32;
    loop {
        match Frame::load(path) {
            Ok(frame) => return Ok(frame),
            Err(e) if attempt < retries => {
                attempt += 1;
                debug!(
                    "Retrying frame {} (attempt {}/{}): {}",
                    path.display(),
                    attempt,
                    retries,
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }
}

/// Mutable state of one preload batch, owned by its creator.
///
/// `settled` only grows; `is_complete` flips to true exactly once, when all
/// slots have settled, and never reverts.
pub struct PreloadBatch {
    id: Uuid,
    slots: Vec<FrameSlot>,
    settled: usize,
    loaded: usize,
    complete: bool,
    abandoned: bool,
    rx: Receiver<Settled>,
}

impl PreloadBatch {
    pub(crate) fn with_channel(id: Uuid, len: usize, rx: Receiver<Settled>) -> Self {
        Self {
            id,
            slots: vec![FrameSlot::Pending; len],
            settled: 0,
            loaded: 0,
            // A zero-length batch has nothing left to settle
            complete: len == 0,
            abandoned: false,
            rx,
        }
    }

    /// Drain settled completions into their slots. Returns true if any state
    /// changed (the caller should repaint). A sealed (abandoned) batch never
    /// changes again.
    pub fn poll(&mut self) -> bool {
        if self.abandoned {
            return false;
        }

        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            if msg.batch != self.id {
                // Late write from a stale batch; drop before touching state
                warn!("Ignoring completion tagged to stale batch {}", msg.batch);
                continue;
            }
            if msg.index >= self.slots.len() || self.slots[msg.index].is_settled() {
                warn!("Duplicate or out-of-range completion for slot {}", msg.index);
                continue;
            }

            match msg.result {
                Ok(frame) => {
                    self.slots[msg.index] = FrameSlot::Loaded(frame);
                    self.loaded += 1;
                }
                Err(e) => {
                    warn!("Frame {} failed to load: {}", msg.index + 1, e);
                    self.slots[msg.index] = FrameSlot::Absent;
                }
            }
            self.settled += 1;
            changed = true;
        }

        if !self.complete && self.settled == self.slots.len() {
            self.complete = true;
            info!(
                "Preload batch {} complete: {}/{} frames loaded",
                self.id,
                self.loaded,
                self.slots.len()
            );
        }

        changed
    }

    /// Live load progress, 0..100.
    pub fn progress(&self) -> f32 {
        if self.slots.is_empty() {
            return 100.0;
        }
        self.settled as f32 / self.slots.len() as f32 * 100.0
    }

    /// True once every load attempt has settled (success or failure).
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Number of slots that settled successfully.
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Decoded frame at a 0-based slot offset, if loaded.
    pub fn frame(&self, slot: usize) -> Option<&Frame> {
        self.slots.get(slot).and_then(FrameSlot::frame)
    }

    pub fn slots(&self) -> &[FrameSlot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Sender;
    use std::time::{Duration, Instant};

    fn frame(px: u8) -> Frame {
        Frame::from_rgba8(1, 1, vec![px, px, px, 255])
    }

    fn test_batch(len: usize) -> (PreloadBatch, Sender<Settled>, Uuid) {
        let id = Uuid::new_v4();
        let (tx, rx) = unbounded();
        (PreloadBatch::with_channel(id, len, rx), tx, id)
    }

    fn settle_ok(tx: &Sender<Settled>, batch: Uuid, index: usize, px: u8) {
        tx.send(Settled {
            batch,
            index,
            result: Ok(frame(px)),
        })
        .unwrap();
    }

    fn settle_err(tx: &Sender<Settled>, batch: Uuid, index: usize) {
        tx.send(Settled {
            batch,
            index,
            result: Err(FrameError::Io("gone".into())),
        })
        .unwrap();
    }

    #[test]
    fn test_out_of_order_completions_land_in_assigned_slots() {
        let (mut batch, tx, id) = test_batch(4);

        // Reverse arrival order
        settle_ok(&tx, id, 3, 30);
        settle_ok(&tx, id, 1, 10);
        settle_ok(&tx, id, 0, 0);
        assert!(batch.poll());
        assert!(!batch.is_complete());
        assert_eq!(batch.progress(), 75.0);

        settle_ok(&tx, id, 2, 20);
        batch.poll();
        assert!(batch.is_complete());
        assert_eq!(batch.progress(), 100.0);

        // Slot order is declared order, not arrival order
        for (i, px) in [0u8, 10, 20, 30].iter().enumerate() {
            assert_eq!(batch.frame(i).unwrap().pixels()[0], *px, "slot {}", i);
        }
    }

    #[test]
    fn test_failed_frame_leaves_slot_absent_batch_completes() {
        let (mut batch, tx, id) = test_batch(3);

        settle_ok(&tx, id, 0, 1);
        settle_err(&tx, id, 1);
        settle_ok(&tx, id, 2, 3);
        batch.poll();

        assert!(batch.is_complete());
        assert_eq!(batch.loaded_count(), 2);
        assert!(batch.frame(0).is_some());
        assert!(batch.frame(1).is_none());
        assert_eq!(batch.slots()[1], FrameSlot::Absent);
        assert!(batch.frame(2).is_some());
    }

    #[test]
    fn test_complete_flips_exactly_once_never_before_all_settled() {
        let (mut batch, tx, id) = test_batch(2);

        assert!(!batch.is_complete());
        settle_err(&tx, id, 0);
        batch.poll();
        assert!(!batch.is_complete());

        settle_err(&tx, id, 1);
        batch.poll();
        assert!(batch.is_complete());

        // Nothing further can unflip it
        assert!(!batch.poll());
        assert!(batch.is_complete());
    }

    #[test]
    fn test_stale_batch_tag_never_mutates() {
        let (mut batch, tx, id) = test_batch(2);
        let stale_id = Uuid::new_v4();

        tx.send(Settled {
            batch: stale_id,
            index: 0,
            result: Ok(frame(99)),
        })
        .unwrap();
        assert!(!batch.poll());
        assert_eq!(batch.slots()[0], FrameSlot::Pending);
        assert_eq!(batch.progress(), 0.0);

        // Correctly tagged completions still work afterwards
        settle_ok(&tx, id, 0, 1);
        settle_ok(&tx, id, 1, 2);
        batch.poll();
        assert!(batch.is_complete());
    }

    #[test]
    fn test_abandoned_batch_ignores_late_completions() {
        let (mut batch, tx, id) = test_batch(2);

        settle_ok(&tx, id, 0, 1);
        batch.poll();
        assert_eq!(batch.progress(), 50.0);

        batch.abandoned = true; // what Preloader::abandon does to the batch

        settle_ok(&tx, id, 1, 2);
        assert!(!batch.poll());
        assert_eq!(batch.slots()[1], FrameSlot::Pending);
        assert!(!batch.is_complete());
        assert_eq!(batch.progress(), 50.0);
    }

    #[test]
    fn test_duplicate_completion_ignored() {
        let (mut batch, tx, id) = test_batch(1);

        settle_ok(&tx, id, 0, 1);
        settle_ok(&tx, id, 0, 2);
        batch.poll();

        assert!(batch.is_complete());
        assert_eq!(batch.frame(0).unwrap().pixels()[0], 1);
        assert_eq!(batch.loaded_count(), 1);
    }

    #[test]
    fn test_empty_batch_trivially_complete() {
        let (batch, _tx, _) = test_batch(0);
        assert!(batch.is_complete());
        assert_eq!(batch.progress(), 100.0);
    }

    #[test]
    fn test_end_to_end_with_missing_frame_on_disk() {
        let dir = std::env::temp_dir().join("bloomscroll_preload_e2e");
        let _ = std::fs::create_dir_all(&dir);

        // Frames 1 and 3 exist, frame 2 is a gap in the numbering
        for n in [1u32, 3] {
            let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([n as u8, 0, 0, 255]));
            img.save(dir.join(format!("ezgif-frame-{:03}.png", n)))
                .unwrap();
        }
        let _ = std::fs::remove_file(dir.join("ezgif-frame-002.png"));

        let preloader = Preloader::new(PreloadPolicy {
            max_concurrent: 2,
            retry_count: 0,
        });
        let paths = crate::core::frame_paths::generate(&dir, 3, "png");
        let mut batch = preloader.begin(paths);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !batch.is_complete() {
            batch.poll();
            assert!(Instant::now() < deadline, "preload never completed");
            std::thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(batch.loaded_count(), 2);
        assert!(batch.frame(0).is_some());
        assert!(batch.frame(1).is_none());
        assert!(batch.frame(2).is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_new_batch_unaffected_by_abandoned_batch() {
        // Old batch abandoned mid-flight, new batch takes over; the old
        // batch's completions must never reach the new batch's storage.
        let (mut old_batch, old_tx, old_id) = test_batch(2);
        settle_ok(&old_tx, old_id, 0, 1);
        old_batch.poll();
        old_batch.abandoned = true;

        let (mut new_batch, new_tx, new_id) = test_batch(2);

        // Late completions from the old batch settle now
        settle_ok(&old_tx, old_id, 1, 77);

        settle_ok(&new_tx, new_id, 0, 5);
        settle_ok(&new_tx, new_id, 1, 6);
        new_batch.poll();

        assert!(new_batch.is_complete());
        assert_eq!(new_batch.frame(0).unwrap().pixels()[0], 5);
        assert_eq!(new_batch.frame(1).unwrap().pixels()[0], 6);
        // And the old batch stayed sealed
        assert!(!old_batch.poll());
        assert!(!old_batch.is_complete());
    }
}
