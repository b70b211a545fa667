use super::emotion::{EmotionSample, classify};
use super::{FaceScanner, MediaSession};
use crate::config::EmotionThresholds;
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Single-slot holder for the most recent emotion sample.
///
/// The sampling task and the turn-taking loop share this slot; writes are
/// last-write-wins and readers never block. No history is retained.
#[derive(Clone)]
pub struct EmotionMonitor {
    slot: Arc<ArcSwapOption<EmotionSample>>,
}

impl EmotionMonitor {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(ArcSwapOption::const_empty()),
        }
    }

    /// Most recent sample, if any frame has classified yet.
    pub fn latest(&self) -> Option<EmotionSample> {
        self.slot.load().as_deref().copied()
    }

    pub fn store(&self, sample: EmotionSample) {
        self.slot.store(Some(Arc::new(sample)));
    }

    /// Run per-frame classification until cancelled or the stream closes.
    ///
    /// Frames with invalid dimensions and frames in which no face is found
    /// are skipped without touching the slot. The media session is released
    /// when the task exits, on every path.
    pub fn spawn_sampler(
        &self,
        mut session: Box<dyn MediaSession>,
        scanner: Arc<dyn FaceScanner>,
        thresholds: EmotionThresholds,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    frame = session.next_frame() => match frame {
                        Some(frame) if frame.has_valid_dimensions() => {
                            if let Some(shapes) = scanner.scan(&frame) {
                                slot.store(Some(Arc::new(classify(&shapes, &thresholds))));
                            }
                        }
                        Some(_) => {}
                        None => break,
                    },
                }
            }
            session.release();
            tracing::debug!("emotion sampler stopped, media released");
        })
    }
}

impl Default for EmotionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
