//! Scripted capability implementations shared by the integration suites.
//!
//! The real speech/vision engines only exist in a browser; these stand-ins
//! play back scripted events and record every lifecycle call so the suites
//! can assert the resource-release guarantees.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use zerohire::error::{MediaError, SpeechError};
use zerohire::speech::{RecognitionEvent, SpeechInput, SpeechOutput, SynthesisEvent};
use zerohire::vision::{BlendShapes, FaceScanner, MediaCapture, MediaSession, VideoFrame};

// ─── Speech input ───────────────────────────────────────────────────────────

/// Plays back one scripted event list per recognition session.
pub struct ScriptedSpeechInput {
    sessions: Mutex<VecDeque<Vec<RecognitionEvent>>>,
    pub starts: AtomicUsize,
    pub stopped: AtomicBool,
}

impl ScriptedSpeechInput {
    pub fn new(sessions: Vec<Vec<RecognitionEvent>>) -> Arc<Self> {
        Arc::new(Self {
            sessions: Mutex::new(sessions.into()),
            starts: AtomicUsize::new(0),
            stopped: AtomicBool::new(false),
        })
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechInput for ScriptedSpeechInput {
    async fn start(&self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeechError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.stopped.store(false, Ordering::SeqCst);

        let script = self
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| vec![RecognitionEvent::Ended]);

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            for event in script {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }

    async fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

// ─── Speech output ──────────────────────────────────────────────────────────

/// Records utterances; `Finished` fires after the configured pace.
pub struct RecordingSpeechOutput {
    pub utterances: Mutex<Vec<String>>,
    pub cancelled: AtomicBool,
    pace: Duration,
}

impl RecordingSpeechOutput {
    pub fn new() -> Arc<Self> {
        Self::with_pace(Duration::ZERO)
    }

    pub fn with_pace(pace: Duration) -> Arc<Self> {
        Arc::new(Self {
            utterances: Mutex::new(Vec::new()),
            cancelled: AtomicBool::new(false),
            pace,
        })
    }

    pub fn spoken(&self) -> Vec<String> {
        self.utterances.lock().unwrap().clone()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechOutput for RecordingSpeechOutput {
    async fn speak(&self, text: &str) -> Result<mpsc::Receiver<SynthesisEvent>, SpeechError> {
        self.utterances.lock().unwrap().push(text.to_string());

        let (tx, rx) = mpsc::channel(2);
        let pace = self.pace;
        tokio::spawn(async move {
            if tx.send(SynthesisEvent::Started).await.is_err() {
                return;
            }
            tokio::time::sleep(pace).await;
            let _ = tx.send(SynthesisEvent::Finished).await;
        });
        Ok(rx)
    }

    async fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

// ─── Media capture / vision ─────────────────────────────────────────────────

/// Hands out one fake media session and records its release.
pub struct FakeCapture {
    pub released: Arc<AtomicBool>,
    frames: Mutex<Vec<VideoFrame>>,
}

impl FakeCapture {
    pub fn with_frames(count: usize) -> Arc<Self> {
        Arc::new(Self {
            released: Arc::new(AtomicBool::new(false)),
            frames: Mutex::new(vec![VideoFrame::sized(640, 480); count]),
        })
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaCapture for FakeCapture {
    async fn acquire(&self) -> Result<Box<dyn MediaSession>, MediaError> {
        Ok(Box::new(FakeSession {
            frames: std::mem::take(&mut *self.frames.lock().unwrap()),
            released: Arc::clone(&self.released),
        }))
    }
}

struct FakeSession {
    frames: Vec<VideoFrame>,
    released: Arc<AtomicBool>,
}

#[async_trait]
impl MediaSession for FakeSession {
    async fn next_frame(&mut self) -> Option<VideoFrame> {
        if self.frames.is_empty() {
            // Keep the stream open until the room cancels the sampler.
            std::future::pending::<()>().await;
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// Reports the same blend shapes for every frame.
pub struct StaticScanner(pub BlendShapes);

impl FaceScanner for StaticScanner {
    fn scan(&self, _frame: &VideoFrame) -> Option<BlendShapes> {
        Some(self.0)
    }
}
