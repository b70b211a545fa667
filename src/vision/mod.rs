mod emotion;
mod headless;
mod sampler;

pub use emotion::{BlendShapes, EmotionLabel, EmotionSample, classify};
pub use headless::{HeadlessCapture, NullScanner};
pub use sampler::EmotionMonitor;

use crate::error::MediaError;
use async_trait::async_trait;

/// One decoded video frame handed to the face-landmark collaborator.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl VideoFrame {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: Vec::new(),
        }
    }

    /// Frames can arrive before the stream has negotiated its geometry;
    /// those must not reach the scanner.
    pub fn has_valid_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Camera/microphone capture capability of the host.
#[async_trait]
pub trait MediaCapture: Send + Sync {
    /// Request camera + microphone access once, at interview entry.
    async fn acquire(&self) -> Result<Box<dyn MediaSession>, MediaError>;
}

/// An open capture stream. Released exactly once, unconditionally, when the
/// interview ends.
#[async_trait]
pub trait MediaSession: Send + Sync {
    /// Next available video frame; `None` once the stream has closed.
    async fn next_frame(&mut self) -> Option<VideoFrame>;

    /// Stop all tracks and drop the device handles.
    fn release(&mut self);
}

/// Face-landmark inference collaborator: frame in, named blend-shape
/// scores out. `None` when no face is detected.
pub trait FaceScanner: Send + Sync {
    fn scan(&self, frame: &VideoFrame) -> Option<BlendShapes>;
}
