//! Capture/scanner stand-ins for hosts with no camera.
//!
//! The interview loop treats capture denial as a degraded-but-valid entry
//! path, so the console front end simply reports no device and interaction
//! requests fall back to the neutral emotion sample.

use super::{BlendShapes, FaceScanner, MediaCapture, MediaSession, VideoFrame};
use crate::error::MediaError;
use async_trait::async_trait;

pub struct HeadlessCapture;

#[async_trait]
impl MediaCapture for HeadlessCapture {
    async fn acquire(&self) -> Result<Box<dyn MediaSession>, MediaError> {
        Err(MediaError::NoDevice)
    }
}

pub struct NullScanner;

impl FaceScanner for NullScanner {
    fn scan(&self, _frame: &VideoFrame) -> Option<BlendShapes> {
        None
    }
}
