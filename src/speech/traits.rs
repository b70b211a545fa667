use crate::error::SpeechError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Events emitted by a recognition session.
///
/// Interim results refine the live caption without ending the turn; a final
/// result arms the silence-debounce window. `Ended` fires when the engine
/// closes the session on its own (end of speech, `stop`, engine teardown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Interim(String),
    Final(String),
    Ended,
    Failed(SpeechError),
}

/// Events emitted while an utterance is being synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisEvent {
    Started,
    Finished,
}

/// Speech-to-text capability of the host.
///
/// At most one recognition session is outstanding at a time; the interaction
/// loop stops the previous session before starting a new one.
#[async_trait]
pub trait SpeechInput: Send + Sync {
    /// Start a recognition session. Events arrive on the returned receiver
    /// until `Ended`/`Failed`, or until [`SpeechInput::stop`] is called.
    async fn start(&self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeechError>;

    /// Stop the active recognition session, if any.
    async fn stop(&self);
}

/// Text-to-speech capability of the host.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Begin speaking. Implementations cancel any ongoing utterance first, so
    /// two voices never overlap. `Started` arrives when audio begins,
    /// `Finished` when it completes (never after a cancel).
    async fn speak(&self, text: &str) -> Result<mpsc::Receiver<SynthesisEvent>, SpeechError>;

    /// Cancel the in-flight utterance, if any.
    async fn cancel(&self);
}
