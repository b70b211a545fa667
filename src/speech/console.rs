//! Console-backed speech capabilities.
//!
//! Outside a browser there is no recognition or synthesis engine, so the CLI
//! stands both in with the terminal: the candidate types their answers, and
//! the interviewer's utterances are printed and paced at reading speed.

use super::traits::{RecognitionEvent, SpeechInput, SpeechOutput, SynthesisEvent};
use crate::error::SpeechError;
use crate::ui;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Reads one line of typed input per recognition session.
pub struct ConsoleSpeechInput {
    active: Mutex<Option<CancellationToken>>,
}

impl ConsoleSpeechInput {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }
}

impl Default for ConsoleSpeechInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechInput for ConsoleSpeechInput {
    async fn start(&self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeechError> {
        let token = CancellationToken::new();
        {
            let mut active = self.active.lock().await;
            if let Some(previous) = active.take() {
                previous.cancel();
            }
            *active = Some(token.clone());
        }

        let (tx, rx) = mpsc::channel(8);
        ui::print_listening_prompt();

        tokio::spawn(async move {
            let mut reader = BufReader::new(tokio::io::stdin());
            let mut line = String::new();
            tokio::select! {
                () = token.cancelled() => {}
                read = reader.read_line(&mut line) => {
                    let events = match read {
                        Ok(0) => vec![RecognitionEvent::Ended],
                        Ok(_) => {
                            let text = line.trim().to_string();
                            if text.is_empty() {
                                vec![
                                    RecognitionEvent::Failed(SpeechError::NoSpeech),
                                    RecognitionEvent::Ended,
                                ]
                            } else {
                                vec![RecognitionEvent::Final(text), RecognitionEvent::Ended]
                            }
                        }
                        Err(e) => vec![RecognitionEvent::Failed(SpeechError::Unavailable(
                            e.to_string(),
                        ))],
                    };
                    for event in events {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn stop(&self) {
        if let Some(token) = self.active.lock().await.take() {
            token.cancel();
        }
    }
}

/// Prints utterances and paces `Finished` at roughly reading speed.
pub struct ConsoleSpeechOutput {
    active: Mutex<Option<CancellationToken>>,
}

impl ConsoleSpeechOutput {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }
}

impl Default for ConsoleSpeechOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechOutput for ConsoleSpeechOutput {
    async fn speak(&self, text: &str) -> Result<mpsc::Receiver<SynthesisEvent>, SpeechError> {
        let token = CancellationToken::new();
        {
            let mut active = self.active.lock().await;
            if let Some(previous) = active.take() {
                previous.cancel();
            }
            *active = Some(token.clone());
        }

        ui::print_ai_utterance(text);

        let (tx, rx) = mpsc::channel(2);
        let pace = reading_pace(text);
        tokio::spawn(async move {
            if tx.send(SynthesisEvent::Started).await.is_err() {
                return;
            }
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(pace) => {
                    let _ = tx.send(SynthesisEvent::Finished).await;
                }
            }
        });

        Ok(rx)
    }

    async fn cancel(&self) {
        if let Some(token) = self.active.lock().await.take() {
            token.cancel();
        }
    }
}

fn reading_pace(text: &str) -> Duration {
    let words = text.split_whitespace().count() as u64;
    Duration::from_millis(400 + words * 120)
}
