//! Interview room driver.
//!
//! Owns the capability handles and timers, feeds host events into the
//! [`TurnEngine`] reducer, and executes the actions it returns. All state
//! transitions happen on this single task; the emotion sampler runs
//! concurrently but only communicates through the last-write-wins sample
//! slot.

use super::anticheat::{AntiCheatMonitor, ProctorSignal, ViolationState};
use super::countdown::{Countdown, CountdownEvent};
use super::state::{Action, TurnEngine, TurnEvent, TurnState};
use super::transcript::{Speaker, Transcript};
use crate::api::{BackendClient, InteractionRequest};
use crate::config::Config;
use crate::error::ZeroError;
use crate::report::{self, Report};
use crate::speech::{RecognitionEvent, SpeechInput, SpeechOutput, SynthesisEvent};
use crate::ui;
use crate::vision::{EmotionMonitor, FaceScanner, MediaCapture};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Fallback utterance substituted when the interaction service fails,
/// preserving the loop rather than halting it.
pub const FALLBACK_APOLOGY: &str =
    "I'm having trouble connecting to my brain. Please try again.";

/// Candidate-facing controls, injected by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCommand {
    /// The interaction control: interrupt the AI or open the microphone.
    Interact,
    /// End the interview now.
    End,
    /// Dismiss the anti-cheat banner, resetting the violation count.
    DismissWarning,
}

#[derive(Debug)]
pub struct InterviewOutcome {
    pub transcript: Transcript,
    pub violations: ViolationState,
    pub report: Report,
}

pub struct InterviewRoom {
    config: Config,
    client: Arc<BackendClient>,
    speech_in: Arc<dyn SpeechInput>,
    speech_out: Arc<dyn SpeechOutput>,
    capture: Arc<dyn MediaCapture>,
    scanner: Arc<dyn FaceScanner>,
    session_id: String,
    role: String,
}

impl InterviewRoom {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        client: Arc<BackendClient>,
        speech_in: Arc<dyn SpeechInput>,
        speech_out: Arc<dyn SpeechOutput>,
        capture: Arc<dyn MediaCapture>,
        scanner: Arc<dyn FaceScanner>,
        session_id: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            config,
            client,
            speech_in,
            speech_out,
            capture,
            scanner,
            session_id: session_id.into(),
            role: role.into(),
        }
    }

    /// Run the interview to completion and fetch the report.
    ///
    /// Returns once the room has reached its terminal state, every capability
    /// handle has been released, and the report (or its fallback) is in hand.
    pub async fn run(
        self,
        mut commands: mpsc::Receiver<RoomCommand>,
        mut proctor: mpsc::Receiver<ProctorSignal>,
    ) -> Result<InterviewOutcome, ZeroError> {
        let greeting = format!(
            "Good day! I'm Zero, your AI interviewer. Let's begin with a simple question - \
             tell me about your experience with {} work.",
            self.role.to_lowercase()
        );

        let (event_tx, mut event_rx) = mpsc::channel::<TurnEvent>(64);
        let (countdown_tx, mut countdown_rx) = mpsc::channel::<CountdownEvent>(32);

        let emotions = EmotionMonitor::new();
        let sampler_cancel = CancellationToken::new();
        let sampler_handle = match self.capture.acquire().await {
            Ok(session) => Some(emotions.spawn_sampler(
                session,
                Arc::clone(&self.scanner),
                self.config.emotion,
                sampler_cancel.clone(),
            )),
            Err(e) => {
                // Camera features degrade silently; the loop still runs.
                tracing::warn!("media capture unavailable: {e}");
                None
            }
        };

        let mut anticheat = AntiCheatMonitor::new(&self.config.anticheat);
        let mut driver = RoomDriver {
            engine: TurnEngine::new(greeting),
            transcript: Transcript::new(),
            emotions,
            client: Arc::clone(&self.client),
            speech_in: Arc::clone(&self.speech_in),
            speech_out: Arc::clone(&self.speech_out),
            event_tx,
            silence_deadline: None,
            listen_deadline: None,
            silence_window: self.config.silence_debounce(),
            listen_delay: self.config.listen_delay(),
            session_id: self.session_id.clone(),
            sampler_cancel,
            countdown: Some(Countdown::start(
                self.config.interview_duration(),
                countdown_tx,
            )),
        };

        driver.dispatch(TurnEvent::SessionStarted).await;

        while driver.engine.state() != TurnState::Ended {
            tokio::select! {
                Some(event) = event_rx.recv() => {
                    driver.dispatch(event).await;
                }
                Some(command) = commands.recv() => match command {
                    RoomCommand::Interact => driver.dispatch(TurnEvent::ControlInvoked).await,
                    RoomCommand::End => driver.dispatch(TurnEvent::EndRequested).await,
                    RoomCommand::DismissWarning => {
                        anticheat.dismiss();
                        ui::print_banner_dismissed();
                    }
                },
                Some(signal) = proctor.recv() => {
                    anticheat.record(signal);
                    ui::print_warning_banner(&anticheat.banner_text());
                }
                Some(event) = countdown_rx.recv() => match event {
                    CountdownEvent::Tick(remaining) => {
                        if remaining % 60 == 0 || remaining <= 10 {
                            ui::print_time_remaining(remaining);
                        }
                    }
                    CountdownEvent::Expired => {
                        tracing::info!("countdown expired, ending interview");
                        driver.dispatch(TurnEvent::EndRequested).await;
                    }
                },
                () = sleep_opt(driver.silence_deadline) => {
                    driver.silence_deadline = None;
                    driver.dispatch(TurnEvent::SilenceElapsed).await;
                }
                () = sleep_opt(driver.listen_deadline) => {
                    driver.listen_deadline = None;
                    driver.dispatch(TurnEvent::ListenDelayElapsed).await;
                }
            }
        }

        // The sampler owns the media session and releases it on exit; wait so
        // the devices are provably off before the report is fetched.
        if let Some(handle) = sampler_handle {
            let _ = handle.await;
        }

        ui::print_generating_report();
        let report = match self.client.fetch_report(&self.session_id).await {
            Ok(raw) => report::parse_report(&raw),
            Err(e) => {
                tracing::error!("report fetch failed: {e}");
                report::fallback_report(&e.to_string())
            }
        };

        Ok(InterviewOutcome {
            transcript: driver.transcript,
            violations: anticheat.state().clone(),
            report,
        })
    }
}

/// Mutable loop state, separated from [`InterviewRoom`] so the select arms
/// can borrow it while the receivers stay outside.
struct RoomDriver {
    engine: TurnEngine,
    transcript: Transcript,
    emotions: EmotionMonitor,
    client: Arc<BackendClient>,
    speech_in: Arc<dyn SpeechInput>,
    speech_out: Arc<dyn SpeechOutput>,
    event_tx: mpsc::Sender<TurnEvent>,
    silence_deadline: Option<Instant>,
    listen_deadline: Option<Instant>,
    silence_window: std::time::Duration,
    listen_delay: std::time::Duration,
    session_id: String,
    sampler_cancel: CancellationToken,
    countdown: Option<Countdown>,
}

impl RoomDriver {
    /// Feed one event through the reducer, executing the resulting actions.
    /// Actions may produce follow-up events (a committed turn produces the
    /// AI reply), which are processed in order on this same task.
    async fn dispatch(&mut self, event: TurnEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            tracing::debug!(?event, state = ?self.engine.state(), "turn event");
            for action in self.engine.handle(event) {
                for follow_up in self.execute(action).await {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    async fn execute(&mut self, action: Action) -> Vec<TurnEvent> {
        match action {
            Action::AppendAiTurn(text) => {
                self.transcript.push(Speaker::Ai, text);
                Vec::new()
            }

            Action::Speak(text) => match self.speech_out.speak(&text).await {
                Ok(mut rx) => {
                    let tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        while let Some(event) = rx.recv().await {
                            let mapped = match event {
                                SynthesisEvent::Started => TurnEvent::SynthesisStarted,
                                SynthesisEvent::Finished => TurnEvent::SynthesisFinished,
                            };
                            if tx.send(mapped).await.is_err() {
                                break;
                            }
                        }
                    });
                    Vec::new()
                }
                Err(e) => {
                    // No synthesis engine: proceed as if the utterance played.
                    tracing::warn!("speech synthesis unavailable: {e}");
                    vec![TurnEvent::SynthesisStarted, TurnEvent::SynthesisFinished]
                }
            },

            Action::CancelSynthesis => {
                self.speech_out.cancel().await;
                Vec::new()
            }

            Action::StartRecognition => match self.speech_in.start().await {
                Ok(mut rx) => {
                    let tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        while let Some(event) = rx.recv().await {
                            let mapped = match event {
                                RecognitionEvent::Interim(text) => TurnEvent::InterimResult(text),
                                RecognitionEvent::Final(text) => TurnEvent::FinalResult(text),
                                RecognitionEvent::Ended => TurnEvent::RecognitionEnded,
                                RecognitionEvent::Failed(err) => {
                                    TurnEvent::RecognitionFailed(err)
                                }
                            };
                            if tx.send(mapped).await.is_err() {
                                break;
                            }
                        }
                    });
                    Vec::new()
                }
                Err(e) => vec![TurnEvent::RecognitionFailed(e)],
            },

            Action::StopRecognition => {
                self.speech_in.stop().await;
                Vec::new()
            }

            Action::ArmListenDelay => {
                self.listen_deadline = Some(Instant::now() + self.listen_delay);
                Vec::new()
            }

            Action::ClearListenDelay => {
                self.listen_deadline = None;
                Vec::new()
            }

            Action::ArmSilenceWindow => {
                self.silence_deadline = Some(Instant::now() + self.silence_window);
                Vec::new()
            }

            Action::ClearSilenceWindow => {
                self.silence_deadline = None;
                Vec::new()
            }

            Action::ShowCaption(text) => {
                ui::print_caption(&text);
                Vec::new()
            }

            Action::ClearCaption => {
                ui::clear_caption();
                Vec::new()
            }

            Action::CommitCandidateTurn(text) => {
                self.transcript.push(Speaker::Candidate, &text);
                let (emotion_label, emotion_score) = match self.emotions.latest() {
                    Some(sample) => (sample.label.to_string(), sample.score),
                    None => ("neutral".to_string(), 0.0),
                };
                tracing::info!(emotion = %emotion_label, score = emotion_score, "committing turn");

                let request = InteractionRequest {
                    session_id: self.session_id.clone(),
                    transcript: text,
                    emotion_label,
                    emotion_score,
                };
                match self.client.interact(&request).await {
                    Ok(reply) => vec![TurnEvent::AiReply(reply)],
                    Err(e) => {
                        tracing::error!("interaction service failed: {e}");
                        vec![TurnEvent::AiReply(FALLBACK_APOLOGY.to_string())]
                    }
                }
            }

            Action::SurfaceSpeechError(err) => {
                if err.is_permission() {
                    ui::print_error(
                        "Microphone access denied. Please allow permission and press the \
                         interaction control to continue.",
                    );
                } else if err.is_environmental() {
                    tracing::warn!("speech recognition degraded: {err}");
                } else {
                    ui::print_error(&err.to_string());
                }
                Vec::new()
            }

            Action::ReleaseResources => {
                self.speech_in.stop().await;
                self.speech_out.cancel().await;
                self.silence_deadline = None;
                self.listen_deadline = None;
                self.sampler_cancel.cancel();
                if let Some(countdown) = self.countdown.take() {
                    countdown.cancel();
                }
                Vec::new()
            }
        }
    }
}

async fn sleep_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
