//! Turn-taking state machine for the interview room.
//!
//! The machine is a pure reducer: [`TurnEngine::handle`] maps an event to a
//! new state plus a list of [`Action`]s, and performs no I/O itself. The
//! async driver in [`super::room`] feeds it host events and executes the
//! actions against the capability traits, which keeps every transition
//! testable without a browser, a microphone, or a backend.

use crate::error::SpeechError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No turn in progress; the candidate must invoke the control to speak.
    Idle,
    /// An utterance is being synthesized.
    AiSpeaking,
    /// A recognition session is open.
    Listening,
    /// A committed candidate turn is with the interaction service.
    Processing,
    /// Terminal. No transition leaves it.
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// Interview phase entry; queues the greeting.
    SessionStarted,
    SynthesisStarted,
    SynthesisFinished,
    /// The fixed post-utterance delay elapsed; the microphone may open.
    ListenDelayElapsed,
    /// The candidate pressed the interaction control.
    ControlInvoked,
    InterimResult(String),
    FinalResult(String),
    /// The silence-debounce window elapsed with no further final result.
    SilenceElapsed,
    RecognitionEnded,
    RecognitionFailed(SpeechError),
    /// The interaction service's reply (or the local fallback apology).
    AiReply(String),
    /// Explicit end action or countdown expiry.
    EndRequested,
}

/// Side effects for the driver to execute, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AppendAiTurn(String),
    Speak(String),
    CancelSynthesis,
    StartRecognition,
    StopRecognition,
    ArmListenDelay,
    ClearListenDelay,
    ArmSilenceWindow,
    ClearSilenceWindow,
    ShowCaption(String),
    ClearCaption,
    /// Append the candidate entry and send it to the interaction service.
    CommitCandidateTurn(String),
    SurfaceSpeechError(SpeechError),
    /// Release media, recognition, synthesis and timers, unconditionally.
    ReleaseResources,
}

pub struct TurnEngine {
    state: TurnState,
    /// Final transcript accumulated inside the open silence window.
    pending: String,
    greeting: String,
}

impl TurnEngine {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            state: TurnState::Idle,
            pending: String::new(),
            greeting: greeting.into(),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn handle(&mut self, event: TurnEvent) -> Vec<Action> {
        use TurnEvent as E;
        use TurnState as S;

        if self.state == S::Ended {
            return Vec::new();
        }

        if event == E::EndRequested {
            self.state = S::Ended;
            self.pending.clear();
            return vec![
                Action::StopRecognition,
                Action::CancelSynthesis,
                Action::ClearSilenceWindow,
                Action::ClearListenDelay,
                Action::ClearCaption,
                Action::ReleaseResources,
            ];
        }

        match (self.state, event) {
            (S::Idle, E::SessionStarted) => {
                let greeting = self.greeting.clone();
                vec![Action::AppendAiTurn(greeting.clone()), Action::Speak(greeting)]
            }

            (S::Idle | S::Processing, E::SynthesisStarted) => {
                self.state = S::AiSpeaking;
                Vec::new()
            }

            (S::AiSpeaking, E::SynthesisFinished) => vec![Action::ArmListenDelay],

            (S::AiSpeaking, E::ListenDelayElapsed) => {
                self.state = S::Listening;
                vec![Action::StartRecognition]
            }

            // Candidate-initiated interruption: cut the AI off and listen.
            (S::AiSpeaking, E::ControlInvoked) => {
                self.state = S::Listening;
                vec![
                    Action::CancelSynthesis,
                    Action::ClearListenDelay,
                    Action::StartRecognition,
                ]
            }

            (S::Idle, E::ControlInvoked) => {
                self.state = S::Listening;
                vec![Action::StartRecognition]
            }

            (S::Listening, E::InterimResult(text)) => {
                vec![Action::ShowCaption(self.caption_with(&text))]
            }

            (S::Listening, E::FinalResult(text)) => {
                if self.pending.is_empty() {
                    self.pending = text;
                } else {
                    self.pending.push(' ');
                    self.pending.push_str(&text);
                }
                // Every final result re-arms the window, extending the turn.
                vec![
                    Action::ShowCaption(self.pending.clone()),
                    Action::ArmSilenceWindow,
                ]
            }

            (S::Listening, E::SilenceElapsed) => {
                if self.pending.is_empty() {
                    return Vec::new();
                }
                let committed = std::mem::take(&mut self.pending);
                self.state = S::Processing;
                vec![
                    Action::StopRecognition,
                    Action::ClearCaption,
                    Action::CommitCandidateTurn(committed),
                ]
            }

            // The engine closing its session is only a turn-ender when
            // nothing was recognized; an armed silence window still commits.
            (S::Listening, E::RecognitionEnded) => {
                if self.pending.is_empty() {
                    self.state = S::Idle;
                    vec![Action::ClearCaption]
                } else {
                    Vec::new()
                }
            }

            (S::Listening, E::RecognitionFailed(err)) => {
                if err.is_ignorable() {
                    if self.pending.is_empty() {
                        self.state = S::Idle;
                        vec![Action::ClearCaption]
                    } else {
                        Vec::new()
                    }
                } else {
                    self.pending.clear();
                    self.state = S::Idle;
                    vec![
                        Action::ClearSilenceWindow,
                        Action::ClearCaption,
                        Action::SurfaceSpeechError(err),
                    ]
                }
            }

            (S::Processing, E::AiReply(text)) => {
                vec![Action::AppendAiTurn(text.clone()), Action::Speak(text)]
            }

            // Stale or out-of-order events are dropped rather than wedging
            // the machine: e.g. a listen delay firing after an interruption
            // already opened the microphone.
            _ => Vec::new(),
        }
    }

    fn caption_with(&self, interim: &str) -> String {
        if self.pending.is_empty() {
            interim.to_string()
        } else {
            format!("{} {}", self.pending, interim)
        }
    }
}
