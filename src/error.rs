use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `ZeroHire`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ZeroError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Backend API ─────────────────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Session / phase control ─────────────────────────────────────────
    #[error("session: {0}")]
    Session(#[from] SessionError),

    // ── Quiz round ──────────────────────────────────────────────────────
    #[error("quiz: {0}")]
    Quiz(#[from] QuizError),

    // ── Speech capabilities ─────────────────────────────────────────────
    #[error("speech: {0}")]
    Speech(#[from] SpeechError),

    // ── Media capture ───────────────────────────────────────────────────
    #[error("media: {0}")]
    Media(#[from] MediaError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to write config: {0}")]
    Write(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Backend API errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned an undecodable payload: {detail}")]
    Decode {
        endpoint: &'static str,
        detail: String,
    },
}

// ─── Session errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid phase transition {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("no session context (dashboard not submitted)")]
    MissingContext,
}

// ─── Quiz errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("backend returned an empty question set")]
    EmptyQuiz,

    #[error("question {question} has no option {option}")]
    OptionOutOfRange { question: usize, option: usize },

    #[error("question {requested} is not the active question ({active})")]
    NotActiveQuestion { requested: usize, active: usize },

    #[error("quiz is not accepting answers in its current state")]
    NotActive,
}

// ─── Speech errors ──────────────────────────────────────────────────────────

/// Recognition / synthesis failures, mirroring the host engine's taxonomy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("recognition aborted")]
    Aborted,

    #[error("no speech detected")]
    NoSpeech,

    #[error("speech service unreachable")]
    Network,

    #[error("microphone access denied")]
    NotAllowed,

    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
}

impl SpeechError {
    /// Expected during normal operation; logged at debug and otherwise ignored.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Aborted | Self::NoSpeech)
    }

    /// Environmental conditions the candidate cannot fix from the session.
    pub fn is_environmental(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Requires the candidate to grant access before retrying.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::NotAllowed)
    }
}

// ─── Media errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("camera/microphone access denied")]
    AccessDenied,

    #[error("no capture device available")]
    NoDevice,

    #[error("capture failed: {0}")]
    Capture(String),
}
