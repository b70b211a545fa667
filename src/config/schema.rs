use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub interview: InterviewConfig,

    #[serde(default)]
    pub emotion: EmotionThresholds,

    #[serde(default)]
    pub anticheat: AntiCheatConfig,
}

// ─── Backend ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin of the assessment backend (quiz generation, interaction, reports).
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_origin() -> String {
    "http://localhost:8000".into()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

// ─── Interview ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Session length. The countdown starts on phase entry and cannot pause.
    #[serde(default = "default_duration")]
    pub duration_secs: u64,

    /// How long a turn stays open after a final recognition result before the
    /// accumulated transcript is committed.
    #[serde(default = "default_silence_debounce")]
    pub silence_debounce_ms: u64,

    /// Pause between the AI finishing an utterance and the microphone opening.
    #[serde(default = "default_listen_delay")]
    pub listen_delay_ms: u64,
}

fn default_duration() -> u64 {
    300
}

fn default_silence_debounce() -> u64 {
    4000
}

fn default_listen_delay() -> u64 {
    500
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            silence_debounce_ms: default_silence_debounce(),
            listen_delay_ms: default_listen_delay(),
        }
    }
}

// ─── Emotion classification ─────────────────────────────────────────────────

/// Blend-shape score thresholds, checked in priority order:
/// brow raise, then smile, then eye squint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmotionThresholds {
    #[serde(default = "default_brow_raise")]
    pub brow_raise: f32,

    #[serde(default = "default_smile")]
    pub smile: f32,

    #[serde(default = "default_eye_squint")]
    pub eye_squint: f32,
}

fn default_brow_raise() -> f32 {
    0.3
}

fn default_smile() -> f32 {
    0.3
}

fn default_eye_squint() -> f32 {
    0.4
}

impl Default for EmotionThresholds {
    fn default() -> Self {
        Self {
            brow_raise: default_brow_raise(),
            smile: default_smile(),
            eye_squint: default_eye_squint(),
        }
    }
}

// ─── Anti-cheat ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntiCheatConfig {
    /// Displayed in the warning banner ("Attempts: n/limit"). Advisory only;
    /// the monitor never terminates the session.
    #[serde(default = "default_warn_limit")]
    pub warn_limit: u32,
}

fn default_warn_limit() -> u32 {
    3
}

impl Default for AntiCheatConfig {
    fn default() -> Self {
        Self {
            warn_limit: default_warn_limit(),
        }
    }
}
