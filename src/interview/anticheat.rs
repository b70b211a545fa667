//! Anti-cheat monitor.
//!
//! Observes page-visibility and window-focus loss signals from the host and
//! accumulates a violation count, independent of the turn-taking loop. The
//! count is advisory: the banner warns about a limit, but nothing terminates
//! the session when it is crossed.

use crate::config::AntiCheatConfig;

/// A proctoring signal from the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProctorSignal {
    VisibilityLost,
    FocusLost,
}

impl ProctorSignal {
    pub fn description(self) -> &'static str {
        match self {
            Self::VisibilityLost => "Tab Switching / Window Focus Loss",
            Self::FocusLost => "Window Blur Detected",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationState {
    pub count: u32,
    pub last: Option<&'static str>,
}

pub struct AntiCheatMonitor {
    state: ViolationState,
    warn_limit: u32,
}

impl AntiCheatMonitor {
    pub fn new(config: &AntiCheatConfig) -> Self {
        Self {
            state: ViolationState::default(),
            warn_limit: config.warn_limit,
        }
    }

    pub fn record(&mut self, signal: ProctorSignal) -> &ViolationState {
        self.state.count += 1;
        self.state.last = Some(signal.description());
        tracing::warn!(
            violation = signal.description(),
            count = self.state.count,
            "anti-cheat violation"
        );
        &self.state
    }

    /// Dismissing the banner resets the counter to zero.
    pub fn dismiss(&mut self) {
        self.state = ViolationState::default();
    }

    pub fn state(&self) -> &ViolationState {
        &self.state
    }

    pub fn has_violations(&self) -> bool {
        self.state.count > 0
    }

    pub fn banner_text(&self) -> String {
        format!(
            "{}. Attempts: {}/{}. Further violations may terminate the interview.",
            self.state.last.unwrap_or("Suspicious activity detected"),
            self.state.count,
            self.warn_limit
        )
    }
}
