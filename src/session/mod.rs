mod flow;

pub use flow::{DashboardSubmission, SessionFlow};

use strum::Display;

/// Top-level UI phase. Exactly one is active at a time and transitions are
/// one-directional: dashboard → quiz → interview → report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Dashboard,
    Quiz,
    Interview,
    Report,
}

/// Candidate data captured at dashboard submission; immutable thereafter.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub role: String,
    pub domain: String,
    pub resume_text: String,
}

/// The five roles the dashboard offers, as (value, display name) pairs.
pub const ROLE_CATALOG: &[(&str, &str)] = &[
    ("frontend", "Frontend Engineer"),
    ("backend", "Backend Engineer"),
    ("fullstack", "Full Stack Developer"),
    ("data-scientist", "Data Scientist"),
    ("pm", "Product Manager"),
];

/// Display name for a role value; unknown values pass through unchanged.
pub fn role_display_name(value: &str) -> String {
    ROLE_CATALOG
        .iter()
        .find(|(key, _)| *key == value)
        .map_or_else(|| value.to_string(), |(_, name)| (*name).to_string())
}
