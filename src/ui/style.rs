use console::style;
use std::fmt::Display;

/// Green bold — success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold — section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — subtitles, secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow — warnings, the anti-cheat banner
pub fn warn<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold — errors, the end-of-session control
pub fn danger<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Green — confirmed values, scores, names
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold — the interviewer's voice, step numbers
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan — secondary accent, field labels
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}
