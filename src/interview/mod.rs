pub mod anticheat;
pub mod countdown;
pub mod room;
pub mod state;
pub mod transcript;

pub use anticheat::{AntiCheatMonitor, ProctorSignal, ViolationState};
pub use countdown::{Countdown, CountdownEvent};
pub use room::{FALLBACK_APOLOGY, InterviewOutcome, InterviewRoom, RoomCommand};
pub use state::{Action, TurnEngine, TurnEvent, TurnState};
pub use transcript::{Speaker, Transcript, TranscriptEntry};
