mod console;
mod traits;

pub use console::{ConsoleSpeechInput, ConsoleSpeechOutput};
pub use traits::{RecognitionEvent, SpeechInput, SpeechOutput, SynthesisEvent};
