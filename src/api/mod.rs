mod client;
mod types;

pub use client::BackendClient;
pub use types::{InteractionRequest, QuizQuestion, UploadReceipt};
