use serde::{Deserialize, Serialize};

/// One generated multiple-choice question.
///
/// `correct_index` points into `options`; the backend guarantees it is in
/// range, but the quiz round re-checks before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[derive(Debug, Serialize)]
pub struct QuizRequest {
    pub domain: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

/// One candidate turn shipped to the interaction service, together with the
/// most recent emotion sample.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRequest {
    pub session_id: String,
    pub transcript: String,
    pub emotion_label: String,
    pub emotion_score: f32,
}

#[derive(Debug, Deserialize)]
pub struct InteractionResponse {
    pub text: String,
}

/// Acknowledgement from the resume upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    pub candidate_id: String,
    pub resume_hash: String,
    #[serde(default)]
    pub message: String,
}
