use super::{Phase, SessionContext};
use crate::api::BackendClient;
use crate::error::{SessionError, ZeroError};
use crate::report::Report;
use uuid::Uuid;

/// What the dashboard form collects before anything is uploaded.
#[derive(Debug, Clone)]
pub struct DashboardSubmission {
    pub role: String,
    pub domain: String,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

/// Owns the top-level phase and the data handed between phases.
///
/// Each transition consumes the previous phase for good; there is no
/// backward navigation anywhere in the flow.
pub struct SessionFlow {
    phase: Phase,
    session_id: String,
    context: Option<SessionContext>,
    quiz_score: Option<f64>,
    report: Option<Report>,
}

impl SessionFlow {
    pub fn new() -> Self {
        Self {
            phase: Phase::Dashboard,
            session_id: Uuid::new_v4().to_string(),
            context: None,
            quiz_score: None,
            report: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn context(&self) -> Result<&SessionContext, SessionError> {
        self.context.as_ref().ok_or(SessionError::MissingContext)
    }

    pub fn quiz_score(&self) -> Option<f64> {
        self.quiz_score
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Upload the resume and, only on success, enter the quiz phase.
    ///
    /// A failed upload leaves the flow on the dashboard with the error
    /// surfaced to the caller; the transition is not performed.
    pub async fn submit_dashboard(
        &mut self,
        client: &BackendClient,
        submission: DashboardSubmission,
    ) -> Result<(), ZeroError> {
        self.require_phase(Phase::Dashboard, Phase::Quiz)?;

        let receipt = client
            .upload_resume(
                &submission.file_name,
                submission.file_bytes.clone(),
                &submission.role,
                &submission.domain,
            )
            .await?;
        tracing::info!(
            candidate_id = %receipt.candidate_id,
            resume_hash = %receipt.resume_hash,
            "resume uploaded"
        );

        let resume_text = resume_text_from_bytes(&submission.file_bytes, &submission.role);
        self.context = Some(SessionContext {
            role: submission.role,
            domain: submission.domain,
            resume_text,
        });
        self.phase = Phase::Quiz;
        Ok(())
    }

    pub fn complete_quiz(&mut self, score: f64) -> Result<(), SessionError> {
        self.require_phase(Phase::Quiz, Phase::Interview)?;
        self.quiz_score = Some(score);
        self.phase = Phase::Interview;
        Ok(())
    }

    pub fn complete_interview(&mut self, report: Report) -> Result<(), SessionError> {
        self.require_phase(Phase::Interview, Phase::Report)?;
        self.report = Some(report);
        self.phase = Phase::Report;
        Ok(())
    }

    fn require_phase(&self, want: Phase, to: Phase) -> Result<(), SessionError> {
        if self.phase == want {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.phase.to_string(),
                to: to.to_string(),
            })
        }
    }
}

impl Default for SessionFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Resume files arrive as opaque bytes (PDF, DOCX, plain text). Text-like
/// payloads are used as-is for quiz generation; binary ones fall back to a
/// generic description, matching what the observed flow fed the quiz.
fn resume_text_from_bytes(bytes: &[u8], role: &str) -> String {
    let text = String::from_utf8_lossy(bytes);
    let noise = text
        .chars()
        .filter(|c| (c.is_control() && !c.is_whitespace()) || *c == char::REPLACEMENT_CHARACTER)
        .count();
    let trimmed = text.trim();
    if trimmed.is_empty() || noise * 10 > trimmed.chars().count() {
        format!("Experienced {role} with various technical skills.")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn submission() -> DashboardSubmission {
        DashboardSubmission {
            role: "Backend Engineer".into(),
            domain: "Backend Engineer".into(),
            file_name: "resume.txt".into(),
            file_bytes: b"Rust, Tokio, five years of services.".to_vec(),
        }
    }

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig {
            origin: server.uri(),
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
        })
    }

    #[tokio::test]
    async fn successful_upload_enters_quiz_phase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload-resume"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidate_id": "abc123",
                "resume_hash": "deadbeef",
                "message": "Resume uploaded successfully"
            })))
            .mount(&server)
            .await;

        let mut flow = SessionFlow::new();
        flow.submit_dashboard(&client_for(&server), submission())
            .await
            .unwrap();

        assert_eq!(flow.phase(), Phase::Quiz);
        assert!(flow.context().unwrap().resume_text.contains("Tokio"));
    }

    #[tokio::test]
    async fn failed_upload_stays_on_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload-resume"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage offline"))
            .mount(&server)
            .await;

        let mut flow = SessionFlow::new();
        let err = flow
            .submit_dashboard(&client_for(&server), submission())
            .await
            .unwrap_err();

        assert!(matches!(err, ZeroError::Api(_)));
        assert_eq!(flow.phase(), Phase::Dashboard);
        assert!(flow.context().is_err());
    }

    #[test]
    fn transitions_are_one_directional() {
        let mut flow = SessionFlow::new();

        // Quiz completion is not valid from the dashboard.
        assert!(matches!(
            flow.complete_quiz(80.0),
            Err(SessionError::InvalidTransition { .. })
        ));

        // And an interview cannot complete before it starts.
        assert!(matches!(
            flow.complete_interview(crate::report::fallback_report("x")),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn quiz_to_interview_to_report_carries_data_forward() {
        let mut flow = SessionFlow::new();
        flow.phase = Phase::Quiz;
        flow.context = Some(SessionContext {
            role: "Data Scientist".into(),
            domain: "Data Scientist".into(),
            resume_text: "pandas".into(),
        });

        flow.complete_quiz(70.0).unwrap();
        assert_eq!(flow.phase(), Phase::Interview);
        assert_eq!(flow.quiz_score(), Some(70.0));

        flow.complete_interview(crate::report::fallback_report("raw"))
            .unwrap();
        assert_eq!(flow.phase(), Phase::Report);
        assert!(flow.report().is_some());

        // Terminal: no transition leaves the report phase.
        assert!(flow.complete_quiz(1.0).is_err());
        assert!(
            flow.complete_interview(crate::report::fallback_report("again"))
                .is_err()
        );
    }

    #[test]
    fn binary_resume_bytes_fall_back_to_generic_text() {
        let pdfish: Vec<u8> = [b"%PDF-1.4 ".as_slice(), &[0u8, 1, 2, 3, 200, 220, 255]]
            .concat();
        let text = resume_text_from_bytes(&pdfish, "Frontend Engineer");
        assert!(text.contains("Experienced Frontend Engineer"));

        let plain = resume_text_from_bytes(b"Plain text resume", "x");
        assert_eq!(plain, "Plain text resume");
    }
}
