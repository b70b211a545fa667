use super::types::{
    InteractionRequest, InteractionResponse, QuizQuestion, QuizRequest, QuizResponse,
    UploadReceipt,
};
use crate::config::BackendConfig;
use crate::error::ApiError;
use reqwest::multipart;
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client for the assessment backend.
///
/// One instance is shared across the whole session; the underlying
/// `reqwest::Client` pools connections to the single backend origin.
pub struct BackendClient {
    origin: String,
    client: Client,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            origin: config.origin.trim_end_matches('/').to_string(),
            client: build_backend_client(
                config.request_timeout_secs,
                config.connect_timeout_secs,
            ),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `POST /api/upload-resume` — multipart `file`, `role`, `domain`.
    ///
    /// Any non-success status aborts the dashboard-to-quiz transition, so the
    /// error carries the backend's body for the surfaced alert.
    pub async fn upload_resume(
        &self,
        file_name: &str,
        file_bytes: Vec<u8>,
        role: &str,
        domain: &str,
    ) -> Result<UploadReceipt, ApiError> {
        const ENDPOINT: &str = "upload-resume";

        let part = multipart::Part::bytes(file_bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .part("file", part)
            .text("role", role.to_string())
            .text("domain", domain.to_string());

        let response = self
            .client
            .post(format!("{}/api/upload-resume", self.origin))
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let response = check_status(ENDPOINT, response).await?;
        decode_json(ENDPOINT, response).await
    }

    /// `POST /api/generate-quiz` — one request, no automatic retry.
    pub async fn generate_quiz(
        &self,
        domain: &str,
        resume_text: &str,
    ) -> Result<Vec<QuizQuestion>, ApiError> {
        const ENDPOINT: &str = "generate-quiz";

        let body = QuizRequest {
            domain: domain.to_string(),
            resume_text: resume_text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/generate-quiz", self.origin))
            .json(&body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let response = check_status(ENDPOINT, response).await?;
        let quiz: QuizResponse = decode_json(ENDPOINT, response).await?;
        Ok(quiz.questions)
    }

    /// `POST /api/interact` — one candidate turn in, one AI utterance out.
    pub async fn interact(&self, request: &InteractionRequest) -> Result<String, ApiError> {
        const ENDPOINT: &str = "interact";

        let response = self
            .client
            .post(format!("{}/api/interact", self.origin))
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let response = check_status(ENDPOINT, response).await?;
        let reply: InteractionResponse = decode_json(ENDPOINT, response).await?;
        Ok(reply.text)
    }

    /// `POST /api/report/{session_id}` — returns the raw payload text.
    ///
    /// The payload shape varies (object, JSON-encoded string, fenced code
    /// block); normalization lives in [`crate::report`].
    pub async fn fetch_report(&self, session_id: &str) -> Result<String, ApiError> {
        const ENDPOINT: &str = "report";

        let response = self
            .client
            .post(format!("{}/api/report/{session_id}", self.origin))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let response = check_status(ENDPOINT, response).await?;
        response.text().await.map_err(|source| ApiError::Transport {
            endpoint: ENDPOINT,
            source,
        })
    }
}

fn build_backend_client(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

async fn check_status(endpoint: &'static str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        endpoint,
        status: status.as_u16(),
        body,
    })
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    let body = response.text().await.map_err(|source| ApiError::Transport {
        endpoint,
        source,
    })?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        endpoint,
        detail: e.to_string(),
    })
}
