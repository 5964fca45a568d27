//! Thin HTTP client for the Gemini REST API.

use crate::gemini::dto::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use nanoslides_error::{GeminiError, GeminiErrorKind};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Authenticated Gemini API client shared by the engine and the planner.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the production endpoint.
    ///
    /// # Errors
    ///
    /// - `MissingApiKey` if the key is blank
    /// - `ClientCreation` if the HTTP client cannot be built
    #[instrument(skip_all)]
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            http,
            api_key: api_key.trim().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at another endpoint, such as a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `models/{model}:generateContent`.
    ///
    /// # Errors
    ///
    /// - `ApiRequest` if the request cannot be sent
    /// - `HttpError` for non-success statuses, carrying the provider message
    /// - `MalformedResponse` if the body is not a `generateContent` response
    #[instrument(skip(self, request), fields(model = %model))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(url = %url, "Sending Gemini request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(describe_send_error(&e))))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(describe_send_error(&e))))?;
        serde_json::from_str(&body)
            .map_err(|e| GeminiError::new(GeminiErrorKind::MalformedResponse(e.to_string())))
    }
}

fn describe_send_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

/// Build an `HttpError` from a status and the provider's error body.
///
/// The message is `STATUS: message` when the body is a Gemini error
/// envelope, otherwise the trimmed body.
#[track_caller]
fn http_error(status_code: u16, body: &str) -> GeminiError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let error = envelope.error;
            debug!(code = ?error.code, status = %error.status, "Gemini returned an error envelope");
            if error.status.is_empty() {
                error.message
            } else {
                format!("{}: {}", error.status, error.message)
            }
        }
        Err(_) => body.trim().to_string(),
    };

    GeminiError::new(GeminiErrorKind::HttpError {
        status_code,
        message,
    })
}
