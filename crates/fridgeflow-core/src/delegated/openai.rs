//! OpenAI-compatible chat-completions client.
//!
//! Works with any endpoint that speaks the `/chat/completions` protocol and
//! honours `response_format: {"type": "json_object"}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::client::{CompletionClient, CompletionRequest, LlmSettings};
use crate::error::PlanError;

/// Connection timeout; the request itself uses the client default.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// How much of an error body to keep in messages.
const ERROR_BODY_PREVIEW: usize = 200;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Chat-completions client for OpenAI and compatible servers.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Build a client for `settings.base_url` authenticated with `api_key`.
    pub fn new(settings: &LlmSettings, api_key: String) -> Result<Self, PlanError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PlanError::NotConfigured(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key,
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, PlanError> {
        let body = chat_request(request);

        debug!(
            model = %request.model,
            system_len = request.system.len(),
            user_len = request.user.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("failed to reach {}: {e}", self.base_url);
                PlanError::Upstream(format!("failed to reach {}: {e}", self.base_url))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PlanError::Upstream(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            error!(%status, "chat completion request rejected");
            return Err(upstream_error(status, &text));
        }

        extract_content(&text)
    }
}

/// Map a completion request onto the chat-completions wire body.
fn chat_request(request: &CompletionRequest) -> ChatRequest<'_> {
    ChatRequest {
        model: &request.model,
        messages: [
            ChatMessage {
                role: "system",
                content: &request.system,
            },
            ChatMessage {
                role: "user",
                content: &request.user,
            },
        ],
        temperature: request.temperature,
        response_format: request.json_output.then_some(ResponseFormat {
            format_type: "json_object",
        }),
    }
}

/// Turn a non-success reply into an error, preferring the API's own message.
fn upstream_error(status: reqwest::StatusCode, body: &str) -> PlanError {
    let detail = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.chars().take(ERROR_BODY_PREVIEW).collect(),
    };
    PlanError::Upstream(format!("{status}: {detail}"))
}

/// Pull the first choice's message text out of a chat-completions body.
fn extract_content(body: &str) -> Result<String, PlanError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| PlanError::InvalidResponse(format!("unexpected completion envelope: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| PlanError::InvalidResponse("completion contained no message content".into()))
}
