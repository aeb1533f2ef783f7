//! Perplexity chat-completions client.
//!
//! One HTTP POST per invocation, no retries, no local model validation. The
//! [`CompletionBackend`] trait is the seam between the dispatcher and the
//! network so the control plane can be exercised against a stub upstream.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Production Perplexity API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Default HTTP client timeout. Deep-research models can run for minutes.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A single outbound completion call, derived per tool invocation.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub content: String,
}

/// The upstream answer plus any citations it carried.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub answer: String,
    pub citations: Vec<String>,
}

#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Api { status: StatusCode, body: String },
    Malformed(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Api { status, body } => write!(f, "upstream returned {status}: {body}"),
            Self::Malformed(message) => write!(f, "malformed upstream response: {message}"),
        }
    }
}

impl Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

/// The upstream collaborator contract: one request in, one answer out.
#[async_trait]
pub trait CompletionBackend: Send + Sync + 'static {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ClientError>;
}

/// Reqwest-backed client for the Perplexity endpoint.
///
/// Holds no per-request state; one handle is shared by all invocations. The
/// API key is never validated locally, so a missing credential surfaces as an
/// upstream authentication failure on first use.
#[derive(Clone)]
pub struct SonarClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SonarClient {
    /// Creates a client with the given credential and request timeout.
    ///
    /// # Errors
    /// Returns [`ClientError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the endpoint base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionBackend for SonarClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ClientError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("sending completion request to {url} (model {})", request.model);

        let body = ChatRequest {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.content,
            }],
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("perplexity api returned {status}");
            return Err(ClientError::Api { status, body });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|err| ClientError::Malformed(err.to_string()))?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ClientError::Malformed("response contained no answer content".to_string())
            })?;

        Ok(Completion {
            answer,
            citations: parsed.citations,
        })
    }
}
