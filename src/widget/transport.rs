//! Outbound request for one chat turn.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Fixed text shown when a turn fails for any reason.
pub const CONNECTION_ERROR_TEXT: &str = "Sorry, there was a problem connecting to the server.";

/// Request body for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply body for one turn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    /// Kept as raw JSON: only a literal `true` flags the reply.
    #[serde(default)]
    pub crisis: Option<Value>,
}

impl ChatReply {
    #[must_use]
    pub fn new(answer: impl Into<String>, crisis: Option<bool>) -> Self {
        Self {
            answer: answer.into(),
            crisis: crisis.map(Value::Bool),
        }
    }

    #[must_use]
    pub fn is_flagged(&self) -> bool {
        matches!(self.crisis, Some(Value::Bool(true)))
    }
}

/// Any failure of a turn. The widget treats every variant the same way.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS or body read failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// Body was not the expected JSON.
    #[error("invalid reply body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request task panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Delivers one user message and returns the service's reply.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync + Debug {
    async fn send(&self, message: &str) -> Result<ChatReply, TransportError>;
}

/// Run one `send` on its own task.
///
/// A panicking transport surfaces as [`TransportError::Task`] instead of
/// unwinding into the caller, so every turn still gets an outcome.
pub async fn send_isolated(
    transport: Arc<dyn ChatTransport>,
    message: String,
) -> Result<ChatReply, TransportError> {
    tokio::spawn(async move { transport.send(&message).await }).await?
}

/// JSON-over-HTTP transport posting to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: Url::parse(endpoint.as_ref())?,
            http: reqwest::Client::new(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<ChatReply, TransportError> {
        let req = ChatRequest {
            message: message.to_string(),
        };

        // `.json` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
