//! Non-streaming client for the `OpenAI` Chat Completions API.

use serde::Deserialize;
use serde_json::json;

use super::provider::AuthScheme;
use super::{LlmError, LlmSettings, Message};

/// Client for `/v1/chat/completions` (or the Azure deployment equivalent).
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("settings", &self.settings)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Run one completion and return the trimmed text of the first choice.
    pub async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let url = self
            .settings
            .provider
            .build_chat_url(&self.settings.base_url);

        let body = json!({
            "model": self.settings.model,
            "messages": messages,
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
        });

        let mut rb = self.http.post(&url).json(&body);
        rb = match self.settings.provider.auth_scheme() {
            AuthScheme::Bearer => rb.bearer_auth(&self.settings.api_key),
            AuthScheme::ApiKeyHeader => rb.header("api-key", &self.settings.api_key),
        };

        tracing::debug!(
            url = %url,
            model = %self.settings.model,
            message_count = messages.len(),
            "Sending chat completion request"
        );

        let resp: CompletionResponse = rb.send().await?.error_for_status()?.json().await?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    /// Complete a single user turn under the given system prompt.
    pub async fn complete_single(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        self.complete(&[Message::system(system_prompt), Message::user(user_message)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Provider;
    use axum::{Json, Router, http::HeaderMap, routing::post};
    use serde_json::Value;

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn settings(base_url: String) -> LlmSettings {
        LlmSettings {
            provider: Provider::Generic,
            base_url,
            ..LlmSettings::openai("test-key", "gpt-3.5-turbo")
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                assert_eq!(body["model"], "gpt-3.5-turbo");
                assert_eq!(body["max_tokens"], 300);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "hello");
                Json(serde_json::json!({
                    "choices": [{ "message": { "role": "assistant", "content": "  Hi there.  " } }]
                }))
            }),
        );
        let base = spawn_mock(router).await;

        let client = ChatCompletionsClient::new(settings(base));
        let answer = client.complete_single("be kind", "hello").await.unwrap();
        assert_eq!(answer, "Hi there.");
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({ "choices": [] })) }),
        );
        let base = spawn_mock(router).await;

        let client = ChatCompletionsClient::new(settings(base));
        let err = client.complete_single("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "nope") }),
        );
        let base = spawn_mock(router).await;

        let client = ChatCompletionsClient::new(settings(base));
        let err = client.complete_single("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
