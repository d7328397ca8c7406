//! Chat-completions client for the hosted text-generation endpoint.
//!
//! One system message plus one user message per request, first choice wins.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Upstream(StatusCode),
    #[error("failed to send completion request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    const USER_AGENT: &'static str = concat!("songscope/", env!("CARGO_PKG_VERSION"));

    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    /// Returns the first choice's text, or an empty string when the model produced none.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        api_key: &str,
    ) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "completion endpoint rejected request");
            return Err(GenerationError::Upstream(status));
        }

        let parsed: ChatResponse = response.json().await.map_err(GenerationError::Decode)?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> CompletionClient {
        CompletionClient::new(format!("{}/v1/chat/completions", server.uri()), "grok-beta").unwrap()
    }

    #[tokio::test]
    async fn test_sends_both_roles_with_bearer_and_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer xai-key"))
            .and(body_partial_json(json!({
                "model": "grok-beta",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "first"}},
                    {"message": {"role": "assistant", "content": "second"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let out = client_for(&server).await.complete("sys", "usr", "xai-key").await.unwrap();
        assert_eq!(out, "first");
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let out = client_for(&server).await.complete("s", "u", "k").await.unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_missing_choices_and_null_content_are_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"messages": [{"role": "system", "content": "a"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"messages": [{"role": "system", "content": "b"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": null}}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.complete("a", "u", "k").await.unwrap(), "");
        assert_eq!(client.complete("b", "u", "k").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.complete("s", "u", "k").await.unwrap_err();
        assert!(matches!(err, GenerationError::Upstream(s) if s == StatusCode::UNAUTHORIZED));
        assert!(err.to_string().starts_with("request failed"));
    }
}
