//! LLM completion client (blocking and streaming).
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire format. Streaming
//! responses arrive as `data: <json>` SSE lines terminated by a
//! `data: [DONE]` sentinel; only the delta text is surfaced to callers.

use async_stream::stream;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Sampling temperature used when the caller does not set one.
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Sentinel payload closing an SSE completion stream.
const STREAM_DONE_SENTINEL: &str = "[DONE]";

/// Stream of completion text deltas.
pub type TextStream = BoxStream<'static, Result<String, ClientError>>;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// One message in a chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Build a `system` role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Build a `user` role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Per-call completion options. Unset fields use the client defaults.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Override the client's default model.
    pub model: Option<String>,
    /// Sampling temperature (default 0.7).
    pub temperature: Option<f64>,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A chat-completion service.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run a completion and return the full assistant message.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        opts: &CompletionOptions,
    ) -> Result<String, ClientError>;

    /// Run a streaming completion, yielding assistant text deltas.
    async fn stream(
        &self,
        messages: &[ChatMessage],
        opts: &CompletionOptions,
    ) -> Result<TextStream, ClientError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// [`LlmClient`] implementation over an OpenAI-compatible HTTP API.
pub struct HttpLlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    default_model: String,
}

impl HttpLlmClient {
    /// Create a client targeting `base_url` (e.g. `https://host/v1`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            default_model: default_model.into(),
        }
    }

    fn request_body(
        &self,
        messages: &[ChatMessage],
        opts: &CompletionOptions,
        stream: bool,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": opts.model.as_deref().unwrap_or(&self.default_model),
            "messages": messages,
            "temperature": opts.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "stream": stream,
        })
    }

    async fn post_chat(&self, body: serde_json::Value) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "LLM request rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        opts: &CompletionOptions,
    ) -> Result<String, ClientError> {
        let body = self.request_body(messages, opts, false);
        let response = self.post_chat(body).await?;
        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClientError::MissingOutput("completion contained no choices".to_string()))
    }

    async fn stream(
        &self,
        messages: &[ChatMessage],
        opts: &CompletionOptions,
    ) -> Result<TextStream, ClientError> {
        let body = self.request_body(messages, opts, true);
        let response = self.post_chat(body).await?;
        let mut bytes = response.bytes_stream();

        let deltas = stream! {
            let mut buffer = String::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(ClientError::Http(e));
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Drain complete lines; a partial line stays buffered until
                // the next chunk arrives.
                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim_end_matches('\r').to_string();
                    buffer.drain(..=newline);

                    let Some(data) = parse_sse_data(&line) else {
                        continue;
                    };
                    if data == STREAM_DONE_SENTINEL {
                        return;
                    }
                    match delta_content(data) {
                        Ok(Some(content)) if !content.is_empty() => yield Ok(content),
                        Ok(_) => {}
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }
        };

        Ok(deltas.boxed())
    }
}

// ---------------------------------------------------------------------------
// Wire parsing
// ---------------------------------------------------------------------------

/// Extract the payload of a `data: ...` SSE line, if it is one.
fn parse_sse_data(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim)
}

/// Pull the delta text out of one streamed completion chunk.
fn delta_content(data: &str) -> Result<Option<String>, ClientError> {
    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| ClientError::Decode(format!("bad stream chunk: {e}")))?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content))
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_sse_data -------------------------------------------------------

    #[test]
    fn data_line_is_parsed() {
        assert_eq!(parse_sse_data("data: {\"x\":1}"), Some("{\"x\":1}"));
        assert_eq!(parse_sse_data("data:[DONE]"), Some("[DONE]"));
    }

    #[test]
    fn non_data_lines_are_skipped() {
        assert_eq!(parse_sse_data(""), None);
        assert_eq!(parse_sse_data(": keep-alive"), None);
        assert_eq!(parse_sse_data("event: message"), None);
    }

    // -- delta_content --------------------------------------------------------

    #[test]
    fn delta_text_is_extracted() {
        let data = r#"{"choices":[{"delta":{"content":"Hello"}}]}"#;
        assert_eq!(delta_content(data).unwrap(), Some("Hello".to_string()));
    }

    #[test]
    fn empty_delta_yields_none() {
        let data = r#"{"choices":[{"delta":{}}]}"#;
        assert_eq!(delta_content(data).unwrap(), None);

        let data = r#"{"choices":[]}"#;
        assert_eq!(delta_content(data).unwrap(), None);
    }

    #[test]
    fn malformed_chunk_is_a_decode_error() {
        assert!(matches!(
            delta_content("not json"),
            Err(ClientError::Decode(_))
        ));
    }

    // -- request body ---------------------------------------------------------

    #[test]
    fn request_body_uses_default_model_and_temperature() {
        let client = HttpLlmClient::new("https://llm.example/v1", "key", "base-model");
        let body = client.request_body(
            &[ChatMessage::user("hi")],
            &CompletionOptions::default(),
            false,
        );
        assert_eq!(body["model"], "base-model");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn request_body_honours_overrides() {
        let client = HttpLlmClient::new("https://llm.example/v1/", "key", "base-model");
        let opts = CompletionOptions {
            model: Some("fast-model".to_string()),
            temperature: Some(0.2),
        };
        let body = client.request_body(&[ChatMessage::system("sys")], &opts, true);
        assert_eq!(body["model"], "fast-model");
        assert_eq!(body["stream"], true);
        // Trailing slash on the base URL is normalised away.
        assert_eq!(client.base_url, "https://llm.example/v1");
    }
}
