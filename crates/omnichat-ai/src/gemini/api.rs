//! AiClient trait implementation for GeminiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, Message, TokenUsage};

use super::client::{extract_chunk, GeminiClient};

impl GeminiClient {
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response, AiError> {
        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages);
        debug!(model = %self.config.model, messages = messages.len(), "Gemini API request");

        let response = self.post(&self.api_url(false), &body).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages);
        let url = format!("{}?alt=sse", self.api_url(true));
        debug!(model = %self.config.model, messages = messages.len(), "Gemini API streaming request");

        let response = self.post(&url, &body).await?;

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();

        parse_sse_stream(response, |event: SseEvent| {
            let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
                return;
            };
            let (chunk, chunk_usage) = extract_chunk(&data);
            if let Some(u) = chunk_usage {
                usage = u;
            }
            if !chunk.is_empty() {
                full_content.push_str(&chunk);
                on_chunk(chunk);
            }
        })
        .await?;

        Ok(AiResponse {
            content: full_content,
            usage,
        })
    }
}
