//! Streaming chat client
//!
//! POSTs the conversation to the Clitronic chat endpoint and decodes the
//! streamed answer with [`crate::ai::stream`]. Opening the request is
//! retried with exponential backoff; once the body starts streaming,
//! failures propagate unchanged.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::ai::prompts;
use crate::ai::provider::{ChatBackend, ChatMessage, TextSink};
use crate::ai::stream::{decode_with, DecodedStream};
use crate::ai::AIError;
use crate::config::ClientConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

pub struct ChatClient {
    client: Client,
    config: ClientConfig,
}

impl ChatClient {
    pub fn new(config: ClientConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send the conversation, handing text to `on_text` as it streams in
    pub async fn stream_chat<F>(
        &self,
        messages: &[ChatMessage],
        on_text: F,
    ) -> Result<DecodedStream, AIError>
    where
        F: FnMut(&str) + Send,
    {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AIError::MissingApiKey)?;

        let response = self.open_stream(api_key, messages).await?;
        let decoded = decode_with(response.bytes_stream(), on_text).await?;
        Ok(decoded)
    }

    /// Ask the model to identify the component in a photo
    pub async fn identify<F>(
        &self,
        image: &[u8],
        media_type: &str,
        on_text: F,
    ) -> Result<DecodedStream, AIError>
    where
        F: FnMut(&str) + Send,
    {
        let message = ChatMessage::user_image(image, media_type, prompts::IDENTIFY_PROMPT);
        self.stream_chat(&[message], on_text).await
    }

    async fn open_stream(
        &self,
        api_key: &str,
        messages: &[ChatMessage],
    ) -> Result<Response, AIError> {
        let url = self.config.chat_url();
        let body = ChatRequest { messages };

        let mut retry_count = 0;
        let mut delay_ms = self.config.initial_retry_delay_ms;

        loop {
            let response = self
                .client
                .post(&url)
                .header("x-api-key", api_key)
                .json(&body)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let text = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    return Err(AIError::ApiError {
                        status,
                        message: error_message(&text),
                    });
                }
                Err(e) if retry_count + 1 < self.config.max_retries => {
                    retry_count += 1;
                    tracing::warn!(
                        "Request to {} failed: {}. Retrying in {}ms (attempt {}/{})",
                        url,
                        e,
                        delay_ms,
                        retry_count,
                        self.config.max_retries
                    );
                    sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms *= 2;
                }
                Err(e) => return Err(AIError::RequestFailed(e)),
            }
        }
    }
}

/// Servers answer failures with `{"error": "..."}`; fall back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Request failed".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[async_trait]
impl ChatBackend for ChatClient {
    fn name(&self) -> &str {
        "clitronic"
    }

    async fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(&self, messages: &[ChatMessage]) -> Result<String, AIError> {
        self.stream_chat(messages, |_| {}).await?.into_answer()
    }

    async fn send_streaming(
        &self,
        messages: &[ChatMessage],
        on_text: &mut TextSink<'_>,
    ) -> Result<String, AIError> {
        self.stream_chat(messages, |text: &str| on_text(text))
            .await?
            .into_answer()
    }
}
