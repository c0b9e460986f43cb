/// LLM Client — the single point of entry for all completion calls in Skillpath.
///
/// ARCHITECTURAL RULE: No other module may call the model endpoint directly.
/// All LLM interactions MUST go through this module.
///
/// Model: llama3 (hardcoded — do not make configurable to prevent drift)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CHAT_PATH: &str = "/api/chat";
/// The model used for all LLM calls in Skillpath.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama3";
const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Temperature for extraction-style prompts (skill extraction from résumé text).
pub const TEMPERATURE_EXTRACTION: f32 = 0.1;
/// Temperature for roadmap synthesis prompts.
pub const TEMPERATURE_SYNTHESIS: f32 = 0.2;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Request to the model timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// The single LLM client used by all services in Skillpath.
/// Wraps an Ollama-compatible chat endpoint.
///
/// There is NO internal retry: the model is non-deterministic and calls are
/// costly, so a failed or timed-out completion surfaces immediately as a
/// retryable error and the retry decision stays with the caller.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
}

impl LlmClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    /// Sends a single chat completion request and returns the raw completion
    /// text. The caller is responsible for parsing whatever the model emits.
    pub async fn complete(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
            options: ChatOptions { temperature },
        };

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_PATH);

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(LlmError::Http)?;

        if chat.message.content.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            "LLM call succeeded: completion length={} chars",
            chat.message.content.len()
        );

        Ok(chat.message.content)
    }
}
