// @zen-component: CHAT-CompletionClient
//
//! Chat-completion client.
//!
//! Calls the provider's chat-completions API (`/v1/chat/completions`) with
//! bearer auth and returns the first choice's text verbatim. No retries; the
//! HTTP layer collapses every failure into a generic 500.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Default chat-completions API base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default system instruction prepended to every completion request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant for a digital \
    marketing agency. Answer visitor questions concisely and suggest booking a \
    consultation when it would help.";

/// Errors from the completion client.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Invalid completion base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Completion response contained no choices")]
    EmptyChoices,
}

/// Settings for the completion client.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API base URL (overridable so tests can point at a local stub).
    pub base_url: String,
    /// Bearer API key. May be empty; requests then fail upstream.
    pub api_key: String,
    /// Model name sent with every request.
    pub model: String,
    /// Optional system instruction prepended to the message list.
    pub system_prompt: Option<String>,
}

impl CompletionConfig {
    /// Reads settings from environment variables with the documented defaults.
    ///
    /// | Variable | Default |
    /// |-----------------|------------------------------|
    /// | `OPENAI_BASE_URL` | `https://api.openai.com`   |
    /// | `OPENAI_API_KEY`  | empty                      |
    /// | `OPENAI_MODEL`    | `gpt-3.5-turbo`            |
    /// | `SYSTEM_PROMPT`   | built-in instruction       |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            system_prompt: Some(
                std::env::var("SYSTEM_PROMPT").unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.into()),
            ),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the chat-completions API.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    system_prompt: Option<String>,
}

impl CompletionClient {
    /// Build a client from settings. Fails only on an unparseable base URL.
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let endpoint = Url::parse(&config.base_url)?.join("v1/chat/completions")?;
        Ok(Self {
            http: Client::new(),
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }

    /// Send one user message and return the first completion's text verbatim.
    pub async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = self.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: message,
        });

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(CompletionError::Api { status, body });
        }

        let data: ChatCompletionResponse = resp.json().await?;
        data.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(CompletionError::EmptyChoices)
    }
}
