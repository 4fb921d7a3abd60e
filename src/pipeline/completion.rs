//! Chat-completion invocation against an OpenAI-compatible endpoint.
//!
//! One prompt, one request, one response — no retry, no streaming, no
//! function calling. A network or API failure propagates to the caller
//! with the upstream message intact ([`DastabejError::CompletionFailed`]).
//!
//! The remote service sits behind the [`CompletionClient`] trait so the
//! site-generation pipeline can be exercised with a canned fake; the real
//! implementation is [`NovitaClient`].

use crate::config::{SiteConfig, API_KEY_VAR};
use crate::error::DastabejError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// A narrow interface over a completion endpoint: prompt in, text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DastabejError>;
}

/// Client for Novita's OpenAI-compatible chat-completions API.
#[derive(Debug)]
pub struct NovitaClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl NovitaClient {
    /// Build a client from the configuration, reading the credential from
    /// the environment.
    ///
    /// The credential check happens here, before any network call or file
    /// write, so a missing key aborts the run immediately with
    /// [`DastabejError::ConfigurationMissing`].
    pub fn from_env(config: &SiteConfig) -> Result<Self, DastabejError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DastabejError::ConfigurationMissing {
                var: API_KEY_VAR.to_string(),
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| DastabejError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionClient for NovitaClient {
    async fn complete(&self, prompt: &str) -> Result<String, DastabejError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: crate::prompts::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        info!("calling {} (model {})", url, self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DastabejError::CompletionFailed {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DastabejError::CompletionFailed {
                detail: format!("HTTP {status}: {}", body.trim()),
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| DastabejError::CompletionFailed {
                    detail: format!("malformed response body: {e}"),
                })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DastabejError::CompletionFailed {
                detail: "response contained no choices".to_string(),
            })?
            .message
            .content
            .unwrap_or_default();

        debug!("received {} chars", content.len());
        Ok(content)
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
