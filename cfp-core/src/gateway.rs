//! Chat-completion client for the upstream AI gateway.

use std::future::Future;

use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};
use crate::lifestyle::LifestyleInput;
use crate::prompt::{user_prompt, SYSTEM_PROMPT, TEMPERATURE};

/// Environment variable holding the bearer credential.
pub const API_KEY_ENV: &str = "LOVABLE_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Outbound request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

impl ChatRequest {
    /// System and user prompt pair for one submission.
    pub fn for_input(model: &str, input: &LifestyleInput) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(input),
                },
            ],
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Something that answers a chat request with the model's reply text.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> impl Future<Output = Result<String>> + Send;

    /// Model identifier to put in outbound requests.
    fn model(&self) -> &str;
}

/// Where and how to reach the chat-completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub model: String,
    /// `None` when the credential is missing; every call then fails before any I/O.
    pub api_key: Option<String>,
}

impl GatewayConfig {
    /// Read the credential from [`API_KEY_ENV`]. An empty value counts as missing.
    pub fn from_env(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_env(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}

/// Map a non-success upstream status onto the error taxonomy.
pub fn classify_failure(status: StatusCode, body: &str) -> EstimateError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => EstimateError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => EstimateError::QuotaExhausted,
        other => EstimateError::PredictionFailed {
            status: Some(other.as_u16()),
            reason: body.to_string(),
        },
    }
}

/// Pull `choices[0].message.content` out of a chat-completion response body.
pub fn reply_content(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| EstimateError::PredictionFailed {
            status: None,
            reason: format!("unexpected response envelope: {}", e),
        })?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| EstimateError::PredictionFailed {
            status: None,
            reason: "response carried no message content".to_string(),
        })
}

/// reqwest-backed [`CompletionBackend`]. One attempt per call, no retry.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl CompletionBackend for Gateway {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) => key,
            None => {
                error!("{} is not configured", API_KEY_ENV);
                return Err(EstimateError::NotConfigured);
            }
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| EstimateError::PredictionFailed {
                status: None,
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EstimateError::PredictionFailed {
                status: Some(status.as_u16()),
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            warn!("AI gateway error: {} {}", status, body);
            return Err(classify_failure(status, &body));
        }

        info!("AI response received");
        let content = reply_content(&body)?;
        debug!("AI content: {}", content);
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
