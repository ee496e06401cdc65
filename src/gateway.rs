use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::{Config, DecodingParams};
use crate::session::{ConversationTurn, Role};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("chat service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("chat service timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid response from chat service: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireTurn {
    pub role: &'static str,
    pub message: String,
}

impl From<&ConversationTurn> for WireTurn {
    fn from(turn: &ConversationTurn) -> Self {
        let role = match turn.role {
            Role::User => "USER",
            Role::Assistant => "CHATBOT",
        };
        Self { role, message: turn.text.clone() }
    }
}

// Orchestrators fill this in; the gateway owns endpoint, credential, timeout.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<WireTurn>,
    pub preamble: Option<String>,
    pub params: DecodingParams,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, GatewayError>;
}

#[derive(Clone)]
pub struct CohereGateway {
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl CohereGateway {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Network)?;
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: config.timeout,
            http,
        })
    }
}

#[derive(Debug, Serialize)]
struct CohereChatBody<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    chat_history: &'a [WireTurn],
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CohereChatResponse {
    text: Option<String>,
}

#[async_trait]
impl ChatModel for CohereGateway {
    async fn complete(&self, request: ChatRequest) -> Result<String, GatewayError> {
        let url = format!("{}/v1/chat", self.base_url.trim_end_matches('/'));
        let body = CohereChatBody {
            model: &self.model,
            temperature: request.params.temperature,
            max_tokens: request.params.max_tokens,
            chat_history: &request.history,
            message: &request.message,
            preamble: request.preamble.as_deref(),
        };

        let response = match self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(GatewayError::Timeout(self.timeout)),
            Err(e) => return Err(GatewayError::Network(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "chat service returned an error");
            return Err(GatewayError::Api { status: status.as_u16(), body });
        }

        // The client-level timeout can also elapse mid-body; keep that a
        // Timeout, not a decode failure.
        let parsed: CohereChatResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) if e.is_timeout() => return Err(GatewayError::Timeout(self.timeout)),
            Err(e) => return Err(GatewayError::InvalidResponse(e.to_string())),
        };
        match parsed.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GatewayError::InvalidResponse(
                "response contained no text".into(),
            )),
        }
    }
}
