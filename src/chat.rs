use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::config::DecodingParams;
use crate::gateway::{ChatModel, ChatRequest, GatewayError, WireTurn};
use crate::session::{ConversationTurn, SessionStore};

// Sent as the service preamble on every call, never stored as history.
pub const PERSONA_PREAMBLE: &str ="You are a Personal AI Travel Assistant. \
You help travelers with trip planning, packing lists, safety and visa tips, \
budgeting, and day-by-day itineraries. If a request is not about travel, \
politely decline and steer the conversation back to trip planning.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Clone)]
pub struct ChatOrchestrator {
    model: Arc<dyn ChatModel>,
    store: SessionStore,
    params: DecodingParams,
}

impl ChatOrchestrator {
    pub fn new(model: Arc<dyn ChatModel>, store: SessionStore, params: DecodingParams) -> Self {
        Self { model, store, params }
    }

    // On a gateway failure the user turn stays recorded; no rollback.
    pub async fn respond(&self, session_id: &str, message: &str) -> Result<String, ChatError> {
        if session_id.trim().is_empty() {
            return Err(ChatError::InvalidInput("sessionId must not be empty"));
        }
        if message.trim().is_empty() {
            return Err(ChatError::InvalidInput("message must not be empty"));
        }

        let history = self
            .store
            .append(session_id, ConversationTurn::user(message))
            .await;
        // The turn just appended is always last; everything before it is the
        // prior context the service expects in chat_history.
        let prior: Vec<WireTurn> = history[..history.len() - 1].iter().map(WireTurn::from).collect();

        let request = ChatRequest {
            message: message.to_owned(),
            history: prior,
            preamble: Some(PERSONA_PREAMBLE.to_owned()),
            params: self.params,
        };
        let reply = match self.model.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session_id, error = %e, "chatbot completion failed");
                return Err(ChatError::Gateway(e));
            }
        };

        self.store
            .append(session_id, ConversationTurn::assistant(reply.clone()))
            .await;
        Ok(reply)
    }

    // One-shot variant for the sessionless widget: same preamble and decoding
    // params, empty history, nothing recorded.
    pub async fn respond_once(&self, message: &str) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::InvalidInput("message must not be empty"));
        }

        let request = ChatRequest {
            message: message.to_owned(),
            history: Vec::new(),
            preamble: Some(PERSONA_PREAMBLE.to_owned()),
            params: self.params,
        };
        match self.model.complete(request).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                warn!(error = %e, "one-shot chat completion failed");
                Err(ChatError::Gateway(e))
            }
        }
    }
}
