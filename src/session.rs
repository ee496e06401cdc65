use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

// Context window per session: 3 user + 3 assistant turns.
pub const MAX_TURNS_PER_SESSION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

// Keyed by opaque client-supplied ids. Sessions are created on first append
// and never destroyed; only turns are evicted, oldest first.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Vec<ConversationTurn>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned().unwrap_or_default()
    }

    // Push, trim from the front, and snapshot under one write-lock hold so
    // concurrent appends to the same session serialize and neither is lost.
    pub async fn append(&self, session_id: &str, turn: ConversationTurn) -> Vec<ConversationTurn> {
        let mut sessions = self.sessions.write().await;
        let turns = sessions.entry(session_id.to_owned()).or_default();
        turns.push(turn);
        if turns.len() > MAX_TURNS_PER_SESSION {
            let excess = turns.len() - MAX_TURNS_PER_SESSION;
            turns.drain(..excess);
        }
        turns.clone()
    }
}
