use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::locale::{self, ListKey, MessageKey};
use crate::models::{AgentInput, AgentOutput, Language, Message, Role};

/// Number of trailing messages a client sends with each request.
pub const HISTORY_WINDOW: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("message is empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub message: Message,
}

impl ConversationEntry {
    fn new(message: Message) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            message,
        }
    }
}

/// Client-side view of one chat: the visible history plus the language the
/// UI is currently rendered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    language: Language,
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: vec![ConversationEntry::new(Message::assistant(locale::text(
                MessageKey::InitialGreeting,
                language,
            )))],
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn starter_suggestions(&self) -> &'static [&'static str] {
        locale::items(ListKey::Starters, self.language)
    }

    /// Appends a user turn and returns the request to send for it.
    pub fn push_user(&mut self, text: &str) -> Result<AgentInput, ConversationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }
        self.entries.push(ConversationEntry::new(Message::user(text)));
        Ok(self.request())
    }

    pub fn request(&self) -> AgentInput {
        let start = self.entries.len().saturating_sub(HISTORY_WINDOW);
        AgentInput::new(
            Some(self.language),
            self.entries[start..]
                .iter()
                .map(|entry| entry.message.clone())
                .collect(),
        )
    }

    pub fn apply_reply(&mut self, output: &AgentOutput) {
        if output.language != self.language {
            self.language = output.language;
        }
        self.entries.push(ConversationEntry::new(Message::assistant(
            output.reply.clone(),
        )));
    }

    /// Records the localized apology shown when a request could not be
    /// completed. Nothing is retried.
    pub fn apply_failure(&mut self) -> &str {
        self.entries.push(ConversationEntry::new(Message::assistant(
            locale::text(MessageKey::Apology, self.language),
        )));
        self.entries
            .last()
            .map(|entry| entry.message.content.as_str())
            .unwrap_or_default()
    }

    pub fn user_turns(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.message.role == Role::User)
            .count()
    }
}
