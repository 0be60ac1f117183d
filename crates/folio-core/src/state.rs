//! UI-agnostic conversation state types
//!
//! These are shared by every host of the chat panel and don't depend on any
//! specific UI framework.

use serde::{Deserialize, Serialize};

use crate::format::{escape_html, format_response};

/// A chat message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub raw_text: String,
    pub rendered_html: String,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatMessage {
    /// User text is only ever escaped, never run through the formatter.
    pub fn user(text: &str) -> Self {
        Self {
            role: ChatRole::User,
            raw_text: text.to_string(),
            rendered_html: escape_html(text),
        }
    }

    /// Assistant text is formatted and never escaped.
    pub fn assistant(text: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            raw_text: text.to_string(),
            rendered_html: format_response(text),
        }
    }
}

/// Whether a conversation turn is currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Sending,
}

/// Append-only message history for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
