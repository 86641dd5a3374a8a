use omnichat_common::SessionId;
use serde::{Deserialize, Serialize};

use crate::{Message, Role};

/// Title given to a session until its first user message arrives.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Characters of the first user message kept in an automatic title.
pub const TITLE_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub model: String,
    pub messages: Vec<Message>,
    /// Unix time in milliseconds.
    pub created_at: i64,
    pub updated_at: i64,
}

impl ChatSession {
    pub(crate) fn new(model: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: SessionId::new(),
            title: DEFAULT_TITLE.to_string(),
            model: model.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the transcript, deriving a title from the first user message
    /// while the session still has the default one.
    pub(crate) fn replace_messages(&mut self, messages: Vec<Message>) {
        if self.title == DEFAULT_TITLE {
            if let Some(first) = messages.iter().find(|m| m.role == Role::User) {
                self.title = auto_title(&first.content);
            }
        }
        self.messages = messages;
        self.updated_at = now_millis();
    }
}

fn auto_title(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
