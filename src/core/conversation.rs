use crate::api::Content;
use crate::core::message::{Message, Role};

/// Append-only conversation store. Messages only ever accumulate: there is
/// no removal, edit, or reorder operation, and display order is insertion
/// order.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(Message::bot(text));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The full running history as Gemini wire contents. Every send carries
    /// this rather than relying on server-side session memory, so the model
    /// always sees the conversation as it currently stands.
    pub fn api_history(&self) -> Vec<Content> {
        self.messages
            .iter()
            .map(|msg| Content {
                role: msg.role.as_api_role().to_string(),
                parts: vec![crate::api::Part {
                    text: msg.text.clone(),
                }],
            })
            .collect()
    }
}
