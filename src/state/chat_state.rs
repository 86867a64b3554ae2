//! ChatState struct and methods for the conversation cache.
//!
//! This is the single owning store for all conversation data. Everything
//! else (the send path, the log poller, UI-facing reads) goes through the
//! `SharedState` handle in this module's sibling.

use std::collections::HashMap;

use crate::chat::Chat;

/// Every conversation the client has seen this session, keyed by chat id.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub(crate) chats: HashMap<String, Chat>,
}

impl ChatState {
    /// Create a new empty ChatState
    pub fn new() -> Self {
        Self {
            chats: HashMap::new(),
        }
    }

    /// Get a chat by ID
    pub fn get_chat(&self, id: &str) -> Option<&Chat> {
        self.chats.get(id)
    }

    /// Get a mutable chat by ID
    pub fn get_chat_mut(&mut self, id: &str) -> Option<&mut Chat> {
        self.chats.get_mut(id)
    }

    /// Replace (or insert) a conversation wholesale.
    pub fn set_chat(&mut self, chat: Chat) {
        self.chats.insert(chat.id.clone(), chat);
    }

    /// Get a mutable chat by ID, creating an empty entry when it is unknown.
    pub fn ensure_chat(&mut self, id: &str) -> &mut Chat {
        self.chats
            .entry(id.to_string())
            .or_insert_with(|| Chat::new(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.chats.contains_key(id)
    }

    pub fn chat_ids(&self) -> Vec<String> {
        self.chats.keys().cloned().collect()
    }
}
