use serde::{Deserialize, Serialize};

use crate::message::{Message, MessageStatus};

/// A single cached conversation: the message timeline plus the pagination
/// cursor and revision marker from the last history fetch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Chat {
    pub id: String,
    /// Message timeline, newest first.
    pub messages: Vec<Message>,
    pub last_cursor: Option<String>,
    pub last_rev: Option<String>,
}

impl Chat {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            last_cursor: None,
            last_rev: None,
        }
    }

    /// Get a message by ID
    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn contains_message(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Prepend a message to the timeline.
    ///
    /// This method internally checks for and avoids duplicate messages.
    pub fn prepend_message(&mut self, message: Message) -> bool {
        // Make sure we don't add the same message twice
        if self.contains_message(&message.id) {
            // Message is already known by the state
            return false;
        }
        self.messages.insert(0, message);
        true
    }

    /// Append fetched history below any locally present entries, skipping
    /// ids already in the timeline.
    pub fn append_history(&mut self, messages: impl IntoIterator<Item = Message>) {
        for message in messages {
            if !self.contains_message(&message.id) {
                self.messages.push(message);
            }
        }
    }

    /// Swap the pending entry under `temp_id` to its server-confirmed form,
    /// keeping its position in the timeline.
    ///
    /// If the confirmed id is already present (the log delivered it before
    /// the send resolved), the leftover pending entry is dropped instead, so
    /// exactly one entry per logical send survives either completion order.
    /// A no-op when the pending entry is already gone.
    pub fn confirm_message(&mut self, temp_id: &str, confirmed: &Message) -> bool {
        if self.contains_message(&confirmed.id) {
            return self.retract_message(temp_id);
        }
        match self.messages.iter_mut().find(|m| m.id == temp_id) {
            Some(slot) => {
                *slot = confirmed.clone();
                slot.status = MessageStatus::Confirmed;
                true
            }
            None => false,
        }
    }

    /// Remove the entry under `id`, if present.
    pub fn retract_message(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }
}
