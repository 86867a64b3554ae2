//! The shared, injectable handle to the conversation cache.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::chat::Chat;

use super::{ChatState, StateEvent};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Cloneable handle to the single owning store of conversation state.
///
/// One handle is constructed per signed-in session (or per test case) and
/// passed explicitly to every component that reads or mutates conversations.
/// Mutations are whole-entry read-modify-write under one async mutex; the
/// closures run without suspending, so each update is atomic with respect to
/// every other access through any clone of the handle.
#[derive(Clone, Debug)]
pub struct SharedState {
    inner: Arc<Mutex<ChatState>>,
    events: broadcast::Sender<StateEvent>,
}

impl SharedState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(ChatState::new())),
            events,
        }
    }

    /// Clone of the cached conversation, if present.
    pub async fn get(&self, chat_id: &str) -> Option<Chat> {
        self.inner.lock().await.get_chat(chat_id).cloned()
    }

    /// Replace (or insert) a conversation wholesale.
    pub async fn set(&self, chat: Chat) {
        self.inner.lock().await.set_chat(chat);
    }

    /// Read-modify-write one conversation. The closure runs under the state
    /// lock and must not block. Returns `None` without running the closure
    /// when the conversation is not cached.
    pub async fn update<R>(&self, chat_id: &str, f: impl FnOnce(&mut Chat) -> R) -> Option<R> {
        let mut state = self.inner.lock().await;
        state.get_chat_mut(chat_id).map(f)
    }

    /// Like [`SharedState::update`], but creates an empty conversation entry
    /// first when the id is unknown.
    pub async fn update_or_insert<R>(&self, chat_id: &str, f: impl FnOnce(&mut Chat) -> R) -> R {
        let mut state = self.inner.lock().await;
        f(state.ensure_chat(chat_id))
    }

    pub async fn contains(&self, chat_id: &str) -> bool {
        self.inner.lock().await.contains(chat_id)
    }

    pub async fn chat_ids(&self) -> Vec<String> {
        self.inner.lock().await.chat_ids()
    }

    /// Subscribe to state-change events. Subscribing is optional; events
    /// emitted with no receiver are dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    /// Best-effort broadcast; never blocks or fails the mutating operation.
    pub(crate) fn emit(&self, event: StateEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[tokio::test]
    async fn updates_are_visible_to_subsequent_gets() {
        let state = SharedState::new();
        state.set(Chat::new("convo-1")).await;

        let inserted = state
            .update("convo-1", |chat| {
                chat.prepend_message(Message::pending("pending-a", "hi", "did:plc:alice"))
            })
            .await;

        assert_eq!(inserted, Some(true));
        assert_eq!(state.get("convo-1").await.unwrap().messages.len(), 1);
    }

    #[tokio::test]
    async fn update_skips_unknown_conversations() {
        let state = SharedState::new();
        let ran = state.update("missing", |_| ()).await;
        assert!(ran.is_none());
        assert!(!state.contains("missing").await);
    }

    #[tokio::test]
    async fn update_or_insert_creates_the_entry() {
        let state = SharedState::new();
        state.update_or_insert("convo-1", |chat| {
            chat.prepend_message(Message::pending("pending-a", "hi", "did:plc:alice"))
        })
        .await;

        assert!(state.contains("convo-1").await);
    }

    #[tokio::test]
    async fn subscribers_see_emitted_events() {
        let state = SharedState::new();
        let mut events = state.subscribe();

        state.emit(StateEvent::ChatsStale);

        assert_eq!(events.recv().await.unwrap(), StateEvent::ChatsStale);
    }

    #[tokio::test]
    async fn emitting_without_subscribers_is_fine() {
        let state = SharedState::new();
        state.emit(StateEvent::ChatsStale);
    }
}
