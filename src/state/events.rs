//! State-change events broadcast to UI subscribers.

use serde::Serialize;

use crate::message::Message;

/// Emitted by the cache handle whenever a mutation changes what a UI should
/// render. Delivery is lossy: a subscriber that lags simply misses events
/// and re-reads the cache, which stays the source of truth.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// A message appeared in a conversation (optimistic insert or log
    /// delivery).
    MessageNew { chat_id: String, message: Message },
    /// The message previously rendered under `old_id` must now render as
    /// `message`: the reconciliation point of an optimistic send.
    MessageUpdate {
        chat_id: String,
        old_id: String,
        message: Message,
    },
    /// A pending message was retracted after its send failed.
    MessageRetracted { chat_id: String, message_id: String },
    /// The conversation list may be stale; listing views should refetch.
    ChatsStale,
}
