//! Message sending.
//!
//! The optimistic send path: the message appears in the cache before the
//! request leaves the process, then reconciles to the server-confirmed
//! record on success or is retracted on failure.

use tracing::debug;

use crate::error::Result;
use crate::message::Message;
use crate::net::ApiClient;
use crate::state::{SharedState, StateEvent};

/// Send `text` to `chat_id`, keeping the UI responsive before confirmation.
///
/// `temp_id` is caller-generated and unique per pending send (see
/// [`crate::message::create_temp_id`]); it locates the pending entry for
/// reconciliation, so it must not collide with server-issued id formats.
///
/// The pending message is inserted under `temp_id` before any network
/// activity. On success the entry takes the server-issued id in place; on
/// failure it is retracted and the error is returned for the caller (no
/// automatic retry).
pub async fn send_message(
    state: &SharedState,
    api: &ApiClient,
    chat_id: &str,
    text: &str,
    temp_id: &str,
) -> Result<Message> {
    // Show the message immediately. A send into a conversation the cache has
    // never seen creates its entry on the spot rather than dropping the text.
    let pending = Message::pending(temp_id, text, api.did());
    let shown = pending.clone();
    let inserted = state
        .update_or_insert(chat_id, |chat| chat.prepend_message(pending))
        .await;
    if inserted {
        state.emit(StateEvent::MessageNew {
            chat_id: chat_id.to_string(),
            message: shown,
        });
    }

    match api.send_message(chat_id, text).await {
        Ok(confirmed) => {
            // Replace-by-temp-id: a no-op if the entry is already gone, a
            // collapse if the log delivered the confirmed copy first
            let changed = state
                .update(chat_id, |chat| chat.confirm_message(temp_id, &confirmed))
                .await
                .unwrap_or(false);
            if changed {
                state.emit(StateEvent::MessageUpdate {
                    chat_id: chat_id.to_string(),
                    old_id: temp_id.to_string(),
                    message: confirmed.clone(),
                });
            }
            Ok(confirmed)
        }
        Err(e) => {
            debug!("send to {} failed, retracting {}: {}", chat_id, temp_id, e);
            let removed = state
                .update(chat_id, |chat| chat.retract_message(temp_id))
                .await
                .unwrap_or(false);
            if removed {
                state.emit(StateEvent::MessageRetracted {
                    chat_id: chat_id.to_string(),
                    message_id: temp_id.to_string(),
                });
            }
            Err(e)
        }
    }
}
