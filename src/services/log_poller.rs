//! Chat log polling.
//!
//! Keeps every cached conversation eventually consistent with the server's
//! event log: fetch entries since the last-seen cursor, apply message
//! creations with dedup-by-id, advance the cursor. A poll in flight
//! suppresses the next tick, and a failed poll retries from the same cursor
//! on the following interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;
use crate::net::{ApiClient, LogEntry};
use crate::state::{SharedState, StateEvent};

pub struct LogPoller {
    state: SharedState,
    api: Arc<ApiClient>,
    interval: Duration,
    /// Last consumed log position. The mutex doubles as the reentrancy
    /// guard: whoever holds it is the poll in flight.
    cursor: Mutex<Option<String>>,
}

impl LogPoller {
    pub fn new(state: SharedState, api: Arc<ApiClient>, interval: Duration) -> Self {
        Self {
            state,
            api,
            interval,
            cursor: Mutex::new(None),
        }
    }

    /// Last consumed log position. `None` until the first successful poll.
    pub async fn cursor(&self) -> Option<String> {
        self.cursor.lock().await.clone()
    }

    /// One poll tick.
    ///
    /// Returns immediately when a previous tick is still in flight, and
    /// swallows request failures so the schedule survives them; the cursor
    /// is only advanced by a successful fetch.
    pub async fn poll(&self) {
        let Ok(mut cursor) = self.cursor.try_lock() else {
            // A poll is already in flight; this tick is redundant
            return;
        };
        match self.fetch_and_apply(cursor.as_deref()).await {
            Ok(next) => *cursor = Some(next),
            // Cursor stays put; the next tick retries from the same position
            Err(e) => warn!("chat log poll failed: {}", e),
        }
    }

    async fn fetch_and_apply(&self, cursor: Option<&str>) -> Result<String> {
        let log = self.api.get_log(cursor).await?;

        if !log.logs.is_empty() {
            // New activity may involve conversations we have never cached;
            // listing views refresh on this signal
            self.state.emit(StateEvent::ChatsStale);
        }

        for entry in log.logs {
            let LogEntry::CreateMessage { chat_id, message } = entry else {
                continue;
            };
            let incoming = message.clone();
            match self
                .state
                .update(&chat_id, |chat| chat.prepend_message(incoming))
                .await
            {
                Some(true) => {
                    self.state.emit(StateEvent::MessageNew { chat_id, message });
                }
                // Already present: a redelivery, or the send path confirmed it
                Some(false) => {}
                // Conversation never opened locally; it is fetched fresh on
                // first open, so the entry is dropped
                None => debug!("dropping log entry for uncached chat {}", chat_id),
            }
        }

        // Advance past dropped entries too; delivery is at-least-once and the
        // cursor must not stall on per-conversation cache presence
        Ok(log.cursor)
    }

    /// Run the polling schedule until the returned task is aborted. The
    /// first poll fires immediately, then every `interval`.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.poll().await;
            }
        })
    }
}
