//! The top-level client facade for one signed-in messaging session.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::chat::Chat;
use crate::config::Config;
use crate::error::Result;
use crate::message::{self, create_temp_id, Message};
use crate::net::{ApiClient, ChatView, ConvosResponse};
use crate::services::LogPoller;
use crate::state::SharedState;

/// One signed-in messaging session: the conversation cache, the service
/// client, and the poll schedule that keeps them consistent.
pub struct ChatClient {
    api: Arc<ApiClient>,
    state: SharedState,
    poll_interval: Duration,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            api: Arc::new(ApiClient::from_config(config)?),
            state: SharedState::new(),
            poll_interval: config.poll_interval(),
        })
    }

    /// The injectable cache handle; clone it into anything that renders or
    /// mutates conversation state.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Conversation state for `chat_id`, hydrating the cache on first open.
    ///
    /// A cached conversation is returned as-is without touching the network.
    /// Otherwise the message history and conversation metadata are fetched
    /// and seeded into the cache. Entries created by a send into a
    /// never-opened conversation carry no revision marker yet; those are
    /// hydrated too, with fetched history merged below the local entries.
    pub async fn open_chat(&self, chat_id: &str) -> Result<Chat> {
        if let Some(chat) = self.state.get(chat_id).await {
            if chat.last_rev.is_some() {
                return Ok(chat);
            }
        }

        debug!("hydrating chat {}", chat_id);
        let history = self.api.get_messages(chat_id).await?;
        let meta = self.api.get_chat(chat_id).await?;

        let chat = self
            .state
            .update_or_insert(chat_id, |chat| {
                chat.append_history(history.messages);
                chat.last_cursor = history.cursor;
                chat.last_rev = Some(meta.chat.rev);
                chat.clone()
            })
            .await;
        Ok(chat)
    }

    /// Send a message, generating the pending id on the caller's behalf.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Message> {
        message::send_message(&self.state, &self.api, chat_id, text, &create_temp_id()).await
    }

    /// Resolve the conversation shared with `members` and seed its cache
    /// entry (no messages yet) with the server revision.
    pub async fn chat_for_members(&self, members: &[String]) -> Result<ChatView> {
        let resp = self.api.get_chat_for_members(members).await?;
        let mut chat = Chat::new(resp.chat.id.clone());
        chat.last_rev = Some(resp.chat.rev.clone());
        self.state.set(chat).await;
        Ok(resp.chat)
    }

    /// One page of the caller's conversation listing. Pagination state stays
    /// with the caller; nothing is written to the cache (message data only
    /// enters it through the open, send, and log paths).
    pub async fn list_convos(&self, cursor: Option<&str>) -> Result<ConvosResponse> {
        self.api.list_convos(cursor).await
    }

    /// Start the log polling schedule. The poller is returned alongside the
    /// task handle so callers can observe its cursor; abort the handle to
    /// stop polling.
    pub fn spawn_log_poller(&self) -> (Arc<LogPoller>, JoinHandle<()>) {
        let poller = Arc::new(LogPoller::new(
            self.state.clone(),
            Arc::clone(&self.api),
            self.poll_interval,
        ));
        let handle = Arc::clone(&poller).spawn();
        (poller, handle)
    }
}
