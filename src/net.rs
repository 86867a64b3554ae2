//! HTTP client for the Convoy messaging service.
//!
//! Thin request/response wrappers over the service's XRPC-style endpoints.
//! Retry and backoff are the transport's concern; callers observe each
//! request's outcome exactly once. Every request carries the signed-in
//! identity credential in the `Authorization` header.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::message::{Message, Sender};

/// Server view of a conversation: its id and current revision marker.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub id: String,
    pub rev: String,
}

#[derive(Deserialize, Debug)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
    pub cursor: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub chat: ChatView,
}

/// One entry of the global event log. Only message creation is acted on by
/// this core; kinds the client does not know deserialize to `Other` and are
/// skipped, so new server-side event kinds never break polling.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LogEntry {
    #[serde(rename_all = "camelCase")]
    CreateMessage { chat_id: String, message: Message },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug)]
pub struct LogResponse {
    pub logs: Vec<LogEntry>,
    pub cursor: String,
}

/// One conversation row of the listing endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct ConvoView {
    pub id: String,
    pub rev: String,
    #[serde(default)]
    pub members: Vec<Sender>,
}

#[derive(Deserialize, Debug)]
pub struct ConvosResponse {
    pub convos: Vec<ConvoView>,
    pub cursor: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    message: MessageInput<'a>,
}

#[derive(Serialize)]
struct MessageInput<'a> {
    text: &'a str,
}

pub struct ApiClient {
    http: HttpClient,
    service_url: Url,
    did: String,
}

impl ApiClient {
    pub fn new(service_url: Url, did: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            service_url,
            did: did.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.service_url()?, config.did.clone()))
    }

    /// Identity credential of the signed-in account. Doubles as the sender
    /// identity of locally-originated messages.
    pub fn did(&self) -> &str {
        &self.did
    }

    fn endpoint(&self, method: &str) -> String {
        let base = self.service_url.as_str().trim_end_matches('/');
        format!("{}/xrpc/{}", base, method)
    }

    fn ok(endpoint: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
        if !resp.status().is_success() {
            return Err(SyncError::Status {
                endpoint: endpoint.to_string(),
                status: resp.status(),
            });
        }
        Ok(resp)
    }

    /// Fetch the newest page of a conversation's message history.
    pub async fn get_messages(&self, chat_id: &str) -> Result<MessagesResponse> {
        let endpoint = self.endpoint("dm.getMessages");
        let resp = self
            .http
            .get(&endpoint)
            .header("Authorization", &self.did)
            .query(&[("chatId", chat_id)])
            .send()
            .await?;
        Ok(Self::ok(&endpoint, resp)?.json().await?)
    }

    /// Fetch a conversation's metadata (id and revision marker).
    pub async fn get_chat(&self, chat_id: &str) -> Result<ChatResponse> {
        let endpoint = self.endpoint("dm.getChat");
        let resp = self
            .http
            .get(&endpoint)
            .header("Authorization", &self.did)
            .query(&[("chatId", chat_id)])
            .send()
            .await?;
        Ok(Self::ok(&endpoint, resp)?.json().await?)
    }

    /// Submit a message; the response is the server-confirmed record with
    /// its final id.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Message> {
        let endpoint = self.endpoint("dm.sendMessage");
        let resp = self
            .http
            .post(&endpoint)
            .header("Authorization", &self.did)
            .json(&SendMessageRequest {
                chat_id,
                message: MessageInput { text },
            })
            .send()
            .await?;
        Ok(Self::ok(&endpoint, resp)?.json().await?)
    }

    /// Fetch event log entries after `cursor`; an absent cursor reads from
    /// the beginning of retained history.
    pub async fn get_log(&self, cursor: Option<&str>) -> Result<LogResponse> {
        let endpoint = self.endpoint("dm.getLog");
        let mut req = self.http.get(&endpoint).header("Authorization", &self.did);
        if let Some(cursor) = cursor {
            req = req.query(&[("cursor", cursor)]);
        }
        let resp = req.send().await?;
        Ok(Self::ok(&endpoint, resp)?.json().await?)
    }

    /// Resolve the conversation shared by exactly this member set.
    pub async fn get_chat_for_members(&self, members: &[String]) -> Result<ChatResponse> {
        let endpoint = self.endpoint("dm.getChatForMembers");
        let resp = self
            .http
            .get(&endpoint)
            .header("Authorization", &self.did)
            .query(&[("members", members.join(","))])
            .send()
            .await?;
        Ok(Self::ok(&endpoint, resp)?.json().await?)
    }

    /// One page of the caller's conversation listing.
    pub async fn list_convos(&self, cursor: Option<&str>) -> Result<ConvosResponse> {
        let endpoint = self.endpoint("dm.listConvos");
        let mut req = self.http.get(&endpoint).header("Authorization", &self.did);
        if let Some(cursor) = cursor {
            req = req.query(&[("cursor", cursor)]);
        }
        let resp = req.send().await?;
        Ok(Self::ok(&endpoint, resp)?.json().await?)
    }
}
