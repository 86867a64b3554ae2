//! Message synchronization core for the Convoy chat client.
//!
//! This crate contains:
//! - `state`: the in-memory conversation cache and its injectable handle
//! - `message`: the message model and the optimistic send path
//! - `services`: the chat log poller keeping conversations consistent
//! - `net`: the HTTP client for the messaging service
//! - `client`: the facade tying one signed-in session together
//!
//! The UI, session management, and transport retry policy live outside this
//! crate: a UI renders from the cache and subscribes to its events, and a
//! session supplies the identity credential carried on every request.

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod net;
pub mod services;
pub mod state;

pub use chat::Chat;
pub use client::ChatClient;
pub use config::Config;
pub use error::{Result, SyncError};
pub use message::{create_temp_id, send_message, Message, MessageStatus, Sender};
pub use net::ApiClient;
pub use services::LogPoller;
pub use state::{ChatState, SharedState, StateEvent};
