//! Conversation state management.
//!
//! This module contains:
//! - `chat_state`: the ChatState store mapping chat ids to conversations
//! - `handle`: SharedState, the injectable handle every component goes through
//! - `events`: the StateEvent notifications broadcast on mutation

mod chat_state;
mod events;
mod handle;

pub use chat_state::ChatState;
pub use events::StateEvent;
pub use handle::SharedState;
