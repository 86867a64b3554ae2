//! Message model and the optimistic send path.

mod sending;
mod types;

pub use sending::send_message;
pub use types::{create_temp_id, Message, MessageStatus, Sender};
