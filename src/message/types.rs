//! Message types and data structures.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identity reference for a message author.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub did: String,
}

/// Lifecycle of a message identity: `Pending` under a client-generated temp
/// id until the server confirms the send, `Confirmed` once the server id is
/// known. `Confirmed` is terminal.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageStatus {
    Pending,
    #[default]
    Confirmed,
}

impl MessageStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MessageStatus::Pending)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, MessageStatus::Confirmed)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
    /// Everything the wire delivers is server-confirmed; only locally
    /// fabricated messages start out `Pending`.
    #[serde(default, skip_serializing_if = "MessageStatus::is_confirmed")]
    pub status: MessageStatus,
}

impl Message {
    /// The locally fabricated record shown while a send is in flight.
    pub fn pending(temp_id: &str, text: &str, sender_did: &str) -> Self {
        Self {
            id: temp_id.to_string(),
            text: text.to_string(),
            sender: Sender {
                did: sender_did.to_string(),
            },
            sent_at: Utc::now(),
            status: MessageStatus::Pending,
        }
    }
}

const TEMP_ID_PREFIX: &str = "pending-";
const TEMP_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an id for a pending send. The prefix keeps it out of the
/// server's id space, so the entry can always be located for reconciliation.
pub fn create_temp_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..10)
        .map(|_| TEMP_ID_ALPHABET[rng.gen_range(0..TEMP_ID_ALPHABET.len())] as char)
        .collect();
    format!("{}{}", TEMP_ID_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_ids_are_prefixed_base36() {
        let id = create_temp_id();
        let suffix = id.strip_prefix("pending-").expect("missing prefix");
        assert_eq!(suffix.len(), 10);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn temp_ids_differ_between_calls() {
        assert_ne!(create_temp_id(), create_temp_id());
    }

    #[test]
    fn wire_messages_deserialize_as_confirmed() {
        let msg: Message = serde_json::from_str(
            r#"{
                "id": "3kabc",
                "text": "hi there",
                "sender": {"did": "did:plc:bob"},
                "sentAt": "2026-05-01T12:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(msg.id, "3kabc");
        assert_eq!(msg.sender.did, "did:plc:bob");
        assert!(msg.status.is_confirmed());
    }

    #[test]
    fn pending_messages_carry_the_caller_identity() {
        let msg = Message::pending("pending-abc", "hello", "did:plc:alice");
        assert_eq!(msg.id, "pending-abc");
        assert_eq!(msg.sender.did, "did:plc:alice");
        assert!(msg.status.is_pending());
    }
}
