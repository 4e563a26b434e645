//! Feed event types.
//!
//! The wire shapes exchanged with the chat transport: one JSON object per
//! line, inbound events in, replies out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the chat a feed event originated from.
///
/// Carried through opaquely so the transport can route the reply; the tracker
/// itself keeps a single shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Creates a new chat identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inbound feed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A chat message to classify for topic mentions.
    Message {
        /// Originating chat.
        chat: ChatId,
        /// Raw message text.
        text: String,
    },
    /// An explicit "how long has it been" query.
    Status {
        /// Originating chat.
        chat: ChatId,
    },
    /// An explicit confirmed reset of the counter.
    Reset {
        /// Originating chat.
        chat: ChatId,
    },
}

impl InboundEvent {
    /// Returns the originating chat identifier.
    #[must_use]
    pub const fn chat(&self) -> ChatId {
        match self {
            Self::Message { chat, .. } | Self::Status { chat } | Self::Reset { chat } => *chat,
        }
    }

    /// Returns the event kind as a static string, for logging and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Status { .. } => "status",
            Self::Reset { .. } => "reset",
        }
    }
}

/// An outbound reply line addressed to the originating chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    /// Chat the reply should be routed to.
    pub chat: ChatId,
    /// Reply text, one of the fixed templates.
    pub text: String,
}

impl OutboundReply {
    /// Creates a reply addressed to `chat`.
    #[must_use]
    pub fn new(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_event_parses_tagged_json() {
        let event: InboundEvent =
            serde_json::from_str(r#"{"type": "message", "chat": 42, "text": "hi"}"#).unwrap();
        assert_eq!(
            event,
            InboundEvent::Message {
                chat: ChatId::new(42),
                text: "hi".to_string(),
            }
        );
        assert_eq!(event.kind(), "message");
        assert_eq!(event.chat(), ChatId::new(42));
    }

    #[test]
    fn test_command_events_have_no_payload() {
        let status: InboundEvent =
            serde_json::from_str(r#"{"type": "status", "chat": -1001}"#).unwrap();
        assert_eq!(status.kind(), "status");

        let reset: InboundEvent =
            serde_json::from_str(r#"{"type": "reset", "chat": -1001}"#).unwrap();
        assert_eq!(reset.kind(), "reset");
        assert_eq!(reset.chat(), ChatId::new(-1001));
    }

    #[test]
    fn test_reply_serializes_flat() {
        let reply = OutboundReply::new(ChatId::new(-100), "three days");
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"chat":-100,"text":"three days"}"#);
    }
}
