//! Message views and the element addressing contract

use super::record::EvidenceRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable addressing key for a message.
///
/// Deep links and rendered element ids are derived from this value, never
/// from a transient render identifier, so a link stays valid across
/// re-renders and virtualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageUuid(Uuid);

impl MessageUuid {
    /// Create a new random MessageUuid
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for MessageUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The externally-queryable element id for a message: `message-<uuid>`.
///
/// This is the only contract the element locator depends on.
pub fn element_id_for(uuid: &MessageUuid) -> String {
    format!("message-{}", uuid)
}

/// One assistant message as the renderer sees it.
///
/// Created when a message finishes arriving (or starts streaming) and
/// destroyed only when the message is removed from the conversation. The
/// evidence list is owned by the message and immutable once attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    /// Stable addressing key used for deep links
    pub uuid: MessageUuid,
    /// Full message text (all fragments, markdown)
    pub content: String,
    /// Evidence records cited by this message
    pub sources: Vec<EvidenceRecord>,
    /// When the message arrived
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl MessageView {
    pub fn new(content: impl Into<String>, sources: Vec<EvidenceRecord>) -> Self {
        Self {
            uuid: MessageUuid::new(),
            content: content.into(),
            sources,
            received_at: chrono::Utc::now(),
        }
    }

    pub fn with_uuid(mut self, uuid: MessageUuid) -> Self {
        self.uuid = uuid;
        self
    }

    /// The rendered element id this message must expose.
    pub fn element_id(&self) -> String {
        element_id_for(&self.uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_id_uses_stable_uuid() {
        let view = MessageView::new("hello", Vec::new());
        assert_eq!(view.element_id(), format!("message-{}", view.uuid));
    }

    #[test]
    fn uuid_parse_round_trip() {
        let uuid = MessageUuid::new();
        let parsed = MessageUuid::parse(&uuid.to_string()).unwrap();
        assert_eq!(parsed, uuid);
    }

    #[test]
    fn uuid_parse_rejects_garbage() {
        assert!(MessageUuid::parse("not-a-uuid").is_none());
    }
}
