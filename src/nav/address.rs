//! Address-bar fragment synchronization
//!
//! Deep links use the fragment format `#message-<uuid>`. Updates always go
//! through replacement — navigation never pollutes the history stack.

use crate::evidence::MessageUuid;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Mutex;

static MESSAGE_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#message-(.+)$").expect("fragment pattern is valid"));

/// The address-bar fragment for a message: `#message-<uuid>`.
pub fn message_fragment(uuid: &MessageUuid) -> String {
    format!("#message-{}", uuid)
}

/// Parse a fragment back into a message uuid. Fragments that match the
/// shape but carry an unparseable uuid yield `None`.
pub fn parse_message_fragment(fragment: &str) -> Option<MessageUuid> {
    let caps = MESSAGE_FRAGMENT.captures(fragment)?;
    MessageUuid::parse(caps.get(1)?.as_str())
}

/// The navigator's view of the address bar.
///
/// `replace_fragment` must use history replacement, never a push: a
/// navigation is not a page the user can go "back" to.
pub trait AddressBar: Send + Sync {
    fn fragment(&self) -> Option<String>;
    fn replace_fragment(&self, fragment: Option<String>);
}

/// In-memory address bar used by the simulator and tests.
#[derive(Debug, Default)]
pub struct MemoryAddressBar {
    fragment: Mutex<Option<String>>,
}

impl MemoryAddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Mutex::new(Some(fragment.into())),
        }
    }
}

impl AddressBar for MemoryAddressBar {
    fn fragment(&self) -> Option<String> {
        self.fragment.lock().expect("address bar lock").clone()
    }

    fn replace_fragment(&self, fragment: Option<String>) {
        *self.fragment.lock().expect("address bar lock") = fragment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_round_trip() {
        let uuid = MessageUuid::new();
        let fragment = message_fragment(&uuid);
        assert!(fragment.starts_with("#message-"));
        assert_eq!(parse_message_fragment(&fragment), Some(uuid));
    }

    #[test]
    fn parse_rejects_foreign_fragments() {
        assert!(parse_message_fragment("#section-intro").is_none());
        assert!(parse_message_fragment("message-abc").is_none());
        assert!(parse_message_fragment("").is_none());
    }

    #[test]
    fn parse_rejects_malformed_uuid() {
        assert!(parse_message_fragment("#message-not-a-uuid").is_none());
    }

    #[test]
    fn memory_address_bar_replaces_and_clears() {
        let bar = MemoryAddressBar::new();
        assert_eq!(bar.fragment(), None);
        bar.replace_fragment(Some("#message-x".to_string()));
        assert_eq!(bar.fragment(), Some("#message-x".to_string()));
        bar.replace_fragment(None);
        assert_eq!(bar.fragment(), None);
    }
}
