//! Conversation service
//!
//! Owns MessageView lifecycle and the per-message citation state. The
//! service is an explicit dependency — renderers and navigators receive
//! it, they never reach into ambient global state. Registries are
//! rebuilt, not mutated: a reader either sees the previous complete entry
//! or the next complete entry, never a partial build.

use crate::citation::{
    resolve_fragment, scannable_text, split_fragments, CitationRegistry, Fragment, FragmentKind,
    RenderedSegment,
};
use crate::evidence::{GroupedEvidence, MessageUuid, MessageView};
use crate::nav::AddressBar;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in conversation service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("message not found: {0}")]
    MessageNotFound(MessageUuid),
}

/// Fully-built citation state for one message. Immutable once published.
#[derive(Debug, Clone)]
pub struct MessageEntry {
    pub view: MessageView,
    pub grouped: GroupedEvidence,
    pub fragments: Vec<Fragment>,
    pub registry: CitationRegistry,
}

impl MessageEntry {
    fn build(view: MessageView) -> Self {
        let grouped = GroupedEvidence::classify(&view.sources);
        let fragments = split_fragments(&view.content);
        let registry = CitationRegistry::build(&scannable_text(&fragments), &grouped);
        Self {
            view,
            grouped,
            fragments,
            registry,
        }
    }
}

/// One rendered fragment of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFragment {
    pub kind: FragmentKind,
    pub segments: Vec<RenderedSegment>,
}

/// Owns messages and their citation registries for the open conversation.
#[derive(Default)]
pub struct ConversationService {
    messages: DashMap<MessageUuid, Arc<MessageEntry>>,
    address: Option<Arc<dyn AddressBar>>,
}

impl ConversationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the address bar so conversation switches can clear a stale
    /// deep-link fragment.
    pub fn with_address_bar(mut self, address: Arc<dyn AddressBar>) -> Self {
        self.address = Some(address);
        self
    }

    /// Insert or replace a message, building its citation state.
    ///
    /// Build-then-publish: the entry is fully constructed before the map
    /// is touched.
    pub fn upsert_message(&self, view: MessageView) -> Arc<MessageEntry> {
        let entry = Arc::new(MessageEntry::build(view));
        self.messages.insert(entry.view.uuid, Arc::clone(&entry));
        entry
    }

    /// Append streamed content to a message and rebuild its citation
    /// state. Earlier-assigned citation numbers are preserved; keys first
    /// cited in the appended text take the next numbers.
    pub fn append_content(
        &self,
        uuid: &MessageUuid,
        chunk: &str,
    ) -> Result<Arc<MessageEntry>, ServiceError> {
        let current = self
            .messages
            .get(uuid)
            .map(|entry| Arc::clone(&entry))
            .ok_or(ServiceError::MessageNotFound(*uuid))?;

        let mut view = current.view.clone();
        view.content.push_str(chunk);
        let entry = Arc::new(MessageEntry::build(view));
        self.messages.insert(*uuid, Arc::clone(&entry));
        tracing::debug!(%uuid, keys = entry.registry.len(), "registry rebuilt after append");
        Ok(entry)
    }

    pub fn message(&self, uuid: &MessageUuid) -> Option<Arc<MessageEntry>> {
        self.messages.get(uuid).map(|entry| Arc::clone(&entry))
    }

    pub fn remove_message(&self, uuid: &MessageUuid) -> Option<Arc<MessageEntry>> {
        self.messages.remove(uuid).map(|(_, entry)| entry)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Render every fragment of a message through its shared registry.
    /// Code fragments pass through as literal text, unscanned.
    pub fn render_message(
        &self,
        uuid: &MessageUuid,
    ) -> Result<Vec<RenderedFragment>, ServiceError> {
        let entry = self
            .message(uuid)
            .ok_or(ServiceError::MessageNotFound(*uuid))?;

        Ok(entry
            .fragments
            .iter()
            .map(|fragment| match fragment.kind {
                FragmentKind::Prose => RenderedFragment {
                    kind: FragmentKind::Prose,
                    segments: resolve_fragment(
                        &fragment.text,
                        &entry.registry,
                        &entry.grouped,
                    ),
                },
                FragmentKind::Code => RenderedFragment {
                    kind: FragmentKind::Code,
                    segments: vec![RenderedSegment::Text(fragment.text.clone())],
                },
            })
            .collect())
    }

    /// Leave the current conversation: drop all messages and clear any
    /// deep-link fragment before the next conversation's messages render.
    pub fn switch_conversation(&self) {
        self.messages.clear();
        if let Some(address) = &self.address {
            address.replace_fragment(None);
            tracing::debug!("cleared deep-link fragment on conversation switch");
        }
    }
}
