//! Navigation orchestration
//!
//! The entry point for citation clicks and deep-link loads. One request
//! runs address-update → locate → reveal strictly in order; the fragment
//! is set optimistically before the element is confirmed to exist, and it
//! stays set on timeout so a later retry or manual scroll still lands on
//! the right anchor.
//!
//! Concurrent requests are independent: two quick clicks race their
//! locators and whichever resolves first reveals first. Callers that need
//! most-recent-wins must serialize requests themselves.

use super::address::{message_fragment, parse_message_fragment, AddressBar};
use super::locator::{ElementLocator, LocateError};
use super::reveal::{reveal, RevealOptions};
use crate::config::NavConfig;
use crate::evidence::{element_id_for, MessageUuid};
use crate::view::{RevealPosition, ViewTree};
use std::sync::Arc;
use std::time::Duration;

/// Terminal state of one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Element located and revealed
    Done,
    /// Element did not appear within the budget; the fragment stays set
    TimedOut,
}

/// Options for one navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigateOptions {
    /// Mirror the target into the address-bar fragment
    pub update_url: bool,
    /// Overall budget for this request
    pub timeout: Duration,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            update_url: true,
            timeout: NavConfig::default().navigate_timeout(),
        }
    }
}

impl NavigateOptions {
    pub fn with_update_url(mut self, update_url: bool) -> Self {
        self.update_url = update_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Drives citation clicks and deep links to a revealed message element.
pub struct Navigator {
    tree: Arc<dyn ViewTree>,
    address: Arc<dyn AddressBar>,
    locator: ElementLocator,
    config: NavConfig,
}

impl Navigator {
    pub fn new(tree: Arc<dyn ViewTree>, address: Arc<dyn AddressBar>) -> Self {
        Self::with_config(tree, address, NavConfig::default())
    }

    pub fn with_config(
        tree: Arc<dyn ViewTree>,
        address: Arc<dyn AddressBar>,
        config: NavConfig,
    ) -> Self {
        let locator = ElementLocator::new(Arc::clone(&tree)).with_backoff(config.backoff());
        Self {
            tree,
            address,
            locator,
            config,
        }
    }

    /// Navigate to a message: optimistic fragment update, locate, reveal.
    pub async fn navigate_to_message(
        &self,
        target: &MessageUuid,
        options: &NavigateOptions,
    ) -> NavigationOutcome {
        if options.update_url {
            self.address
                .replace_fragment(Some(message_fragment(target)));
        }

        let element_id = element_id_for(target);
        tracing::debug!(%target, timeout_ms = options.timeout.as_millis() as u64, "locating message element");
        match self.locator.locate(&element_id, options.timeout).await {
            Ok(element) => {
                let reveal_options = RevealOptions::default()
                    .with_position(RevealPosition::Start)
                    .with_highlight(self.config.highlight());
                reveal(self.tree.as_ref(), element.as_ref(), &reveal_options).await;
                tracing::debug!(%target, "navigation complete");
                NavigationOutcome::Done
            }
            Err(LocateError::Timeout { waited_ms, .. }) => {
                tracing::warn!(%target, waited_ms, "navigation timed out");
                NavigationOutcome::TimedOut
            }
        }
    }

    /// Page-load entry point: if the address bar carries a message
    /// fragment, fire exactly one navigation for it without rewriting the
    /// (already correct) fragment. Call once the conversation's messages
    /// have loaded.
    pub async fn handle_initial_fragment(&self) -> Option<NavigationOutcome> {
        let fragment = self.address.fragment()?;
        let target = parse_message_fragment(&fragment)?;
        let options = NavigateOptions::default()
            .with_update_url(false)
            .with_timeout(self.config.navigate_timeout());
        Some(self.navigate_to_message(&target, &options).await)
    }

    /// Clear the fragment. Mandatory when leaving a conversation, before
    /// the next conversation's messages render — a stale fragment must
    /// never be matched against the new conversation's elements.
    pub fn clear_fragment(&self) {
        self.address.replace_fragment(None);
    }
}
