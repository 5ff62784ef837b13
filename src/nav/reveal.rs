//! Scroll-and-highlight reveal
//!
//! Once located, an element is scrolled to its requested viewport
//! position and flashed with a transient background highlight. The prior
//! background is restored exactly when the highlight ends — `None` stays
//! `None` — so repeated reveals leave no residue.

use crate::config::DEFAULT_HIGHLIGHT_MS;
use crate::view::{RevealPosition, ViewElement, ViewTree};
use std::time::Duration;

/// Background applied while an element is highlighted.
pub const HIGHLIGHT_BACKGROUND: &str = "rgba(255, 213, 79, 0.35)";

/// Options for one reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub position: RevealPosition,
    /// Total highlight duration, fade included
    pub highlight: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            position: RevealPosition::Start,
            highlight: Duration::from_millis(DEFAULT_HIGHLIGHT_MS),
        }
    }
}

impl RevealOptions {
    pub fn with_position(mut self, position: RevealPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_highlight(mut self, highlight: Duration) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Scroll the element into position, then highlight it for the configured
/// duration and restore its prior visual state.
pub async fn reveal(tree: &dyn ViewTree, element: &dyn ViewElement, options: &RevealOptions) {
    tree.scroll_to(&element.element_id(), options.position).await;

    let prior = element.background();
    element.set_background(Some(HIGHLIGHT_BACKGROUND.to_string()));
    tokio::time::sleep(options.highlight).await;
    element.set_background(prior);
}
