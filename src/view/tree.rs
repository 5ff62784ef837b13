//! View tree abstraction
//!
//! The locator and reveal controller are portable across rendering
//! targets: they only talk to these traits. A target exposes element
//! lookup by id, viewport geometry, scrolling, and — when the platform
//! supports it — a change-notification stream. Targets without the
//! capability return `None` from `watch` and callers fall back to polling.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Vertical geometry of one rendered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

/// Scrollable viewport state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

/// Requested placement of a revealed element within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPosition {
    /// Element top aligned with the viewport top
    Start,
    /// Element midpoint aligned with the viewport midpoint
    Center,
}

/// A change batch emitted by the view tree when its membership mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    /// Elements entered the tree (streamed in, loaded, scrolled into range)
    ElementsAdded(Vec<String>),
    /// Elements left the tree (removed, virtualized out)
    ElementsRemoved(Vec<String>),
}

/// Subscription to a view tree's change batches.
///
/// Dropping the stream releases the subscription.
pub struct ChangeStream {
    rx: broadcast::Receiver<ViewChange>,
}

impl ChangeStream {
    pub fn new(rx: broadcast::Receiver<ViewChange>) -> Self {
        Self { rx }
    }

    /// Wait for the next change batch.
    ///
    /// A lagged receiver counts as a batch — the caller re-checks the tree
    /// either way. A closed stream suspends forever, degrading the caller
    /// to its polling path.
    pub async fn next_batch(&mut self) -> ViewChange {
        loop {
            match self.rx.recv().await {
                Ok(change) => return change,
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    return ViewChange::ElementsAdded(Vec::new());
                }
                Err(broadcast::error::RecvError::Closed) => {
                    std::future::pending::<()>().await;
                }
            }
        }
    }
}

/// A handle to one element in the rendered view.
pub trait ViewElement: Send + Sync {
    fn element_id(&self) -> String;
    fn bounds(&self) -> ElementBounds;
    fn background(&self) -> Option<String>;
    fn set_background(&self, background: Option<String>);
}

/// A rendering target's scrollable view of a conversation.
#[async_trait]
pub trait ViewTree: Send + Sync {
    /// Look up an element by its stable id. `None` while the element is
    /// not in the tree (streaming, async load, virtualized out).
    fn find(&self, element_id: &str) -> Option<Arc<dyn ViewElement>>;

    /// Subscribe to change batches. `None` when the target has no
    /// change-notification mechanism.
    fn watch(&self) -> Option<ChangeStream>;

    fn viewport(&self) -> Viewport;

    /// Smoothly scroll the element to the requested position. Returns
    /// false if the element is not currently in the tree.
    async fn scroll_to(&self, element_id: &str, position: RevealPosition) -> bool;
}
