//! Element location with bounded waiting
//!
//! A navigation target may not exist in the view tree yet: it is streamed
//! in, loaded asynchronously, or virtualized out. The locator waits on
//! the tree's change stream, keeps a polling fallback armed with
//! exponential backoff, and gives up at a hard deadline. Retry policy
//! belongs to callers — the locator attempts once.

use crate::config::PollBackoff;
use crate::view::{ViewElement, ViewTree};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while locating an element
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("element '{element_id}' not found within {waited_ms} ms")]
    Timeout { element_id: String, waited_ms: u64 },
}

/// Waits for elements to appear in a view tree.
pub struct ElementLocator {
    tree: Arc<dyn ViewTree>,
    backoff: PollBackoff,
}

impl ElementLocator {
    pub fn new(tree: Arc<dyn ViewTree>) -> Self {
        Self {
            tree,
            backoff: PollBackoff::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: PollBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Resolve an element by id, waiting up to `timeout` for it to mount.
    ///
    /// An element already in the tree resolves without suspension. The
    /// change subscription and the polling timer are both released on
    /// every exit path — success, timeout, and cancellation alike (they
    /// are owned by the awaited future).
    pub async fn locate(
        &self,
        element_id: &str,
        timeout: Duration,
    ) -> Result<Arc<dyn ViewElement>, LocateError> {
        if let Some(element) = self.tree.find(element_id) {
            return Ok(element);
        }

        let started = tokio::time::Instant::now();
        match tokio::time::timeout(timeout, self.wait_for(element_id)).await {
            Ok(element) => Ok(element),
            Err(_) => {
                let waited_ms = started.elapsed().as_millis() as u64;
                tracing::debug!(element_id, waited_ms, "locate timed out");
                Err(LocateError::Timeout {
                    element_id: element_id.to_string(),
                    waited_ms,
                })
            }
        }
    }

    /// Wait until the element mounts, re-checking on change batches and on
    /// the polling schedule. The watcher accelerates discovery; polling
    /// keeps the wait live when no watcher exists or the stream goes
    /// silent.
    async fn wait_for(&self, element_id: &str) -> Arc<dyn ViewElement> {
        let mut watcher = self.tree.watch();
        let mut delay = self.backoff.initial;
        loop {
            match watcher.as_mut() {
                Some(stream) => {
                    tokio::select! {
                        _ = stream.next_batch() => {}
                        _ = tokio::time::sleep(delay) => {
                            delay = self.backoff.next(delay);
                        }
                    }
                }
                None => {
                    tokio::time::sleep(delay).await;
                    delay = self.backoff.next(delay);
                }
            }
            if let Some(element) = self.tree.find(element_id) {
                return element;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryViewTree;

    fn locator(tree: &MemoryViewTree) -> ElementLocator {
        ElementLocator::new(Arc::new(tree.clone()))
    }

    #[test]
    fn present_element_resolves_synchronously() {
        let tree = MemoryViewTree::new();
        tree.insert_element("message-a", 100.0);
        // No runtime timers needed for the immediate path.
        let element = tokio_test::block_on(
            locator(&tree).locate("message-a", Duration::from_secs(1)),
        )
        .unwrap();
        assert_eq!(element.element_id(), "message-a");
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_when_element_mounts_later() {
        let tree = MemoryViewTree::new();
        let loc = locator(&tree);

        let delayed = tree.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(400)).await;
            delayed.insert_element("message-late", 100.0);
        });

        let element = loc
            .locate("message-late", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(element.element_id(), "message-late");
    }

    // === Scenario: change notification unavailable — polling path ===
    #[tokio::test(start_paused = true)]
    async fn polling_fallback_finds_element_without_watcher() {
        let tree = MemoryViewTree::without_watcher();
        let loc = locator(&tree);

        let delayed = tree.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(700)).await;
            delayed.insert_element("message-polled", 100.0);
        });

        let element = loc
            .locate("message-polled", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(element.element_id(), "message-polled");
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_element_never_appears() {
        let tree = MemoryViewTree::new();
        let started = tokio::time::Instant::now();
        let result = locator(&tree)
            .locate("message-never", Duration::from_millis(1_500))
            .await;

        match result {
            Err(LocateError::Timeout {
                element_id,
                waited_ms,
            }) => {
                assert_eq!(element_id, "message-never");
                assert!(waited_ms >= 1_500);
            }
            Ok(_) => panic!("expected timeout"),
        }
        // Hard upper bound: the deadline, not the backoff schedule.
        assert!(started.elapsed() < Duration::from_millis(1_600));
    }

    #[tokio::test(start_paused = true)]
    async fn unrelated_changes_do_not_resolve() {
        let tree = MemoryViewTree::new();
        let loc = locator(&tree);

        let noisy = tree.clone();
        tokio::spawn(async move {
            for i in 0..10 {
                tokio::time::sleep(Duration::from_millis(50)).await;
                noisy.insert_element(format!("message-other-{}", i), 50.0);
            }
        });

        let result = loc
            .locate("message-target", Duration::from_millis(800))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn element_mounting_during_virtualization_churn_is_found() {
        let tree = MemoryViewTree::new();
        tree.insert_element("message-a", 100.0);
        let loc = locator(&tree);

        let churn = tree.clone();
        tokio::spawn(async move {
            churn.remove_element("message-a");
            tokio::time::sleep(Duration::from_millis(200)).await;
            churn.insert_element("message-a", 100.0);
        });

        // Give the churn task its removal first.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let element = loc
            .locate("message-a", Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(element.element_id(), "message-a");
    }
}
