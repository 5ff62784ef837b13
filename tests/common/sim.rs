//! Streaming view simulation
//!
//! Models the conditions the navigation engine has to survive: message
//! elements that mount late (slow network, async loads, virtualization)
//! and rendering targets without change notification. Delays are drawn
//! from a seeded RNG so runs are reproducible.

use citelink::{element_id_for, MemoryViewTree, MessageUuid};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

/// One degradation profile for a torture run.
#[derive(Debug, Clone)]
pub struct SimConditions {
    pub label: &'static str,
    /// Earliest element mount after the run starts
    pub min_delay: Duration,
    /// Latest element mount after the run starts
    pub max_delay: Duration,
    /// Whether the tree offers change notification
    pub watcher: bool,
}

impl SimConditions {
    /// Healthy network, responsive rendering.
    pub fn fast() -> Self {
        Self {
            label: "fast",
            min_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(80),
            watcher: true,
        }
    }

    /// Throttled network: elements take up to 1.5 s to mount.
    pub fn degraded() -> Self {
        Self {
            label: "degraded",
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(1_500),
            watcher: true,
        }
    }

    /// Saturated CPU: mounts straggle for several seconds.
    pub fn congested() -> Self {
        Self {
            label: "congested",
            min_delay: Duration::from_millis(800),
            max_delay: Duration::from_millis(6_000),
            watcher: true,
        }
    }

    /// No change notification; the locator lives on its polling fallback.
    pub fn polling_only() -> Self {
        Self {
            label: "polling-only",
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(1_500),
            watcher: false,
        }
    }

    pub fn tree(&self) -> MemoryViewTree {
        if self.watcher {
            MemoryViewTree::new()
        } else {
            MemoryViewTree::without_watcher()
        }
    }

    fn sample_delay(&self, rng: &mut StdRng) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let span = (self.max_delay - self.min_delay).as_millis() as u64;
        self.min_delay + Duration::from_millis(rng.gen_range(0..=span))
    }
}

/// Schedule every message's element to mount after a sampled delay.
pub fn stream_messages(
    tree: &MemoryViewTree,
    uuids: &[MessageUuid],
    conditions: &SimConditions,
    rng: &mut StdRng,
) {
    for (i, uuid) in uuids.iter().enumerate() {
        let delay = conditions.sample_delay(rng);
        let element_id = element_id_for(uuid);
        let height = 120.0 + (i % 6) as f64 * 35.0;
        let tree = tree.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tree.insert_element(element_id, height);
        });
    }
}
