//! Per-message citation registry
//!
//! The registry is the single source of truth for citation numbering. It
//! is built once from the complete message text, then shared read-only by
//! every fragment renderer, so the same source gets the same number in
//! every fragment. Content changes rebuild the registry wholesale —
//! build-then-publish, never incremental mutation under readers.

use super::marker::{self, CitationKey};
use crate::evidence::{GroupedEvidence, ProvenanceKind};
use std::collections::HashMap;

fn kind_slot(kind: ProvenanceKind) -> usize {
    match kind {
        ProvenanceKind::Web => 0,
        ProvenanceKind::Retrieval => 1,
        ProvenanceKind::Memory => 2,
    }
}

/// First-appearance-ordered mapping from citation key to stable numbers.
///
/// Invariants:
/// - a key appears in `used_order` at most once;
/// - a registered key's indices never change while the message renders;
/// - rebuilding over extended text (streaming) appends new keys and never
///   renumbers earlier ones.
#[derive(Debug, Clone, Default)]
pub struct CitationRegistry {
    used_order: Vec<CitationKey>,
    used_index: HashMap<CitationKey, usize>,
    /// 1-based position among the key's own partition, in first-appearance order
    group_index: HashMap<CitationKey, u32>,
    /// Distinct resolved keys per partition
    group_totals: [u32; 3],
}

impl CitationRegistry {
    /// Build the registry from the complete scannable message text.
    ///
    /// Keys referencing a position beyond their partition's size are
    /// hallucinated citations: never added, never rendered.
    pub fn build(scannable: &str, grouped: &GroupedEvidence) -> Self {
        let mut registry = Self::default();
        for occurrence in marker::scan(scannable) {
            for key in occurrence.keys {
                if registry.used_index.contains_key(&key) {
                    continue;
                }
                if grouped.get(key.kind, key.position).is_none() {
                    continue;
                }
                let slot = kind_slot(key.kind);
                registry.used_index.insert(key, registry.used_order.len());
                registry.used_order.push(key);
                registry.group_totals[slot] += 1;
                registry.group_index.insert(key, registry.group_totals[slot]);
            }
        }
        tracing::debug!(keys = registry.used_order.len(), "citation registry built");
        registry
    }

    /// Whether a key resolved during the global scan.
    pub fn contains(&self, key: &CitationKey) -> bool {
        self.used_index.contains_key(key)
    }

    /// Keys in order of first textual appearance across the whole message.
    pub fn used_order(&self) -> &[CitationKey] {
        &self.used_order
    }

    /// 0-based position of a key in `used_order`.
    pub fn used_index(&self, key: &CitationKey) -> Option<usize> {
        self.used_index.get(key).copied()
    }

    /// 1-based display index of a key within its own partition.
    pub fn group_index(&self, key: &CitationKey) -> Option<u32> {
        self.group_index.get(key).copied()
    }

    /// Count of distinct resolved keys from one partition.
    pub fn group_total(&self, kind: ProvenanceKind) -> u32 {
        self.group_totals[kind_slot(kind)]
    }

    /// Number of distinct resolved keys across all partitions.
    pub fn len(&self) -> usize {
        self.used_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used_order.is_empty()
    }
}
