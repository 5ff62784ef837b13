//! Per-fragment citation resolution
//!
//! Each rendered fragment consults the shared registry, so numbering is
//! identical across fragments. Unresolvable markers degrade to literal
//! text; that is policy, not an error path.

use super::marker::{self, CitationKey};
use super::registry::CitationRegistry;
use crate::evidence::{EvidenceRecord, GroupedEvidence, ProvenanceKind};

/// A citation chip ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCitation {
    /// The cited record, from the key's provenance partition
    pub evidence: EvidenceRecord,
    /// 1-based display index within the key's partition
    pub index_in_group: u32,
    /// Distinct resolved keys in that partition across the whole message
    pub total_in_group: u32,
    /// Canonical key string (`"1"`, `"R1"`, `"M2"`)
    pub display_key: String,
}

/// Renderer output for one fragment: literal text runs interleaved with
/// citation chip groups.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedSegment {
    Text(String),
    Citations(Vec<ResolvedCitation>),
}

fn kind_order(kind: ProvenanceKind) -> u8 {
    match kind {
        ProvenanceKind::Web => 0,
        ProvenanceKind::Retrieval => 1,
        ProvenanceKind::Memory => 2,
    }
}

/// Resolve one fragment's text into rendered segments.
///
/// Per marker: keys found in the registry become one chip each, emitted in
/// ascending group-index order regardless of authored order; keys the
/// registry rejected are dropped. A marker where every key is unresolved
/// is preserved as literal text unchanged.
pub fn resolve_fragment(
    text: &str,
    registry: &CitationRegistry,
    grouped: &GroupedEvidence,
) -> Vec<RenderedSegment> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    let mut cursor = 0usize;

    for occurrence in marker::scan(text) {
        let mut resolved: Vec<ResolvedCitation> = Vec::new();
        let mut seen: Vec<CitationKey> = Vec::new();
        for key in &occurrence.keys {
            if seen.contains(key) {
                continue; // duplicate key inside one marker renders once
            }
            seen.push(*key);
            if let Some(citation) = resolve_key(key, registry, grouped) {
                resolved.push(citation);
            }
        }

        pending.push_str(&text[cursor..occurrence.start]);
        if resolved.is_empty() {
            // Graceful degradation: the literal marker stays in the text run.
            pending.push_str(&text[occurrence.start..occurrence.end]);
        } else {
            resolved.sort_by_key(|c| (c.index_in_group, kind_order(c.evidence.provenance_kind)));
            if !pending.is_empty() {
                segments.push(RenderedSegment::Text(std::mem::take(&mut pending)));
            }
            segments.push(RenderedSegment::Citations(resolved));
        }
        cursor = occurrence.end;
    }

    pending.push_str(&text[cursor..]);
    if !pending.is_empty() {
        segments.push(RenderedSegment::Text(pending));
    }
    segments
}

fn resolve_key(
    key: &CitationKey,
    registry: &CitationRegistry,
    grouped: &GroupedEvidence,
) -> Option<ResolvedCitation> {
    let index_in_group = registry.group_index(key)?;
    let evidence = grouped.get(key.kind, key.position)?.clone();
    Some(ResolvedCitation {
        evidence,
        index_in_group,
        total_in_group: registry.group_total(key.kind),
        display_key: key.to_string(),
    })
}
