//! Citation marker scanning
//!
//! Markers are bracketed, comma-separated keys embedded in generated text:
//! `[1]`, `[2, 3]`, `[R1]`, `[M1, M2]`. A key is an optional provenance
//! prefix (`R`, `M`, or the explicit web synonym `W`) followed by a 1-based
//! partition position. Scanning is stateless per fragment and re-entrant.

use crate::evidence::ProvenanceKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bracket groups whose entries look like citation keys. Entry-level
/// validation happens in `CitationKey::parse`; groups that yield zero
/// valid keys stay literal.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*[A-Za-z]?[0-9]+(?:\s*,\s*[A-Za-z]?[0-9]+)*\s*\]")
        .expect("marker pattern is valid")
});

/// Key entries inside a candidate group: optional known prefix, then a
/// positive integer with no leading zero.
static KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([RMW])?([1-9][0-9]*)$").expect("key pattern is valid"));

/// Canonical identity of one cited position: provenance kind + 1-based
/// position within that kind's partition.
///
/// The canonical string form is `prefix + number` — `"1"`, `"R1"`, `"M2"`.
/// The explicit `W` prefix is accepted on input but canonicalizes to the
/// unprefixed web form, so `[W1]` and `[1]` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CitationKey {
    pub kind: ProvenanceKind,
    pub position: u32,
}

impl CitationKey {
    pub fn new(kind: ProvenanceKind, position: u32) -> Self {
        Self { kind, position }
    }

    /// Parse one marker entry. Returns `None` for unknown prefixes, zero,
    /// leading zeros, or anything non-numeric.
    pub fn parse(token: &str) -> Option<Self> {
        let caps = KEY.captures(token.trim())?;
        let kind = match caps.get(1) {
            Some(prefix) => ProvenanceKind::from_prefix(prefix.as_str().chars().next()?)?,
            None => ProvenanceKind::Web,
        };
        let position: u32 = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { kind, position })
    }
}

impl std::fmt::Display for CitationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.position)
    }
}

/// A parsed marker span within one text fragment.
///
/// Transient; recomputed on every render pass. Offsets are byte positions
/// into the scanned fragment, spanning the brackets inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOccurrence {
    pub start: usize,
    pub end: usize,
    /// Valid keys in authored order. Entries that failed to parse were
    /// discarded; an occurrence always carries at least one key.
    pub keys: Vec<CitationKey>,
}

/// Scan a fragment for citation markers.
///
/// Bracket groups with zero valid keys are not occurrences — they stay
/// literal text. The scanner holds no state between calls.
pub fn scan(text: &str) -> Vec<MarkerOccurrence> {
    MARKER
        .find_iter(text)
        .filter_map(|m| {
            let inner = &text[m.start() + 1..m.end() - 1];
            let keys: Vec<CitationKey> = inner
                .split(',')
                .filter_map(CitationKey::parse)
                .collect();
            if keys.is_empty() {
                None
            } else {
                Some(MarkerOccurrence {
                    start: m.start(),
                    end: m.end(),
                    keys,
                })
            }
        })
        .collect()
}
