//! Evidence records and provenance classification

use serde::{Deserialize, Serialize};

/// Which of the three evidence categories a record belongs to.
///
/// The category determines the citation prefix used in marker syntax:
/// web → none, retrieval → `R`, memory → `M`. An explicit `W` is accepted
/// on input as a synonym for the unprefixed web form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceKind {
    /// Web search hit
    Web,
    /// Retrieval-augmented-generation file
    Retrieval,
    /// Long-term memory fact
    Memory,
}

impl ProvenanceKind {
    /// All kinds, in the order partitions are reported.
    pub const ALL: [ProvenanceKind; 3] = [
        ProvenanceKind::Web,
        ProvenanceKind::Retrieval,
        ProvenanceKind::Memory,
    ];

    /// The citation prefix for this kind. Web is unprefixed.
    pub fn prefix(&self) -> &'static str {
        match self {
            ProvenanceKind::Web => "",
            ProvenanceKind::Retrieval => "R",
            ProvenanceKind::Memory => "M",
        }
    }

    /// Resolve a marker prefix character. `W` is an explicit web synonym.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'W' => Some(ProvenanceKind::Web),
            'R' => Some(ProvenanceKind::Retrieval),
            'M' => Some(ProvenanceKind::Memory),
            _ => None,
        }
    }
}

impl Default for ProvenanceKind {
    /// Records arriving without a kind are treated as web hits.
    fn default() -> Self {
        ProvenanceKind::Web
    }
}

impl std::fmt::Display for ProvenanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvenanceKind::Web => write!(f, "web"),
            ProvenanceKind::Retrieval => write!(f, "retrieval"),
            ProvenanceKind::Memory => write!(f, "memory"),
        }
    }
}

/// One citable item attached to a message.
///
/// Owned by the message that cites it; immutable once attached. The wire
/// shape matches the upstream evidence providers (camelCase, every field
/// but `id` and `title` optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    /// Provider-assigned identifier
    pub id: String,
    /// Provenance category; absent on the wire means web
    #[serde(default)]
    pub provenance_kind: ProvenanceKind,
    /// Human-facing title
    pub title: String,
    /// Source URL (web hits)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source file name (retrieval files)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Relevance rank within the provider's result list, lower is better.
    /// Records without a rank sort last within their partition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_rank: Option<u32>,
    /// Optional excerpt shown in the citation popover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl EvidenceRecord {
    /// Create a record with the given id and title, defaulting to web.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provenance_kind: ProvenanceKind::default(),
            title: title.into(),
            url: None,
            file_name: None,
            relevance_rank: None,
            snippet: None,
        }
    }

    pub fn with_kind(mut self, kind: ProvenanceKind) -> Self {
        self.provenance_kind = kind;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.relevance_rank = Some(rank);
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}
