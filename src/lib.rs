//! Citelink: Citation Attribution & Deep-Link Navigation Engine
//!
//! The citation subsystem of a conversational assistant client: it parses
//! inline citation markers out of generated text, resolves them against
//! three independently-ranked evidence partitions with numbering that is
//! stable across every fragment of a message, and navigates deep links to
//! message elements that may not exist in the view tree yet.
//!
//! # Core Concepts
//!
//! - **Evidence**: citable records partitioned by provenance (web,
//!   retrieval file, memory fact), rank-sorted per partition
//! - **Registry**: per-message, first-appearance-ordered numbering shared
//!   by every fragment renderer
//! - **Navigation**: locate-with-timeout over a mutating view tree, then
//!   scroll, highlight, and address-bar synchronization
//!
//! # Example
//!
//! ```
//! use citelink::{ConversationService, EvidenceRecord, MessageView};
//!
//! let service = ConversationService::new();
//! let sources = vec![EvidenceRecord::new("w0", "Encyclopedia entry").with_rank(0)];
//! let entry = service.upsert_message(MessageView::new("Paris [1].", sources));
//! assert_eq!(entry.registry.len(), 1);
//! ```

pub mod citation;
pub mod config;
pub mod evidence;
pub mod nav;
mod service;
pub mod view;

pub use citation::{
    CitationKey, CitationRegistry, Fragment, FragmentKind, MarkerOccurrence, RenderedSegment,
    ResolvedCitation,
};
pub use config::{ConfigError, NavConfig, PollBackoff};
pub use evidence::{
    element_id_for, EvidenceRecord, GroupedEvidence, MessageUuid, MessageView, ProvenanceKind,
};
pub use nav::{
    message_fragment, parse_message_fragment, AddressBar, ElementLocator, LocateError,
    MemoryAddressBar, NavigateOptions, NavigationOutcome, Navigator, RevealOptions,
};
pub use service::{ConversationService, MessageEntry, RenderedFragment, ServiceError};
pub use view::{
    ChangeStream, ElementBounds, MemoryViewTree, RevealPosition, ViewChange, ViewElement,
    ViewTree, Viewport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
