//! Citation attribution: marker scanning, the per-message registry, and
//! per-fragment resolution

mod fragment;
mod marker;
mod registry;
mod resolver;

pub use fragment::{scannable_text, split_fragments, Fragment, FragmentKind};
pub use marker::{scan, CitationKey, MarkerOccurrence};
pub use registry::CitationRegistry;
pub use resolver::{resolve_fragment, RenderedSegment, ResolvedCitation};
