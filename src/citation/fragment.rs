//! Message fragmentation
//!
//! Assistant messages are markdown. Rendering splits a message into
//! fragments: prose regions, which are scanned for citation markers, and
//! code regions (fenced/indented blocks and inline spans), which pass
//! through untouched. A `[1]` inside a code sample is indexing syntax,
//! not a citation.

use pulldown_cmark::{Event, Options, Parser, Tag};
use std::ops::Range;

/// Whether a fragment participates in marker scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Scannable prose
    Prose,
    /// Literal code region; never scanned
    Code,
}

/// One render fragment of a message, a byte-exact slice of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
}

impl Fragment {
    fn new(kind: FragmentKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Split message content into prose and code fragments, in render order.
///
/// Concatenating all fragment texts reproduces the content byte-exactly.
pub fn split_fragments(content: &str) -> Vec<Fragment> {
    let mut code_ranges: Vec<Range<usize>> = Vec::new();
    let parser = Parser::new_ext(content, Options::empty());
    for (event, range) in parser.into_offset_iter() {
        match event {
            // A Start event's range spans the whole element.
            Event::Start(Tag::CodeBlock(_)) => code_ranges.push(range),
            Event::Code(_) => code_ranges.push(range),
            _ => {}
        }
    }
    code_ranges.sort_by_key(|r| r.start);

    let mut fragments = Vec::new();
    let mut cursor = 0usize;
    for range in code_ranges {
        if range.start < cursor {
            continue; // nested inside an already-emitted block
        }
        if range.start > cursor {
            fragments.push(Fragment::new(FragmentKind::Prose, &content[cursor..range.start]));
        }
        fragments.push(Fragment::new(FragmentKind::Code, &content[range.clone()]));
        cursor = range.end;
    }
    if cursor < content.len() {
        fragments.push(Fragment::new(FragmentKind::Prose, &content[cursor..]));
    }
    fragments
}

/// The scannable text of a message: its prose fragments in render order.
///
/// Fragments are joined with a newline so a bracket group can never span
/// a fragment boundary.
pub fn scannable_text(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter(|f| f.kind == FragmentKind::Prose)
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
