//! Synthetic conversation builders

use citelink::{EvidenceRecord, MessageView, ProvenanceKind};

/// `n` web records ranked 0..n.
pub fn web_sources(n: usize) -> Vec<EvidenceRecord> {
    (0..n)
        .map(|i| {
            EvidenceRecord::new(format!("web-{}", i), format!("Web source {}", i))
                .with_rank(i as u32)
                .with_url(format!("https://example.org/{}", i))
        })
        .collect()
}

/// A mixed evidence list: `web` web hits, `retrieval` files, `memory` facts,
/// each partition ranked from 0.
pub fn mixed_sources(web: usize, retrieval: usize, memory: usize) -> Vec<EvidenceRecord> {
    let mut records = web_sources(web);
    for i in 0..retrieval {
        records.push(
            EvidenceRecord::new(format!("file-{}", i), format!("Uploaded file {}", i))
                .with_kind(ProvenanceKind::Retrieval)
                .with_rank(i as u32)
                .with_file_name(format!("doc-{}.md", i)),
        );
    }
    for i in 0..memory {
        records.push(
            EvidenceRecord::new(format!("fact-{}", i), format!("Remembered fact {}", i))
                .with_kind(ProvenanceKind::Memory)
                .with_rank(i as u32)
                .with_snippet(format!("snippet {}", i)),
        );
    }
    records
}

/// A message whose text cites every given key once, in order.
pub fn cited_message(keys: &[&str], sources: Vec<EvidenceRecord>) -> MessageView {
    let mut content = String::from("Synthetic answer.");
    for (i, key) in keys.iter().enumerate() {
        content.push_str(&format!(" Claim {} [{}].", i, key));
    }
    MessageView::new(content, sources)
}
