//! Source classification into rank-sorted provenance partitions
//!
//! Raw evidence lists are heterogeneous. Classification partitions them by
//! provenance kind and sorts each partition by relevance rank. Marker
//! numbers are 1-based positions within a partition, so partition order is
//! the numbering contract.

use super::record::{EvidenceRecord, ProvenanceKind};

/// The three provenance partitions of a message's evidence list.
///
/// Each partition is sorted by `relevance_rank` ascending; records without
/// a rank sort last. The sort is stable, so rank ties keep input order.
/// Pure function of its input; classification never mutates the records.
#[derive(Debug, Clone, Default)]
pub struct GroupedEvidence {
    web: Vec<EvidenceRecord>,
    retrieval: Vec<EvidenceRecord>,
    memory: Vec<EvidenceRecord>,
}

impl GroupedEvidence {
    /// Partition and rank-sort a raw evidence list.
    pub fn classify(records: &[EvidenceRecord]) -> Self {
        let mut grouped = Self::default();
        for record in records {
            match record.provenance_kind {
                ProvenanceKind::Web => grouped.web.push(record.clone()),
                ProvenanceKind::Retrieval => grouped.retrieval.push(record.clone()),
                ProvenanceKind::Memory => grouped.memory.push(record.clone()),
            }
        }
        for partition in [
            &mut grouped.web,
            &mut grouped.retrieval,
            &mut grouped.memory,
        ] {
            // Stable sort; missing ranks sort last without disturbing ties.
            partition.sort_by_key(|r| r.relevance_rank.map_or(u64::MAX, u64::from));
        }
        grouped
    }

    /// The partition for a kind, in rank order.
    pub fn partition(&self, kind: ProvenanceKind) -> &[EvidenceRecord] {
        match kind {
            ProvenanceKind::Web => &self.web,
            ProvenanceKind::Retrieval => &self.retrieval,
            ProvenanceKind::Memory => &self.memory,
        }
    }

    /// Positional lookup: `position` is 1-based within the partition,
    /// exactly the number expected inside a citation marker.
    pub fn get(&self, kind: ProvenanceKind, position: u32) -> Option<&EvidenceRecord> {
        if position == 0 {
            return None;
        }
        self.partition(kind).get(position as usize - 1)
    }

    /// Number of records in one partition.
    pub fn len(&self, kind: ProvenanceKind) -> usize {
        self.partition(kind).len()
    }

    /// Total records across all partitions.
    pub fn total(&self) -> usize {
        self.web.len() + self.retrieval.len() + self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, kind: ProvenanceKind, rank: Option<u32>) -> EvidenceRecord {
        let mut r = EvidenceRecord::new(id, format!("title-{}", id)).with_kind(kind);
        r.relevance_rank = rank;
        r
    }

    #[test]
    fn partitions_by_kind() {
        let records = vec![
            record("w1", ProvenanceKind::Web, Some(0)),
            record("r1", ProvenanceKind::Retrieval, Some(0)),
            record("m1", ProvenanceKind::Memory, Some(0)),
            record("w2", ProvenanceKind::Web, Some(1)),
        ];
        let grouped = GroupedEvidence::classify(&records);
        assert_eq!(grouped.len(ProvenanceKind::Web), 2);
        assert_eq!(grouped.len(ProvenanceKind::Retrieval), 1);
        assert_eq!(grouped.len(ProvenanceKind::Memory), 1);
        assert_eq!(grouped.total(), 4);
    }

    #[test]
    fn sorts_by_rank_ascending() {
        let records = vec![
            record("b", ProvenanceKind::Web, Some(5)),
            record("a", ProvenanceKind::Web, Some(1)),
            record("c", ProvenanceKind::Web, Some(9)),
        ];
        let grouped = GroupedEvidence::classify(&records);
        let ids: Vec<&str> = grouped
            .partition(ProvenanceKind::Web)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    // === Scenario: rank ties keep input order (stable sort) ===
    #[test]
    fn rank_ties_preserve_input_order() {
        let records = vec![
            record("first", ProvenanceKind::Memory, Some(2)),
            record("second", ProvenanceKind::Memory, Some(2)),
            record("third", ProvenanceKind::Memory, Some(2)),
        ];
        let grouped = GroupedEvidence::classify(&records);
        let ids: Vec<&str> = grouped
            .partition(ProvenanceKind::Memory)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    // === Scenario: absent rank sorts last within its partition ===
    #[test]
    fn missing_rank_sorts_last() {
        let records = vec![
            record("unranked", ProvenanceKind::Web, None),
            record("ranked", ProvenanceKind::Web, Some(7)),
            record("also-unranked", ProvenanceKind::Web, None),
        ];
        let grouped = GroupedEvidence::classify(&records);
        let ids: Vec<&str> = grouped
            .partition(ProvenanceKind::Web)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ranked", "unranked", "also-unranked"]);
    }

    #[test]
    fn positional_lookup_is_one_based() {
        let records = vec![
            record("a", ProvenanceKind::Retrieval, Some(0)),
            record("b", ProvenanceKind::Retrieval, Some(1)),
        ];
        let grouped = GroupedEvidence::classify(&records);
        assert_eq!(grouped.get(ProvenanceKind::Retrieval, 1).unwrap().id, "a");
        assert_eq!(grouped.get(ProvenanceKind::Retrieval, 2).unwrap().id, "b");
        assert!(grouped.get(ProvenanceKind::Retrieval, 0).is_none());
        assert!(grouped.get(ProvenanceKind::Retrieval, 3).is_none());
    }

    #[test]
    fn classification_is_deterministic() {
        let records = vec![
            record("x", ProvenanceKind::Web, Some(1)),
            record("y", ProvenanceKind::Web, None),
            record("z", ProvenanceKind::Web, Some(1)),
        ];
        let a = GroupedEvidence::classify(&records);
        let b = GroupedEvidence::classify(&records);
        let ids = |g: &GroupedEvidence| {
            g.partition(ProvenanceKind::Web)
                .iter()
                .map(|r| r.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
    }
}
