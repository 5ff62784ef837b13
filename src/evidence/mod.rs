//! Evidence data model: records, provenance partitions, message views

mod classify;
mod message;
mod record;

pub use classify::GroupedEvidence;
pub use message::{element_id_for, MessageUuid, MessageView};
pub use record::{EvidenceRecord, ProvenanceKind};
