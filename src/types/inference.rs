//! Inference types for the rule engine
//!
//! This module contains data structures for the rule engine output.

use serde::{Deserialize, Serialize};

use super::Relation;

/// A relation derived by a rule, tagged with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredRelation {
    pub relation: Relation,
    #[serde(rename = "ruleName")]
    pub rule_name: String,
}

/// Statistics about an inference pass
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct InferStats {
    /// Number of groups (houses) scanned
    #[serde(rename = "groupsScanned")]
    pub groups_scanned: usize,
    /// Number of source relations read
    #[serde(rename = "relationsRead")]
    pub relations_read: usize,
    /// Number of relations proposed by rules
    #[serde(rename = "relationsProposed")]
    pub relations_proposed: usize,
    /// Number of proposals skipped because the fact already existed
    #[serde(rename = "duplicatesSkipped")]
    pub duplicates_skipped: usize,
    /// Number of relations written to the store
    #[serde(rename = "relationsInserted")]
    pub relations_inserted: usize,
    /// Execution time in milliseconds
    #[serde(rename = "executionTimeMs")]
    pub execution_time_ms: u64,
}

impl InferStats {
    /// Fold another rule's counters into this one
    pub fn merge(&mut self, other: &InferStats) {
        self.groups_scanned += other.groups_scanned;
        self.relations_read += other.relations_read;
        self.relations_proposed += other.relations_proposed;
        self.duplicates_skipped += other.duplicates_skipped;
        self.relations_inserted += other.relations_inserted;
    }
}

/// Result of running the rule engine against a store
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InferResult {
    /// Relations that were actually inserted
    #[serde(rename = "insertedRelations")]
    pub inserted_relations: Vec<InferredRelation>,
    pub stats: InferStats,
}

impl InferResult {
    /// Check if any relations were inserted
    pub fn has_inferences(&self) -> bool {
        !self.inserted_relations.is_empty()
    }

    /// Get the number of inserted relations
    pub fn count(&self) -> usize {
        self.inserted_relations.len()
    }
}
