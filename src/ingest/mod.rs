//! Ingestion Pipeline - normalized records into nodes and relations
//!
//! Ingestion runs in two phases. Every character and house node is created
//! first; only then are membership, marriage and parental relations linked,
//! since relations refer to nodes by natural key.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::IngestConfig;
use crate::error::{GraphError, NodeRef, Result};
use crate::store::GraphStore;
use crate::types::{
    present, Attributes, CharacterRecord, House, NodeId, NodeKind, Relation, RelationKind,
};

/// What to do when a relation names a node that does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Fail the whole ingestion call
    #[default]
    Abort,
    /// Log, record in the report and carry on
    Skip,
}

/// A relation left out because one of its ends could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRelation {
    pub kind: RelationKind,
    /// Character whose record asked for the relation
    pub record: String,
    #[serde(rename = "missingKind")]
    pub missing_kind: NodeKind,
    #[serde(rename = "missingKey")]
    pub missing_key: String,
}

/// Counters of one ingestion call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub characters: usize,
    pub houses: usize,
    pub memberships: usize,
    pub marriages: usize,
    pub parentals: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRelation>,
}

impl IngestReport {
    pub fn relation_count(&self) -> usize {
        self.memberships + self.marriages + self.parentals
    }

    fn absorb(mut self, other: IngestReport) -> Self {
        self.characters += other.characters;
        self.houses += other.houses;
        self.memberships += other.memberships;
        self.marriages += other.marriages;
        self.parentals += other.parentals;
        self.skipped.extend(other.skipped);
        self
    }
}

/// Loads records into a graph store
pub struct Ingestor<'a> {
    store: &'a dyn GraphStore,
    config: &'a IngestConfig,
}

impl<'a> Ingestor<'a> {
    pub fn new(store: &'a dyn GraphStore, config: &'a IngestConfig) -> Self {
        Self { store, config }
    }

    /// Ingest a batch of records
    pub fn ingest(&self, records: &[CharacterRecord]) -> Result<IngestReport> {
        if let Some(position) = records.iter().position(|r| r.char_name.is_empty()) {
            return Err(GraphError::InvalidRecord(format!(
                "record {} has an empty char_name",
                position
            )));
        }

        let parallel = records.len() > self.config.parallel_threshold;
        log::info!(
            "Ingesting {} records ({})",
            records.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        // Phase 1: nodes
        let characters = self.insert_characters(records, parallel)?;
        let houses = self.insert_houses(records)?;
        log::debug!("Created {} characters and {} houses", characters, houses);

        // Phase 2: relations; every node exists from here on
        let report = if parallel {
            records
                .par_iter()
                .map(|record| self.link_record(record))
                .try_reduce(IngestReport::default, |a, b| Ok(a.absorb(b)))?
        } else {
            records
                .iter()
                .map(|record| self.link_record(record))
                .try_fold(IngestReport::default(), |acc, r| r.map(|r| acc.absorb(r)))?
        };

        let report = IngestReport {
            characters,
            houses,
            ..report
        };
        log::info!(
            "Ingested {} characters, {} houses, {} relations ({} skipped)",
            report.characters,
            report.houses,
            report.relation_count(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Create one character node per record
    ///
    /// Attribute maps are built on the pool, inserts stay in record order so
    /// node ids do not depend on thread scheduling.
    fn insert_characters(&self, records: &[CharacterRecord], parallel: bool) -> Result<usize> {
        let attributes: Vec<Attributes> = if parallel {
            records
                .par_iter()
                .map(|r| r.to_character().attributes())
                .collect()
        } else {
            records
                .iter()
                .map(|r| r.to_character().attributes())
                .collect()
        };

        for (record, attrs) in records.iter().zip(attributes) {
            self.store
                .add_node(NodeKind::Character, &record.char_name, attrs)?;
        }
        Ok(records.len())
    }

    /// Create one house node per distinct non-empty house, first-seen order
    fn insert_houses(&self, records: &[CharacterRecord]) -> Result<usize> {
        let mut seen = HashSet::new();
        let mut created = 0;
        for name in records.iter().filter_map(|r| present(&r.house)) {
            if seen.insert(name) {
                self.store
                    .add_node(NodeKind::House, name, House::new(name).attributes())?;
                created += 1;
            }
        }
        Ok(created)
    }

    /// Create every relation a single record asks for
    fn link_record(&self, record: &CharacterRecord) -> Result<IngestReport> {
        let mut report = IngestReport::default();
        let character = self
            .store
            .find_node_by_key(NodeKind::Character, &record.char_name)
            .ok_or_else(|| {
                GraphError::UnresolvedReference(NodeRef::key(NodeKind::Character, &record.char_name))
            })?;

        if let Some(house) = present(&record.house) {
            if let Some(house_id) =
                self.resolve(record, RelationKind::Membership, NodeKind::House, house, &mut report)?
            {
                self.store
                    .insert_relation(Relation::membership(character, house_id))?;
                report.memberships += 1;
            }
        }

        if let Some(spouse) = present(&record.spouse) {
            if let Some(spouse_id) = self.resolve(
                record,
                RelationKind::Marriage,
                NodeKind::Character,
                spouse,
                &mut report,
            )? {
                self.store
                    .insert_relation(Relation::marriage(spouse_id, character))?;
                report.marriages += 1;
            }
        }

        for parent in [&record.father, &record.mother] {
            if let Some(parent) = present(parent) {
                if let Some(parent_id) = self.resolve(
                    record,
                    RelationKind::Parental,
                    NodeKind::Character,
                    parent,
                    &mut report,
                )? {
                    self.store
                        .insert_relation(Relation::parental(parent_id, character))?;
                    report.parentals += 1;
                }
            }
        }

        if let Some(heir) = present(&record.heir) {
            if let Some(heir_id) = self.resolve(
                record,
                RelationKind::Parental,
                NodeKind::Character,
                heir,
                &mut report,
            )? {
                self.store
                    .insert_relation(Relation::parental(character, heir_id))?;
                report.parentals += 1;
            }
        }

        Ok(report)
    }

    /// Resolve a natural key, applying the unresolved-reference policy
    fn resolve(
        &self,
        record: &CharacterRecord,
        relation: RelationKind,
        kind: NodeKind,
        key: &str,
        report: &mut IngestReport,
    ) -> Result<Option<NodeId>> {
        if let Some(id) = self.store.find_node_by_key(kind, key) {
            return Ok(Some(id));
        }

        match self.config.unresolved {
            UnresolvedPolicy::Abort => Err(GraphError::UnresolvedReference(NodeRef::key(kind, key))),
            UnresolvedPolicy::Skip => {
                log::warn!(
                    "Skipping {} for '{}': no {} named '{}'",
                    relation,
                    record.char_name,
                    kind,
                    key
                );
                report.skipped.push(SkippedRelation {
                    kind: relation,
                    record: record.char_name.clone(),
                    missing_kind: kind,
                    missing_key: key.to_string(),
                });
                Ok(None)
            }
        }
    }
}
