//! Rule Engine for derived relations
//!
//! Rules read a frozen snapshot and propose relations; the engine writes the
//! proposals back into the store. Evaluation is eager and happens once,
//! after ingestion has finished.

pub mod rules;

use std::collections::HashSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::GraphStore;
use crate::types::{GraphSnapshot, InferResult, InferStats, InferredRelation, Relation};

pub use rules::SameHouseAllyRule;

/// Trait for inference rules
///
/// Each rule derives new relations from existing ones. A rule must only read
/// the relation kinds it depends on and only propose derived kinds.
pub trait InferenceRule: Send + Sync {
    /// Get the name of this rule
    fn name(&self) -> &str;

    /// Propose relations derived from `graph`
    ///
    /// # Returns
    /// A tuple of (proposed_relations, stats)
    fn apply(&self, graph: &GraphSnapshot) -> (Vec<Relation>, InferStats);
}

/// How a pass treats derived facts that already exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllyPolicy {
    /// Skip proposals identical to a stored relation; re-running adds nothing
    #[default]
    Deduplicate,
    /// Insert every proposal; re-running duplicates derived facts
    Additive,
}

/// The inference engine that manages and applies rules
pub struct RuleEngine {
    rules: Vec<Box<dyn InferenceRule>>,
    policy: AllyPolicy,
}

impl RuleEngine {
    /// Create an engine with the same-house ally rule
    pub fn new() -> Self {
        Self::with_policy(AllyPolicy::default())
    }

    pub fn with_policy(policy: AllyPolicy) -> Self {
        Self {
            rules: vec![Box::new(SameHouseAllyRule)],
            policy,
        }
    }

    /// Get the number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn policy(&self) -> AllyPolicy {
        self.policy
    }

    /// Run all rules against a snapshot without writing anything
    pub fn infer(&self, graph: &GraphSnapshot) -> (Vec<InferredRelation>, InferStats) {
        let mut all_inferred = Vec::new();
        let mut total_stats = InferStats::default();
        let start_time = Instant::now();

        for rule in &self.rules {
            let (relations, stats) = rule.apply(graph);
            log::debug!(
                "Rule {} proposed {} relations",
                rule.name(),
                relations.len()
            );
            all_inferred.extend(relations.into_iter().map(|relation| InferredRelation {
                relation,
                rule_name: rule.name().to_string(),
            }));
            total_stats.merge(&stats);
        }

        total_stats.execution_time_ms = start_time.elapsed().as_millis() as u64;
        (all_inferred, total_stats)
    }

    /// Run all rules and materialize their proposals in `store`
    pub fn run(&self, store: &dyn GraphStore) -> Result<InferResult> {
        let start_time = Instant::now();
        let snapshot = store.snapshot();
        let (proposed, mut stats) = self.infer(&snapshot);

        let mut existing: HashSet<Relation> = match self.policy {
            AllyPolicy::Deduplicate => snapshot
                .relations
                .into_iter()
                .filter(|r| r.kind.is_derived())
                .collect(),
            AllyPolicy::Additive => HashSet::new(),
        };

        let mut inserted = Vec::with_capacity(proposed.len());
        for inferred in proposed {
            if self.policy == AllyPolicy::Deduplicate && !existing.insert(inferred.relation.clone())
            {
                stats.duplicates_skipped += 1;
                continue;
            }
            store.insert_relation(inferred.relation.clone())?;
            inserted.push(inferred);
        }

        stats.relations_inserted = inserted.len();
        stats.execution_time_ms = start_time.elapsed().as_millis() as u64;
        log::info!(
            "Inference inserted {} relations ({} duplicates skipped)",
            stats.relations_inserted,
            stats.duplicates_skipped
        );

        Ok(InferResult {
            inserted_relations: inserted,
            stats,
        })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
