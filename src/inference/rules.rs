//! Inference rules
//!
//! This module contains concrete implementations of inference rules.

use std::collections::BTreeMap;

use crate::types::{GraphSnapshot, InferStats, NodeId, NodeKind, Relation, RelationKind, Role};

use super::InferenceRule;

/// Same-house ally rule
///
/// Any two distinct characters holding membership in the same house become
/// allies. Every ordered pair is emitted, so a house of `n` members yields
/// `n * (n - 1)` ally relations.
pub struct SameHouseAllyRule;

impl SameHouseAllyRule {
    /// Members of every house, houses and members ascending
    fn members_by_house(graph: &GraphSnapshot) -> (BTreeMap<NodeId, Vec<NodeId>>, usize) {
        let mut houses: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let mut read = 0;
        for relation in graph.relations_of(RelationKind::Membership) {
            read += 1;
            if let (Some(member), Some(house)) =
                (relation.get(Role::Member), relation.get(Role::Organization))
            {
                houses.entry(house).or_default().push(member);
            }
        }
        for members in houses.values_mut() {
            members.sort_unstable();
            members.dedup();
        }
        (houses, read)
    }
}

impl InferenceRule for SameHouseAllyRule {
    fn name(&self) -> &str {
        "SameHouseAllyRule"
    }

    fn apply(&self, graph: &GraphSnapshot) -> (Vec<Relation>, InferStats) {
        let (houses, relations_read) = Self::members_by_house(graph);
        let mut stats = InferStats {
            groups_scanned: graph.node_ids(NodeKind::House).len(),
            relations_read,
            ..InferStats::default()
        };

        let mut proposed = Vec::new();
        for members in houses.values() {
            for &c1 in members {
                for &c2 in members {
                    if c1 != c2 {
                        proposed.push(Relation::ally(c1, c2));
                    }
                }
            }
        }

        stats.relations_proposed = proposed.len();
        (proposed, stats)
    }
}
