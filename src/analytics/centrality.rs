//! Degree centrality over a subgraph view

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

use super::subgraph::SubgraphView;

/// How a node's degree is counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeCounting {
    /// Number of qualifying relation instances the node takes part in;
    /// the two directions of a symmetric ally pair count separately
    #[default]
    RelationInstances,
    /// Number of distinct other nodes sharing a qualifying relation
    DistinctNeighbours,
}

/// Degree of every in-scope node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeCentrality {
    pub degrees: BTreeMap<NodeId, usize>,
}

impl DegreeCentrality {
    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.degrees.get(&id).copied()
    }

    /// Highest degree and every node attaining it
    ///
    /// Nodes without any qualifying relation are never reported as central,
    /// so a graph with no edges yields `(0, {})`.
    pub fn max(&self) -> (usize, BTreeSet<NodeId>) {
        let max = self.degrees.values().copied().max().unwrap_or(0);
        if max == 0 {
            return (0, BTreeSet::new());
        }
        let members = self
            .degrees
            .iter()
            .filter(|&(_, &d)| d == max)
            .map(|(id, _)| *id)
            .collect();
        (max, members)
    }
}

pub fn degree_centrality(view: &SubgraphView, counting: DegreeCounting) -> DegreeCentrality {
    let mut counts = vec![0usize; view.node_count()];

    match counting {
        DegreeCounting::RelationInstances => {
            for members in view.edges() {
                for &slot in members {
                    counts[slot] += 1;
                }
            }
        }
        DegreeCounting::DistinctNeighbours => {
            let mut neighbours: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); view.node_count()];
            for members in view.edges() {
                for &a in members {
                    for &b in members {
                        if a != b {
                            neighbours[a].insert(b);
                        }
                    }
                }
            }
            for (slot, set) in neighbours.iter().enumerate() {
                counts[slot] = set.len();
            }
        }
    }

    let degrees = counts
        .into_iter()
        .enumerate()
        .map(|(slot, degree)| (view.node(slot), degree))
        .collect();
    DegreeCentrality { degrees }
}
