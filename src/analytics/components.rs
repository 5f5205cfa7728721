//! Connected components over a subgraph view

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

use super::subgraph::SubgraphView;
use super::union_find::UnionFind;

/// Full partition of the in-scope nodes into connected components
///
/// Components are ordered by their smallest node id and each component lists
/// its members ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPartition {
    pub components: Vec<Vec<NodeId>>,
}

impl ComponentPartition {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// First component of maximum size; ties go to the smallest member id
    pub fn largest(&self) -> Option<&[NodeId]> {
        let mut best: Option<&Vec<NodeId>> = None;
        for component in &self.components {
            if best.map_or(true, |b| component.len() > b.len()) {
                best = Some(component);
            }
        }
        best.map(Vec::as_slice)
    }

    /// Component holding `id`, if it is in scope
    pub fn component_of(&self, id: NodeId) -> Option<&[NodeId]> {
        self.components
            .iter()
            .find(|c| c.binary_search(&id).is_ok())
            .map(Vec::as_slice)
    }
}

/// Partition the view with union-find
///
/// Every node in the view appears in exactly one component; nodes without a
/// qualifying relation form singletons.
pub fn connected_components(view: &SubgraphView) -> ComponentPartition {
    let mut uf = UnionFind::new(view.node_count());
    for members in view.edges() {
        if let Some((&first, rest)) = members.split_first() {
            for &other in rest {
                uf.union(first, other);
            }
        }
    }

    let components = uf
        .groups()
        .into_iter()
        .map(|group| group.into_iter().map(|slot| view.node(slot)).collect())
        .collect();
    ComponentPartition { components }
}
