//! Subgraph selection and its indexed view

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::{GraphSnapshot, NodeId, NodeKind, RelationKind};

/// Which nodes and relation kinds an analytic runs over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgraph {
    #[serde(rename = "nodeKind")]
    pub node_kind: NodeKind,
    #[serde(rename = "relationKinds")]
    pub relation_kinds: BTreeSet<RelationKind>,
}

impl Subgraph {
    pub fn new(node_kind: NodeKind, relation_kinds: impl IntoIterator<Item = RelationKind>) -> Self {
        Self {
            node_kind,
            relation_kinds: relation_kinds.into_iter().collect(),
        }
    }

    /// Characters linked by ally, marriage and parental relations
    pub fn characters() -> Self {
        Self::new(
            NodeKind::Character,
            [RelationKind::Ally, RelationKind::Marriage, RelationKind::Parental],
        )
    }

    pub fn includes(&self, kind: RelationKind) -> bool {
        self.relation_kinds.contains(&kind)
    }
}

impl Default for Subgraph {
    fn default() -> Self {
        Self::characters()
    }
}

/// Arena of in-scope nodes plus one participant list per qualifying relation
///
/// Role direction and relation kind are discarded: a relation instance is just
/// the set of in-scope nodes it touches.
#[derive(Debug, Clone, Default)]
pub struct SubgraphView {
    nodes: Vec<NodeId>,
    edges: Vec<Vec<usize>>,
}

impl SubgraphView {
    pub fn build(graph: &GraphSnapshot, subgraph: &Subgraph) -> Self {
        let nodes = graph.node_ids(subgraph.node_kind);
        let slot: HashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let edges: Vec<Vec<usize>> = graph
            .relations
            .iter()
            .filter(|r| subgraph.includes(r.kind))
            .map(|r| {
                r.participants()
                    .into_iter()
                    .filter_map(|id| slot.get(&id).copied())
                    .collect::<Vec<usize>>()
            })
            .filter(|members| !members.is_empty())
            .collect();

        log::debug!(
            "Subgraph view: {} nodes, {} relation instances",
            nodes.len(),
            edges.len()
        );
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node id at a dense slot
    pub fn node(&self, slot: usize) -> NodeId {
        self.nodes[slot]
    }

    /// In-scope participants (dense slots, ascending) of each relation instance
    pub fn edges(&self) -> &[Vec<usize>] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attributes, Node, Relation};

    fn node(id: u64, kind: NodeKind) -> Node {
        Node {
            id: NodeId(id),
            kind,
            natural_key: id.to_string(),
            attributes: Attributes::new(),
        }
    }

    #[test]
    fn test_view_filters_kinds() {
        let graph = GraphSnapshot {
            nodes: vec![
                node(0, NodeKind::Character),
                node(1, NodeKind::House),
                node(2, NodeKind::Character),
            ],
            relations: vec![
                Relation::membership(NodeId(0), NodeId(1)),
                Relation::marriage(NodeId(0), NodeId(2)),
            ],
        };

        let view = SubgraphView::build(&graph, &Subgraph::characters());
        assert_eq!(view.node_count(), 2);
        assert_eq!(view.node(1), NodeId(2));
        assert_eq!(view.edges().to_vec(), vec![vec![0usize, 1]]);
    }

    #[test]
    fn test_out_of_scope_ends_dropped() {
        let graph = GraphSnapshot {
            nodes: vec![node(0, NodeKind::Character), node(1, NodeKind::House)],
            relations: vec![Relation::membership(NodeId(0), NodeId(1))],
        };

        let subgraph = Subgraph::new(NodeKind::Character, [RelationKind::Membership]);
        let view = SubgraphView::build(&graph, &subgraph);
        assert_eq!(view.edges().to_vec(), vec![vec![0usize]]);
    }
}
