//! Graph Store - typed nodes and relations behind one storage contract
//!
//! The store is append-only: nodes and relations are never mutated or
//! removed once inserted.

mod memory;
pub mod snapshot;

pub use memory::InMemoryStore;
pub use snapshot::{load_snapshot, save_snapshot, SnapshotMeta};

use crate::error::Result;
use crate::types::{Attributes, GraphSnapshot, Node, NodeId, NodeKind, Relation, RelationKind, RoleMap};

/// Storage contract the ingestion, inference and analytics phases rely on
pub trait GraphStore: Send + Sync {
    /// Insert a node; fails with `DuplicateKey` if `(kind, natural_key)` exists
    fn add_node(&self, kind: NodeKind, natural_key: &str, attributes: Attributes)
        -> Result<NodeId>;

    /// Insert a relation; fails with `UnresolvedReference` if a referenced id is absent
    fn add_relation(&self, kind: RelationKind, roles: RoleMap) -> Result<()>;

    /// Resolve a natural key to its node id
    fn find_node_by_key(&self, kind: NodeKind, key: &str) -> Option<NodeId>;

    /// All relations of one kind
    fn relations_of_type(&self, kind: RelationKind) -> Vec<Relation>;

    /// Attribute map of a node
    fn attributes_of(&self, id: NodeId) -> Result<Attributes>;

    /// Ids of all nodes of one kind, ascending
    fn nodes_of_type(&self, kind: NodeKind) -> Vec<NodeId>;

    fn node(&self, id: NodeId) -> Option<Node>;

    fn node_count(&self) -> usize;

    fn relation_count(&self) -> usize;

    /// Frozen copy of the whole graph
    fn snapshot(&self) -> GraphSnapshot;

    /// Insert a prebuilt relation
    fn insert_relation(&self, relation: Relation) -> Result<()> {
        self.add_relation(relation.kind, relation.roles)
    }
}
