//! In-memory graph store
//!
//! Arena of nodes plus an indexed relation list, guarded by a single
//! `parking_lot::RwLock` so concurrent writers are serialized.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{GraphError, NodeRef, Result};
use crate::types::{
    Attributes, GraphSnapshot, Node, NodeId, NodeKind, Relation, RelationKind, RoleMap,
};

use super::GraphStore;

#[derive(Debug, Default)]
struct StoreInner {
    nodes: Vec<Node>,
    /// (kind, natural key) -> id
    key_index: HashMap<(NodeKind, String), NodeId>,
    relations: Vec<Relation>,
    /// relation kind -> positions in `relations`
    kind_index: HashMap<RelationKind, Vec<usize>>,
}

impl StoreInner {
    /// Check roles against the relation schema before anything is written
    fn validate(&self, kind: RelationKind, roles: &RoleMap) -> Result<()> {
        let schema = kind.schema();
        if roles.len() != schema.len() {
            return Err(GraphError::SchemaViolation(format!(
                "{} expects {} roles, got {}",
                kind,
                schema.len(),
                roles.len()
            )));
        }

        for (role, expected) in schema {
            let id = roles.get(&role).ok_or_else(|| {
                GraphError::SchemaViolation(format!("{} is missing role '{}'", kind, role))
            })?;
            let node = self
                .nodes
                .get(id.index())
                .ok_or(GraphError::UnresolvedReference(NodeRef::Id(*id)))?;
            if node.kind != expected {
                return Err(GraphError::SchemaViolation(format!(
                    "{} role '{}' expects a {}, got {} {}",
                    kind, role, expected, node.kind, id
                )));
            }
        }
        Ok(())
    }
}

/// Graph store that keeps everything in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot, revalidating every node and relation
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        let store = Self::new();
        for node in snapshot.nodes {
            let id = store.add_node(node.kind, &node.natural_key, node.attributes)?;
            if id != node.id {
                return Err(GraphError::Snapshot(format!(
                    "node ids must be dense and ordered: expected {}, found {}",
                    id, node.id
                )));
            }
        }
        for relation in snapshot.relations {
            store.insert_relation(relation)?;
        }
        Ok(store)
    }
}

impl GraphStore for InMemoryStore {
    fn add_node(
        &self,
        kind: NodeKind,
        natural_key: &str,
        attributes: Attributes,
    ) -> Result<NodeId> {
        let mut inner = self.inner.write();
        let key = (kind, natural_key.to_string());
        if inner.key_index.contains_key(&key) {
            return Err(GraphError::DuplicateKey {
                kind,
                key: natural_key.to_string(),
            });
        }

        let id = NodeId(inner.nodes.len() as u64);
        inner.nodes.push(Node {
            id,
            kind,
            natural_key: natural_key.to_string(),
            attributes,
        });
        inner.key_index.insert(key, id);
        Ok(id)
    }

    fn add_relation(&self, kind: RelationKind, roles: RoleMap) -> Result<()> {
        let mut inner = self.inner.write();
        inner.validate(kind, &roles)?;

        let position = inner.relations.len();
        inner.relations.push(Relation::new(kind, roles));
        inner.kind_index.entry(kind).or_default().push(position);
        Ok(())
    }

    fn find_node_by_key(&self, kind: NodeKind, key: &str) -> Option<NodeId> {
        self.inner
            .read()
            .key_index
            .get(&(kind, key.to_string()))
            .copied()
    }

    fn relations_of_type(&self, kind: RelationKind) -> Vec<Relation> {
        let inner = self.inner.read();
        inner
            .kind_index
            .get(&kind)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&p| inner.relations[p].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn attributes_of(&self, id: NodeId) -> Result<Attributes> {
        self.inner
            .read()
            .nodes
            .get(id.index())
            .map(|n| n.attributes.clone())
            .ok_or(GraphError::UnknownNode(id))
    }

    fn nodes_of_type(&self, kind: NodeKind) -> Vec<NodeId> {
        self.inner
            .read()
            .nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.id)
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<Node> {
        self.inner.read().nodes.get(id.index()).cloned()
    }

    fn node_count(&self) -> usize {
        self.inner.read().nodes.len()
    }

    fn relation_count(&self) -> usize {
        self.inner.read().relations.len()
    }

    fn snapshot(&self) -> GraphSnapshot {
        let inner = self.inner.read();
        GraphSnapshot {
            nodes: inner.nodes.clone(),
            relations: inner.relations.clone(),
        }
    }
}
