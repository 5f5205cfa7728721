//! Label Resolver - node ids back to display names

use std::collections::BTreeSet;

use crate::error::{GraphError, Result};
use crate::types::{GraphSnapshot, NodeId, NAME_ATTRIBUTE};

/// Resolves node ids to their `name` attribute
pub struct LabelResolver<'a> {
    graph: &'a GraphSnapshot,
}

impl<'a> LabelResolver<'a> {
    pub fn new(graph: &'a GraphSnapshot) -> Self {
        Self { graph }
    }

    /// Name of a single node
    pub fn label(&self, id: NodeId) -> Result<&'a str> {
        let node = self.graph.node(id).ok_or(GraphError::UnknownNode(id))?;
        node.name().ok_or_else(|| GraphError::MissingAttribute {
            id,
            attribute: NAME_ATTRIBUTE.to_string(),
        })
    }

    /// Names of a set of nodes
    pub fn resolve<I>(&self, ids: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = NodeId>,
    {
        ids.into_iter()
            .map(|id| self.label(id).map(str::to_string))
            .collect()
    }
}
