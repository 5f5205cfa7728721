use std::fmt;

use thiserror::Error;

use crate::types::{NodeId, NodeKind};

/// Target of a reference that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Natural key lookup, as made during ingestion
    Key { kind: NodeKind, key: String },
    /// Direct id, as handed to the store
    Id(NodeId),
}

impl NodeRef {
    pub fn key(kind: NodeKind, key: impl Into<String>) -> Self {
        NodeRef::Key {
            kind,
            key: key.into(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Key { kind, key } => write!(f, "{} '{}'", kind, key),
            NodeRef::Id(id) => write!(f, "node {}", id),
        }
    }
}

/// Main error type for the allegiance graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node with the same kind and natural key already exists
    #[error("Duplicate {kind} key: {key}")]
    DuplicateKey { kind: NodeKind, key: String },

    /// A relation referenced a natural key or id with no node behind it
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(NodeRef),

    /// Label resolution found a node without the expected attribute
    #[error("Node {id} has no '{attribute}' attribute")]
    MissingAttribute { id: NodeId, attribute: String },

    /// Lookup of an id that is not in the store
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Relation roles do not match the relation kind
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Input record cannot be ingested
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Pipeline phases invoked out of order
    #[error("Phase order violation: {0}")]
    PhaseOrder(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot file is malformed
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenient Result type using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;
