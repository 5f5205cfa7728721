//! Data types for the allegiance graph
//!
//! This module contains all the core data structures used throughout the crate.

mod graph;
mod inference;
mod node;
mod record;
mod relation;
mod summary;

pub use graph::GraphSnapshot;
pub use inference::{InferResult, InferStats, InferredRelation};
pub use node::{
    AttributeValue, Attributes, Character, Gender, House, Node, NodeId, NodeKind, NAME_ATTRIBUTE,
    UNKNOWN_AGE,
};
pub use record::CharacterRecord;
pub(crate) use record::present;
pub use relation::{Relation, RelationKind, Role, RoleMap};
pub use summary::{CentralitySummary, ComponentSummary, GraphReport};
