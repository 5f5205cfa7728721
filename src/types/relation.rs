//! Relation types for the allegiance graph

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeId, NodeKind};

/// Relation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Membership,
    Marriage,
    Parental,
    /// Derived by the rule engine, never supplied by ingestion
    Ally,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Membership,
        RelationKind::Marriage,
        RelationKind::Parental,
        RelationKind::Ally,
    ];

    /// Roles this relation relates, with the node kind each role must point at
    pub fn schema(&self) -> [(Role, NodeKind); 2] {
        match self {
            RelationKind::Membership => [
                (Role::Member, NodeKind::Character),
                (Role::Organization, NodeKind::House),
            ],
            RelationKind::Marriage => [
                (Role::Partner1, NodeKind::Character),
                (Role::Partner2, NodeKind::Character),
            ],
            RelationKind::Parental => [
                (Role::Parent, NodeKind::Character),
                (Role::Heir, NodeKind::Character),
            ],
            RelationKind::Ally => [
                (Role::Ally1, NodeKind::Character),
                (Role::Ally2, NodeKind::Character),
            ],
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, RelationKind::Ally)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Membership => "membership",
            RelationKind::Marriage => "marriage",
            RelationKind::Parental => "parental",
            RelationKind::Ally => "ally",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a node plays inside a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Organization,
    Partner1,
    Partner2,
    Parent,
    Heir,
    Ally1,
    Ally2,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Member => "member",
            Role::Organization => "organization",
            Role::Partner1 => "partner1",
            Role::Partner2 => "partner2",
            Role::Parent => "parent",
            Role::Heir => "heir",
            Role::Ally1 => "ally1",
            Role::Ally2 => "ally2",
        };
        f.write_str(name)
    }
}

/// Role -> node mapping of one relation instance
pub type RoleMap = BTreeMap<Role, NodeId>;

/// Typed relation between role-labelled nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub roles: RoleMap,
}

impl Relation {
    pub fn new(kind: RelationKind, roles: RoleMap) -> Self {
        Self { kind, roles }
    }

    pub fn membership(member: NodeId, organization: NodeId) -> Self {
        Self::pair(RelationKind::Membership, member, organization)
    }

    pub fn marriage(partner1: NodeId, partner2: NodeId) -> Self {
        Self::pair(RelationKind::Marriage, partner1, partner2)
    }

    pub fn parental(parent: NodeId, heir: NodeId) -> Self {
        Self::pair(RelationKind::Parental, parent, heir)
    }

    pub fn ally(ally1: NodeId, ally2: NodeId) -> Self {
        Self::pair(RelationKind::Ally, ally1, ally2)
    }

    /// Build a binary relation, filling the kind's roles in schema order
    fn pair(kind: RelationKind, first: NodeId, second: NodeId) -> Self {
        let [(r1, _), (r2, _)] = kind.schema();
        let mut roles = RoleMap::new();
        roles.insert(r1, first);
        roles.insert(r2, second);
        Self { kind, roles }
    }

    pub fn get(&self, role: Role) -> Option<NodeId> {
        self.roles.get(&role).copied()
    }

    /// Distinct nodes taking part in this relation, ascending
    pub fn participants(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.roles.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
