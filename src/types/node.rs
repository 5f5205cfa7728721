//! Node types for the allegiance graph

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a node, assigned densely in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Position of the node in the store arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Character,
    House,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Character => "character",
            NodeKind::House => "house",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

/// Attribute map of a node, ordered for stable serialization
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Name of the attribute that carries the natural key
pub const NAME_ATTRIBUTE: &str = "name";

/// Node in the allegiance graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(rename = "naturalKey")]
    pub natural_key: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Node {
    /// The `name` attribute, if present and textual
    pub fn name(&self) -> Option<&str> {
        self.attributes
            .get(NAME_ATTRIBUTE)
            .and_then(AttributeValue::as_text)
    }
}

/// Character attributes as supplied by ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub title: String,
    pub gender: Gender,
    pub culture: String,
    pub age: i64,
    pub alive: bool,
}

/// Sentinel stored when a character's age is unknown
pub const UNKNOWN_AGE: i64 = -1;

impl Character {
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(NAME_ATTRIBUTE.to_string(), self.name.as_str().into());
        attrs.insert("title".to_string(), self.title.as_str().into());
        attrs.insert("gender".to_string(), self.gender.as_str().into());
        attrs.insert("culture".to_string(), self.culture.as_str().into());
        attrs.insert("age".to_string(), self.age.into());
        attrs.insert("alive".to_string(), self.alive.into());
        attrs
    }
}

/// House attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    pub name: String,
}

impl House {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(NAME_ATTRIBUTE.to_string(), self.name.as_str().into());
        attrs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_male_flag(male: bool) -> Self {
        if male {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}
