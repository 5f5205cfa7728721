//! Analytics result records handed back to the caller

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The biggest group of connected characters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    #[serde(rename = "maxComponentSize")]
    pub max_component_size: usize,
    pub members: BTreeSet<String>,
}

/// The character(s) related to the most others
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralitySummary {
    #[serde(rename = "maxDegree")]
    pub max_degree: usize,
    pub members: BTreeSet<String>,
}

impl CentralitySummary {
    /// The single most central name, when there is no tie
    pub fn sole_member(&self) -> Option<&str> {
        if self.members.len() == 1 {
            self.members.iter().next().map(String::as_str)
        } else {
            None
        }
    }
}

/// Combined answer of one analytics run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphReport {
    #[serde(rename = "largestGroup")]
    pub largest_group: ComponentSummary,
    #[serde(rename = "mainCharacters")]
    pub main_characters: CentralitySummary,
    /// Whether the sole main character belongs to the largest group;
    /// `None` when there is a tie or no main character
    #[serde(rename = "centralInLargest", skip_serializing_if = "Option::is_none")]
    pub central_in_largest: Option<bool>,
}

impl GraphReport {
    pub fn new(largest_group: ComponentSummary, main_characters: CentralitySummary) -> Self {
        let central_in_largest = main_characters
            .sole_member()
            .map(|name| largest_group.members.contains(name));
        Self {
            largest_group,
            main_characters,
            central_in_largest,
        }
    }
}
