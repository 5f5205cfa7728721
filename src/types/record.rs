//! Normalized input records

use serde::{Deserialize, Serialize};

use super::{Character, Gender, UNKNOWN_AGE};

/// One cleaned row of the character table
///
/// String fields use the empty string for "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub char_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub male: bool,
    #[serde(default)]
    pub culture: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(rename = "isAlive", default)]
    pub is_alive: bool,
    #[serde(default)]
    pub mother: String,
    #[serde(default)]
    pub father: String,
    #[serde(default)]
    pub heir: String,
    #[serde(default)]
    pub house: String,
    #[serde(default)]
    pub spouse: String,
}

impl CharacterRecord {
    /// Record with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            char_name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_house(mut self, house: impl Into<String>) -> Self {
        self.house = house.into();
        self
    }

    pub fn with_spouse(mut self, spouse: impl Into<String>) -> Self {
        self.spouse = spouse.into();
        self
    }

    pub fn with_father(mut self, father: impl Into<String>) -> Self {
        self.father = father.into();
        self
    }

    pub fn with_mother(mut self, mother: impl Into<String>) -> Self {
        self.mother = mother.into();
        self
    }

    pub fn with_heir(mut self, heir: impl Into<String>) -> Self {
        self.heir = heir.into();
        self
    }

    /// Character node attributes derived from this row
    pub fn to_character(&self) -> Character {
        Character {
            name: self.char_name.clone(),
            title: self.title.clone(),
            gender: Gender::from_male_flag(self.male),
            culture: self.culture.clone(),
            age: self.age.unwrap_or(UNKNOWN_AGE),
            alive: self.is_alive,
        }
    }
}

/// Returns the field value when it is not the "absent" sentinel
pub(crate) fn present(field: &str) -> Option<&str> {
    if field.is_empty() {
        None
    } else {
        Some(field)
    }
}
