//! Person payload attached to character articles.

use serde::{Deserialize, Serialize};

crate::string_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        NonBinary => "non_binary",
        Other => "other",
        Unknown => "unknown",
    }
}

crate::string_enum! {
    pub enum LifeStatus {
        Alive => "alive",
        Dead => "dead",
        Missing => "missing",
        Unknown => "unknown",
        Undead => "undead",
        Immortal => "immortal",
    }
}

impl Default for LifeStatus {
    fn default() -> Self {
        LifeStatus::Unknown
    }
}

/// Status given to relationships added without one.
pub const DEFAULT_RELATIONSHIP_STATUS: &str = "active";

/// A dated event in a character's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantDate {
    pub date: String,
    pub event: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A link from a character to another person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub person_name: String,
    pub relationship_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_relationship_status")]
    pub status: String,
}

fn default_relationship_status() -> String {
    DEFAULT_RELATIONSHIP_STATUS.to_string()
}

/// Structured data for a character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonData {
    pub race: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub life_status: LifeStatus,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub distinguishing_marks: Vec<String>,
    pub birthplace: Option<String>,
    pub current_location: Option<String>,
    pub occupation: Option<String>,
    pub social_class: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub important_dates: Vec<ImportantDate>,
    pub relationships: Vec<Relationship>,
    pub skills: Vec<String>,
    pub abilities: Vec<String>,
    pub personality_traits: Vec<String>,
    pub goals: Vec<String>,
    pub fears: Vec<String>,
    pub secrets: Vec<String>,
    pub notable_possessions: Vec<String>,
    pub wealth: Option<String>,
    pub organizations: Vec<String>,
    pub titles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_life_status_is_unknown() {
        assert_eq!(PersonData::default().life_status, LifeStatus::Unknown);
    }

    #[test]
    fn relationship_status_defaults_to_active() {
        let rel: Relationship = serde_json::from_value(serde_json::json!({
            "person_name": "Aldric",
            "relationship_type": "brother"
        }))
        .unwrap();
        assert_eq!(rel.status, DEFAULT_RELATIONSHIP_STATUS);
        assert!(rel.description.is_none());
    }

    #[test]
    fn gender_wire_tags() {
        assert_eq!(
            serde_json::to_value(Gender::NonBinary).unwrap(),
            serde_json::json!("non_binary")
        );
    }
}
