use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The browsable categories of the reference dataset.
///
/// This is a closed set: nothing outside these three variants may be
/// persisted or queried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Character,
    Episode,
    Location,
}

/// Returned when a string does not name one of the three entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entity type: {0:?}")]
pub struct InvalidEntityType(pub String);

impl EntityType {
    pub const ALL: [EntityType; 3] = [
        EntityType::Character,
        EntityType::Episode,
        EntityType::Location,
    ];

    /// Returns the lowercase name used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Character => "character",
            EntityType::Episode => "episode",
            EntityType::Location => "location",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = InvalidEntityType;

    // Exact match only: "Character" or " episode" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(EntityType::Character),
            "episode" => Ok(EntityType::Episode),
            "location" => Ok(EntityType::Location),
            other => Err(InvalidEntityType(other.to_string())),
        }
    }
}
