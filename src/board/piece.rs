//! Buildings and tokens.
//!
//! Buildings occupy a clearing's slots and count toward rule; tokens are
//! faction-scoped markers (the keep, wood) that do not.

use serde::{Deserialize, Serialize};

use super::clearing::FactionName;

/// The type of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    Workshop,
    Sawmill,
    Recruiter,
    Roost,
}

impl BuildingType {
    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            BuildingType::Workshop => "workshop",
            BuildingType::Sawmill => "sawmill",
            BuildingType::Recruiter => "recruiter",
            BuildingType::Roost => "roost",
        }
    }
}

/// A placed building. `used` marks it as spent for the current round
/// (crafting, wood production) and is cleared at the end of every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Building {
    pub building_type: BuildingType,
    pub owner: FactionName,
    pub used: bool,
}

impl Building {
    /// Creates an unused building.
    pub const fn new(building_type: BuildingType, owner: FactionName) -> Self {
        Building {
            building_type,
            owner,
            used: false,
        }
    }
}

/// A faction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Keep,
    Wood,
}
