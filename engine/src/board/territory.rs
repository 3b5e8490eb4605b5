//! Territories and faction labels.
//!
//! A territory is a named map cell held by one faction with a garrison of
//! troops. Names are fixed at setup; owner and troops change through combat.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A label identifying which side owns a territory.
///
/// Labels come from the map configuration, so factions are open-ended
/// strings rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faction(String);

impl Faction {
    pub fn new(label: impl Into<String>) -> Self {
        Faction(label.into())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Faction {
    fn from(label: &str) -> Self {
        Faction::new(label)
    }
}

/// A named map cell with an owning faction and a troop count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    name: String,
    pub owner: Faction,
    pub troops: u32,
}

impl Territory {
    /// Creates a territory. The name cannot change afterwards.
    pub fn new(name: impl Into<String>, owner: Faction, troops: u32) -> Self {
        Territory {
            name: name.into(),
            owner,
            troops,
        }
    }

    /// Returns the display name of this territory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if `faction` currently holds this territory.
    pub fn is_owned_by(&self, faction: &Faction) -> bool {
        self.owner == *faction
    }
}
