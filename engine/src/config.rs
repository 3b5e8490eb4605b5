//! Map configuration.
//!
//! The starting layout is a table of `(name, owner, troops)` rows plus the
//! player and target faction labels. The standard five-territory layout is
//! built in; other layouts are read from JSON files of the same shape.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::territory::Faction;

/// Errors that can occur while loading or validating a map configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read map file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map has no territories")]
    EmptyMap,

    #[error("territory '{0}' starts with no troops")]
    NoTroops(String),

    #[error("duplicate territory name '{0}'")]
    DuplicateName(String),
}

/// One row of the starting layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryConfig {
    pub name: String,
    pub owner: Faction,
    pub troops: u32,
}

impl TerritoryConfig {
    pub fn new(name: &str, owner: &str, troops: u32) -> Self {
        TerritoryConfig {
            name: name.to_string(),
            owner: Faction::new(owner),
            troops,
        }
    }
}

/// The starting layout and the factions the secret mission binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// The faction the human player commands.
    pub player: Faction,
    /// The faction a destroy mission targets.
    pub target: Faction,
    pub territories: Vec<TerritoryConfig>,
}

impl MapConfig {
    /// The built-in five-territory layout. Verde is present so that the
    /// destroy mission always has something to destroy.
    pub fn standard() -> Self {
        MapConfig {
            player: Faction::new("Azul"),
            target: Faction::new("Verde"),
            territories: vec![
                TerritoryConfig::new("Alaska", "Azul", 3),
                TerritoryConfig::new("Groenlandia", "Vermelho", 2),
                TerritoryConfig::new("Brasil", "Azul", 4),
                TerritoryConfig::new("Africa do Sul", "Vermelho", 3),
                TerritoryConfig::new("Siberia", "Verde", 2),
            ],
        }
    }

    /// Parses and validates a layout from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a layout from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that the layout can seed a playable map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.territories.is_empty() {
            return Err(ConfigError::EmptyMap);
        }
        for (i, row) in self.territories.iter().enumerate() {
            if row.troops == 0 {
                return Err(ConfigError::NoTroops(row.name.clone()));
            }
            if self.territories[..i].iter().any(|r| r.name == row.name) {
                return Err(ConfigError::DuplicateName(row.name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::standard()
    }
}
