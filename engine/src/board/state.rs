//! Territory map state.
//!
//! Holds the ordered, fixed-size set of territories for one game. The map is
//! built once from a `MapConfig`, mutated in place by combat, and never
//! resized. Indices are 0-based here; the 1-based numbering shown to players
//! lives in the session layer.

use std::ops::Index;

use super::territory::{Faction, Territory};
use crate::config::{ConfigError, MapConfig};

/// The ordered collection of territories in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryMap {
    territories: Vec<Territory>,
}

impl TerritoryMap {
    /// Creates a map directly from territories, bypassing config validation.
    pub fn from_territories(territories: Vec<Territory>) -> Self {
        TerritoryMap { territories }
    }

    /// Number of territories on the map.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Returns the territory at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&Territory> {
        self.territories.get(idx)
    }

    /// Iterates over territories in map order.
    pub fn iter(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    /// Borrows two distinct territories mutably at once.
    ///
    /// Panics if the indices are equal or out of range; callers validate
    /// selections before reaching the map.
    pub fn pair_mut(&mut self, first: usize, second: usize) -> (&mut Territory, &mut Territory) {
        assert_ne!(first, second, "a territory cannot be paired with itself");
        assert!(
            first < self.len() && second < self.len(),
            "territory index out of range"
        );
        if first < second {
            let (head, tail) = self.territories.split_at_mut(second);
            (&mut head[first], &mut tail[0])
        } else {
            let (head, tail) = self.territories.split_at_mut(first);
            (&mut tail[0], &mut head[second])
        }
    }

    /// Counts territories currently held by `faction`.
    pub fn count_owned_by(&self, faction: &Faction) -> usize {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(faction))
            .count()
    }

    /// Returns true if `faction` holds at least one territory.
    pub fn has_presence(&self, faction: &Faction) -> bool {
        self.territories.iter().any(|t| t.is_owned_by(faction))
    }
}

impl Index<usize> for TerritoryMap {
    type Output = Territory;

    fn index(&self, idx: usize) -> &Territory {
        &self.territories[idx]
    }
}

/// Builds the starting map from a layout table.
pub fn build_initial_map(config: &MapConfig) -> Result<TerritoryMap, ConfigError> {
    config.validate()?;
    let territories = config
        .territories
        .iter()
        .map(|row| Territory::new(row.name.as_str(), row.owner.clone(), row.troops))
        .collect();
    Ok(TerritoryMap { territories })
}
