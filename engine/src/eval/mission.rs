//! Secret missions and victory checks.
//!
//! A mission is drawn once per game and binds to the player faction and, for
//! the destroy mission, to a target faction. Checking a mission never
//! mutates the map.

use rand::Rng;

use crate::board::state::TerritoryMap;
use crate::board::territory::Faction;

/// The kinds of secret mission a game can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mission {
    /// Leave the target faction with no territories.
    DestroyFaction,
    /// Hold at least as many territories as the map has.
    ConquerCount,
}

/// All mission variants, in draw order.
pub const ALL_MISSIONS: [Mission; 2] = [Mission::DestroyFaction, Mission::ConquerCount];

/// Picks a mission uniformly at random.
pub fn draw_mission<R: Rng + ?Sized>(rng: &mut R) -> Mission {
    ALL_MISSIONS[rng.gen_range(0..ALL_MISSIONS.len())]
}

/// Returns true if no territory is held by `target`. Vacuously true for a
/// faction that never existed.
pub fn faction_destroyed(map: &TerritoryMap, target: &Faction) -> bool {
    !map.has_presence(target)
}

/// Returns true if `player` holds at least `goal` territories.
pub fn holds_at_least(map: &TerritoryMap, player: &Faction, goal: usize) -> bool {
    map.count_owned_by(player) >= goal
}

/// Returns true if `mission` is currently fulfilled.
///
/// The conquer mission's goal is the full map size, so it only completes
/// once `player` owns every territory.
pub fn is_mission_complete(
    map: &TerritoryMap,
    mission: Mission,
    player: &Faction,
    target: &Faction,
) -> bool {
    match mission {
        Mission::DestroyFaction => faction_destroyed(map, target),
        Mission::ConquerCount => holds_at_least(map, player, map.len()),
    }
}

/// A mission bound to its factions for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMission {
    pub mission: Mission,
    pub player: Faction,
    pub target: Faction,
    /// Territories the player must hold for `ConquerCount`. Fixed from the
    /// map size when the mission is assigned.
    pub conquer_goal: usize,
}

impl SecretMission {
    /// Binds `mission` to the given factions on `map`.
    pub fn assign(mission: Mission, map: &TerritoryMap, player: Faction, target: Faction) -> Self {
        SecretMission {
            mission,
            player,
            target,
            conquer_goal: map.len(),
        }
    }

    /// Returns true if the mission is fulfilled on `map`.
    pub fn is_complete(&self, map: &TerritoryMap) -> bool {
        match self.mission {
            Mission::DestroyFaction => faction_destroyed(map, &self.target),
            Mission::ConquerCount => holds_at_least(map, &self.player, self.conquer_goal),
        }
    }
}
