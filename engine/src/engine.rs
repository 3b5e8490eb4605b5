//! Game session state.
//!
//! Holds the territory map, the secret mission, and the dice for one game,
//! and handles each menu command by calling into the core and writing the
//! rendered result. Player-facing territory numbers are 1-based and are
//! validated here before the core sees them.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::board::state::{build_initial_map, TerritoryMap};
use crate::config::{ConfigError, MapConfig};
use crate::eval::mission::{draw_mission, Mission, SecretMission};
use crate::protocol::report::{write_battle_header, write_map, write_mission, write_outcome};
use crate::resolve::combat::{resolve_on_map, CombatOutcome};
use crate::resolve::dice::{Dice, DiceSource};

/// Holds the mutable state of one game between commands.
pub struct Engine<D: DiceSource = Dice> {
    pub map: TerritoryMap,
    pub mission: SecretMission,
    dice: D,
}

impl Engine<Dice> {
    /// Starts a game on the configured map with a randomly drawn mission.
    pub fn new(config: &MapConfig, mut dice: Dice) -> Result<Self, ConfigError> {
        let mission = draw_mission(dice.rng_mut());
        Self::with_mission(config, mission, dice)
    }
}

impl<D: DiceSource> Engine<D> {
    /// Starts a game with a fixed mission.
    pub fn with_mission(config: &MapConfig, mission: Mission, dice: D) -> Result<Self, ConfigError> {
        let map = build_initial_map(config)?;
        let mission = SecretMission::assign(
            mission,
            &map,
            config.player.clone(),
            config.target.clone(),
        );
        info!(
            territories = map.len(),
            player = %mission.player,
            "new game started"
        );
        debug!(mission = ?mission.mission, "secret mission assigned");
        Ok(Engine { map, mission, dice })
    }

    /// Returns true if the 1-based selection names two distinct territories.
    pub fn is_valid_selection(&self, attacker: usize, defender: usize) -> bool {
        let n = self.map.len();
        (1..=n).contains(&attacker) && (1..=n).contains(&defender) && attacker != defender
    }

    /// Handles an attack between 1-based territory numbers.
    ///
    /// Returns `None` when the selection is invalid; nothing is rolled then.
    pub fn handle_attack<W: Write>(
        &mut self,
        out: &mut W,
        attacker: usize,
        defender: usize,
    ) -> io::Result<Option<CombatOutcome>> {
        if !self.is_valid_selection(attacker, defender) {
            writeln!(
                out,
                "Invalid selection: choose two different territories from 1 to {}.",
                self.map.len()
            )?;
            return Ok(None);
        }

        let (a, d) = (attacker - 1, defender - 1);
        write_battle_header(out, &self.map[a], &self.map[d])?;
        let outcome = resolve_on_map(&mut self.map, a, d, &mut self.dice);
        write_outcome(out, &self.map[a], &self.map[d], &outcome)?;
        out.flush()?;
        Ok(Some(outcome))
    }

    /// Checks the secret mission. Returns true once the game is won.
    pub fn handle_check<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        let won = self.mission.is_complete(&self.map);
        if won {
            info!(player = %self.mission.player, "mission complete");
            writeln!(out, "Congratulations! You fulfilled your secret mission. VICTORY!")?;
        } else {
            writeln!(out, "Mission not fulfilled yet. Keep attacking!")?;
            write_mission(out, &self.mission)?;
        }
        out.flush()?;
        Ok(won)
    }

    /// Writes the current map.
    pub fn handle_map<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_map(out, &self.map)?;
        out.flush()
    }

    /// Writes the secret mission.
    pub fn handle_mission<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_mission(out, &self.mission)?;
        out.flush()
    }

    /// Writes the menu.
    pub fn handle_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "==================== MENU ====================")?;
        writeln!(out, "1 [attacker] [defender] - Attack (territories 1 to {})", self.map.len())?;
        writeln!(out, "2                       - Check mission")?;
        writeln!(out, "mission                 - Show mission")?;
        writeln!(out, "map                     - Show map")?;
        writeln!(out, "0                       - Quit")?;
        out.flush()
    }
}
