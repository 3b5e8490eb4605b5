//! Combat resolution.
//!
//! Rolls dice for an attack between two territories, applies losses, and
//! transfers ownership on conquest.

pub mod combat;
pub mod dice;

pub use combat::{
    attack_dice_count, defense_dice_count, resolve_attack, resolve_on_map, AttackRejection,
    BattleReport, CombatOutcome, MAX_ATTACK_DICE, MAX_DEFENSE_DICE,
};
pub use dice::{Dice, DiceSource, ScriptedDice};
