//! Dice combat between two territories.
//!
//! One call resolves one round of an attack: both sides roll, dice are
//! compared pairwise in roll order, losses are applied, and a defender left
//! with no troops is conquered. Dice are never sorted before pairing and the
//! defender wins ties.

use tracing::debug;

use super::dice::DiceSource;
use crate::board::state::TerritoryMap;
use crate::board::territory::Territory;

/// Maximum dice an attacker may roll in one round.
pub const MAX_ATTACK_DICE: usize = 3;

/// Maximum dice a defender may roll in one round.
pub const MAX_DEFENSE_DICE: usize = 2;

/// Why an attack was not carried out. Neither case mutates the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRejection {
    /// The attacker has fewer than 2 troops and must keep one behind.
    InsufficientForce { troops: u32 },
    /// The defender already has no troops left.
    DefenderEliminated,
}

/// Dice and losses of a resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub attacker_dice: Vec<u8>,
    pub defender_dice: Vec<u8>,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    /// The defender fell and changed hands.
    pub conquered: bool,
}

/// Result of a single `resolve_attack` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatOutcome {
    Rejected(AttackRejection),
    Resolved(BattleReport),
}

impl CombatOutcome {
    /// Returns true if the round ended in a conquest.
    pub fn is_conquest(&self) -> bool {
        matches!(self, CombatOutcome::Resolved(report) if report.conquered)
    }

    /// Returns the battle report, if the attack went ahead.
    pub fn report(&self) -> Option<&BattleReport> {
        match self {
            CombatOutcome::Resolved(report) => Some(report),
            CombatOutcome::Rejected(_) => None,
        }
    }
}

/// Dice rolled by an attacker with `troops` troops: one troop always stays home.
pub fn attack_dice_count(troops: u32) -> usize {
    (troops.saturating_sub(1) as usize).min(MAX_ATTACK_DICE)
}

/// Dice rolled by a defender with `troops` troops.
pub fn defense_dice_count(troops: u32) -> usize {
    (troops as usize).min(MAX_DEFENSE_DICE)
}

/// Returns true if the attacking die beats the defending one.
fn attacker_wins(attack: u8, defense: u8) -> bool {
    attack > defense
}

/// Resolves one round of combat, mutating both territories in place.
///
/// The caller guarantees `attacker` and `defender` are different
/// territories. Rejections leave both untouched.
pub fn resolve_attack<D: DiceSource + ?Sized>(
    attacker: &mut Territory,
    defender: &mut Territory,
    dice: &mut D,
) -> CombatOutcome {
    if attacker.troops < 2 {
        return CombatOutcome::Rejected(AttackRejection::InsufficientForce {
            troops: attacker.troops,
        });
    }
    if defender.troops == 0 {
        return CombatOutcome::Rejected(AttackRejection::DefenderEliminated);
    }

    let attack_count = attack_dice_count(attacker.troops);
    let defense_count = defense_dice_count(defender.troops);

    let attacker_dice: Vec<u8> = (0..attack_count).map(|_| dice.roll()).collect();
    let defender_dice: Vec<u8> = (0..defense_count).map(|_| dice.roll()).collect();

    let mut attacker_losses = 0u32;
    let mut defender_losses = 0u32;
    for (&a, &d) in attacker_dice.iter().zip(defender_dice.iter()) {
        if attacker_wins(a, d) {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
    }

    attacker.troops = attacker.troops.saturating_sub(attacker_losses).max(1);
    defender.troops = defender.troops.saturating_sub(defender_losses);

    // Clamp first, then check conquest, then move the garrison in.
    let conquered = defender.troops == 0;
    if conquered {
        defender.owner = attacker.owner.clone();
        defender.troops = 1;
        attacker.troops = attacker.troops.saturating_sub(1);
    }

    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        ?attacker_dice,
        ?defender_dice,
        attacker_losses,
        defender_losses,
        conquered,
        "battle resolved"
    );

    CombatOutcome::Resolved(BattleReport {
        attacker_dice,
        defender_dice,
        attacker_losses,
        defender_losses,
        conquered,
    })
}

/// Resolves an attack between two map positions (0-based, distinct).
pub fn resolve_on_map<D: DiceSource + ?Sized>(
    map: &mut TerritoryMap,
    attacker: usize,
    defender: usize,
    dice: &mut D,
) -> CombatOutcome {
    let (a, d) = map.pair_mut(attacker, defender);
    resolve_attack(a, d, dice)
}
