//! Text rendering for the game menu.
//!
//! Formats the map table, battle reports, rejections, and mission text.
//! All writers take a generic `Write` so sessions and tests share them.

use std::io::{self, Write};

use crate::board::state::TerritoryMap;
use crate::board::territory::Territory;
use crate::eval::mission::{Mission, SecretMission};
use crate::resolve::combat::{AttackRejection, BattleReport, CombatOutcome};

const RULE: &str = "============================================";

/// Writes the map as a numbered table (1-based, as players select them).
pub fn write_map<W: Write>(out: &mut W, map: &TerritoryMap) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "              CURRENT MAP")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "| # | Name                  | Army          | Troops |")?;
    writeln!(out, "|---|-----------------------|---------------|--------|")?;
    for (i, t) in map.iter().enumerate() {
        writeln!(
            out,
            "| {} | {:<21} | {:<13} | {:<6} |",
            i + 1,
            t.name(),
            t.owner.as_str(),
            t.troops
        )?;
    }
    writeln!(out, "{}", RULE)
}

/// Returns the one-line description of a secret mission.
pub fn mission_text(secret: &SecretMission) -> String {
    match secret.mission {
        Mission::DestroyFaction => format!(
            "Destroy the {} army and conquer all of its territories.",
            secret.target
        ),
        Mission::ConquerCount => format!(
            "Hold {} territories (the entire map) with the {} army.",
            secret.conquer_goal, secret.player
        ),
    }
}

/// Writes the secret mission block.
pub fn write_mission<W: Write>(out: &mut W, secret: &SecretMission) -> io::Result<()> {
    writeln!(out, "Your secret mission:")?;
    writeln!(out, "  -> {}", mission_text(secret))?;
    writeln!(out, "-------------------------------------------")
}

/// Writes the line announcing a battle, before any dice are rolled.
pub fn write_battle_header<W: Write>(
    out: &mut W,
    attacker: &Territory,
    defender: &Territory,
) -> io::Result<()> {
    writeln!(
        out,
        "Battle: {} ({}, {} troops) vs {} ({}, {} troops)",
        attacker.name(),
        attacker.owner,
        attacker.troops,
        defender.name(),
        defender.owner,
        defender.troops
    )
}

/// Writes a rejected attack.
pub fn write_rejection<W: Write>(
    out: &mut W,
    attacker: &Territory,
    defender: &Territory,
    rejection: AttackRejection,
) -> io::Result<()> {
    match rejection {
        AttackRejection::InsufficientForce { .. } => writeln!(
            out,
            "{} needs at least 2 troops to attack (insufficient attacking force).",
            attacker.name()
        ),
        AttackRejection::DefenderEliminated => writeln!(
            out,
            "{} has no troops left; defender already eliminated, no action needed.",
            defender.name()
        ),
    }
}

fn format_dice(dice: &[u8]) -> String {
    dice.iter()
        .map(|d| format!("[{}]", d))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the dice, losses, and final troop counts of a resolved round.
/// `attacker` and `defender` are the territories after resolution.
pub fn write_battle_report<W: Write>(
    out: &mut W,
    attacker: &Territory,
    defender: &Territory,
    report: &BattleReport,
) -> io::Result<()> {
    writeln!(
        out,
        "Attacker rolls {} dice, defender rolls {} dice.",
        report.attacker_dice.len(),
        report.defender_dice.len()
    )?;
    writeln!(out, "Attacker dice: {}", format_dice(&report.attacker_dice))?;
    writeln!(out, "Defender dice: {}", format_dice(&report.defender_dice))?;
    writeln!(out, "Attacker losses ({}): {}", attacker.name(), report.attacker_losses)?;
    writeln!(out, "Defender losses ({}): {}", defender.name(), report.defender_losses)?;
    if report.conquered {
        writeln!(out, "CONQUEST! {} lost all of its troops.", defender.name())?;
        writeln!(out, "{} now holds {}.", defender.owner, defender.name())?;
    } else {
        writeln!(out, "The defense of {} held.", defender.name())?;
    }
    writeln!(
        out,
        "Final state: {} ({} troops) | {} ({} troops)",
        attacker.name(),
        attacker.troops,
        defender.name(),
        defender.troops
    )
}

/// Writes either the rejection or the full report for `outcome`.
pub fn write_outcome<W: Write>(
    out: &mut W,
    attacker: &Territory,
    defender: &Territory,
    outcome: &CombatOutcome,
) -> io::Result<()> {
    match outcome {
        CombatOutcome::Rejected(rejection) => write_rejection(out, attacker, defender, *rejection),
        CombatOutcome::Resolved(report) => write_battle_report(out, attacker, defender, report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::build_initial_map;
    use crate::board::territory::Faction;
    use crate::config::MapConfig;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn map_table_lists_every_territory() {
        let map = build_initial_map(&MapConfig::standard()).unwrap();
        let text = render(|out| write_map(out, &map));
        assert!(text.contains("| 1 | Alaska                | Azul          | 3      |"));
        assert!(text.contains("| 5 | Siberia               | Verde         | 2      |"));
        assert_eq!(text.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| #")).count(), 5);
    }

    #[test]
    fn mission_texts() {
        let map = build_initial_map(&MapConfig::standard()).unwrap();
        let destroy = SecretMission::assign(
            Mission::DestroyFaction,
            &map,
            Faction::new("Azul"),
            Faction::new("Verde"),
        );
        assert_eq!(
            mission_text(&destroy),
            "Destroy the Verde army and conquer all of its territories."
        );
        let conquer = SecretMission {
            mission: Mission::ConquerCount,
            ..destroy
        };
        assert!(mission_text(&conquer).contains("Hold 5 territories"));
    }

    #[test]
    fn report_shows_dice_and_conquest() {
        let attacker = Territory::new("Alaska", Faction::new("Azul"), 2);
        let defender = Territory::new("Siberia", Faction::new("Azul"), 1);
        let report = BattleReport {
            attacker_dice: vec![6, 5],
            defender_dice: vec![1, 2],
            attacker_losses: 0,
            defender_losses: 2,
            conquered: true,
        };
        let text = render(|out| write_battle_report(out, &attacker, &defender, &report));
        assert!(text.contains("Attacker dice: [6] [5]"));
        assert!(text.contains("Defender dice: [1] [2]"));
        assert!(text.contains("CONQUEST!"));
        assert!(text.contains("Azul now holds Siberia."));
        assert!(text.contains("Final state: Alaska (2 troops) | Siberia (1 troops)"));
    }

    #[test]
    fn rejection_messages() {
        let attacker = Territory::new("Alaska", Faction::new("Azul"), 1);
        let defender = Territory::new("Siberia", Faction::new("Verde"), 0);
        let weak = render(|out| {
            write_outcome(
                out,
                &attacker,
                &defender,
                &CombatOutcome::Rejected(AttackRejection::InsufficientForce { troops: 1 }),
            )
        });
        assert!(weak.contains("insufficient attacking force"));
        let empty = render(|out| {
            write_rejection(out, &attacker, &defender, AttackRejection::DefenderEliminated)
        });
        assert!(empty.contains("defender already eliminated"));
    }
}
