//! Menu command parser.
//!
//! Parses lines typed at the game menu into structured `Command` variants
//! that the session loop can dispatch on. The numeric shortcuts mirror the
//! printed menu (`1` attack, `2` check mission, `0` quit).

use tracing::warn;

/// A parsed menu command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Attack with 1-based territory numbers. Missing numbers are prompted
    /// for by the caller.
    Attack {
        attacker: Option<usize>,
        defender: Option<usize>,
    },

    /// Check whether the secret mission is fulfilled.
    Check,

    /// Show the secret mission.
    Mission,

    /// Show the current map.
    Map,

    /// Show the menu.
    Help,

    /// Leave the game.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = tokens.first()?;

    match first.to_ascii_lowercase().as_str() {
        "1" | "attack" | "a" => parse_attack(&tokens),
        "2" | "check" | "c" => Some(Command::Check),
        "mission" => Some(Command::Mission),
        "map" | "m" => Some(Command::Map),
        "help" | "h" | "?" => Some(Command::Help),
        "0" | "quit" | "q" | "exit" => Some(Command::Quit),
        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `attack [attacker] [defender]`.
fn parse_attack(tokens: &[&str]) -> Option<Command> {
    if tokens.len() > 3 {
        warn!("malformed attack: expected 'attack [attacker] [defender]'");
        return None;
    }
    let attacker = match tokens.get(1) {
        Some(t) => Some(parse_territory_number(t)?),
        None => None,
    };
    let defender = match tokens.get(2) {
        Some(t) => Some(parse_territory_number(t)?),
        None => None,
    };
    Some(Command::Attack { attacker, defender })
}

/// Parses a 1-based territory number as typed by the player. Range checks
/// happen in the session, which knows the map size.
pub fn parse_territory_number(token: &str) -> Option<usize> {
    match token.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("invalid territory number: '{}'", token.trim());
            None
        }
    }
}
