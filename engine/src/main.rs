//! Conquest -- an interactive territory-conquest game.
//!
//! Reads menu commands from stdin and writes the map, battle reports, and
//! mission checks to stdout. Logs go to stderr.
//!
//! Usage:
//!   conquest [OPTIONS]
//!
//! Options:
//!   --map FILE                 JSON map layout (default: built-in layout)
//!   --seed N                   Random seed, 0 for entropy (default: 0)
//!   --mission destroy|conquer  Fix the secret mission instead of drawing it
//!   --help                     Show this help

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use tracing::error;
use tracing_subscriber::EnvFilter;

use conquest::config::MapConfig;
use conquest::engine::Engine;
use conquest::eval::Mission;
use conquest::protocol::parser::{parse_command, parse_territory_number, Command};
use conquest::resolve::{Dice, DiceSource};

/// Command-line options for a session.
#[derive(Debug, Default)]
struct Options {
    map_path: Option<String>,
    seed: u64,
    mission: Option<Mission>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conquest=warn")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            error!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    let config = match &options.map_path {
        Some(path) => MapConfig::load(path),
        None => Ok(MapConfig::standard()),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let dice = if options.seed != 0 {
        Dice::seeded(options.seed)
    } else {
        Dice::from_entropy()
    };
    let engine = match options.mission {
        Some(mission) => Engine::with_mission(&config, mission, dice),
        None => Engine::new(&config, dice),
    };
    let mut engine = match engine {
        Ok(e) => e,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(e) = run_session(&mut engine, &mut stdin.lock().lines(), &mut out) {
        error!("session aborted: {}", e);
        process::exit(1);
    }
}

/// Runs the menu loop until the player quits, wins, or input ends.
fn run_session<D, I, W>(engine: &mut Engine<D>, lines: &mut I, out: &mut W) -> io::Result<()>
where
    D: DiceSource,
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    writeln!(out, "--- WELCOME TO CONQUEST ---")?;
    engine.handle_mission(out)?;

    loop {
        engine.handle_map(out)?;
        engine.handle_help(out)?;
        write!(out, "Choose an option: ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => {
                writeln!(out, "Invalid option. Type 1, 2 or 0.")?;
                continue;
            }
        };

        match cmd {
            Command::Attack { attacker, defender } => {
                let attacker = match attacker {
                    Some(n) => Some(n),
                    None => prompt_number(out, lines, "Attacking territory", engine.map.len())?,
                };
                let defender = match (attacker, defender) {
                    (_, Some(n)) => Some(n),
                    (Some(_), None) => {
                        prompt_number(out, lines, "Defending territory", engine.map.len())?
                    }
                    (None, None) => None,
                };
                match (attacker, defender) {
                    (Some(a), Some(d)) => {
                        engine.handle_attack(out, a, d)?;
                    }
                    _ => writeln!(out, "Attack cancelled.")?,
                }
            }
            Command::Check => {
                if engine.handle_check(out)? {
                    break;
                }
            }
            Command::Mission => engine.handle_mission(out)?,
            Command::Map => engine.handle_map(out)?,
            Command::Help => engine.handle_help(out)?,
            Command::Quit => {
                writeln!(out, "Leaving the game. Thanks for playing!")?;
                break;
            }
        }
    }

    out.flush()
}

/// Prompts for a 1-based territory number. Returns `None` on bad input or
/// end of input.
fn prompt_number<I, W>(out: &mut W, lines: &mut I, label: &str, max: usize) -> io::Result<Option<usize>>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    write!(out, "{} (1 to {}): ", label, max)?;
    out.flush()?;
    match lines.next() {
        Some(line) => Ok(parse_territory_number(&line?)),
        None => Ok(None),
    }
}

/// Parses command-line arguments. Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--map" => {
                i += 1;
                let path = args.get(i).ok_or("missing --map value")?;
                options.map_path = Some(path.clone());
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("missing --seed value")?;
                options.seed = value
                    .parse()
                    .map_err(|_| format!("invalid --seed value: '{}'", value))?;
            }
            "--mission" => {
                i += 1;
                let value = args.get(i).ok_or("missing --mission value")?;
                options.mission = Some(match value.as_str() {
                    "destroy" => Mission::DestroyFaction,
                    "conquer" => Mission::ConquerCount,
                    other => return Err(format!("unknown mission: '{}'", other)),
                });
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(options))
}

fn print_usage() {
    eprintln!("Usage: conquest [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --map FILE                 JSON map layout (default: built-in layout)");
    eprintln!("  --seed N                   Random seed, 0 for entropy (default: 0)");
    eprintln!("  --mission destroy|conquer  Fix the secret mission instead of drawing it");
    eprintln!("  --help                     Show this help");
}
