//! Battle odds CLI.
//!
//! Simulates repeated assaults of one territory on another and outputs the
//! per-trial records as JSONL, with a summary logged to stderr.
//!
//! Usage:
//!   cargo run --release --bin odds -- [OPTIONS]
//!
//! Options:
//!   --attackers N   Troops in the attacking territory (default: 3)
//!   --defenders N   Troops in the defending territory (default: 2)
//!   --trials N      Number of assaults to simulate (default: 10000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use conquest::odds::{self, OddsConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conquest=info,odds=info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = OddsConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let result = match args[i].as_str() {
            "--attackers" => next_value(&args, &mut i).map(|v| config.attackers = v),
            "--defenders" => next_value(&args, &mut i).map(|v| config.defenders = v),
            "--trials" => next_value(&args, &mut i).map(|v| config.trials = v),
            "--threads" => next_value(&args, &mut i).map(|v| config.threads = v),
            "--seed" => next_value(&args, &mut i).map(|v| config.seed = v),
            "--output" => {
                i += 1;
                match args.get(i) {
                    Some(path) => {
                        output_path = Some(path.clone());
                        Ok(())
                    }
                    None => Err("missing --output value".to_string()),
                }
            }
            "--quiet" => {
                config.quiet = true;
                Ok(())
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => Err(format!("unknown argument: {}", other)),
        };
        if let Err(msg) = result {
            error!("{}", msg);
            print_usage();
            process::exit(1);
        }
        i += 1;
    }

    let start = Instant::now();
    let records = match odds::run_trials(&config) {
        Ok(r) => r,
        Err(e) => {
            error!("failed to build thread pool: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        info!(
            "Completed {} trials in {:.2}s",
            records.len(),
            elapsed.as_secs_f64()
        );
        odds::log_summary(&config, &odds::summarize(&records));
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            odds::write_jsonl(&records, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            odds::write_jsonl(&records, &mut writer)
        }
    };
    match written {
        Ok(()) => {
            if let (Some(path), false) = (&output_path, config.quiet) {
                info!("Wrote {} trials to {}", records.len(), path);
            }
        }
        Err(e) => {
            error!("failed to write output: {}", e);
            process::exit(1);
        }
    }
}

/// Advances past a flag and parses its value.
fn next_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("missing {} value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn print_usage() {
    eprintln!("Usage: odds [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --attackers N    Troops in the attacking territory (default: 3)");
    eprintln!("  --defenders N    Troops in the defending territory (default: 2)");
    eprintln!("  --trials N       Number of assaults to simulate (default: 10000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
