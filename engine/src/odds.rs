//! Battle odds estimation.
//!
//! Replays a full assault many times: an attacking territory keeps rolling
//! against one defender until it conquers it or can no longer attack. Each
//! trial is recorded so the results can be summarized or written out as
//! JSONL for offline analysis.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::state::TerritoryMap;
use crate::board::territory::{Faction, Territory};
use crate::resolve::combat::{resolve_on_map, CombatOutcome};
use crate::resolve::dice::{Dice, DiceSource};

/// Configuration for an odds run.
#[derive(Debug, Clone)]
pub struct OddsConfig {
    /// Troops in the attacking territory at the start of each trial.
    pub attackers: u32,
    /// Troops in the defending territory at the start of each trial.
    pub defenders: u32,
    /// Number of assaults to simulate.
    pub trials: usize,
    /// Number of parallel threads.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress progress logging.
    pub quiet: bool,
}

impl Default for OddsConfig {
    fn default() -> Self {
        OddsConfig {
            attackers: 3,
            defenders: 2,
            trials: 10_000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// The result of one simulated assault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRecord {
    pub trial_id: usize,
    /// Rounds of combat fought, not counting the final rejection.
    pub rounds: u32,
    pub conquered: bool,
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
}

/// Aggregate statistics over a set of trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsSummary {
    pub trials: usize,
    pub conquests: usize,
    pub conquest_rate: f64,
    pub avg_rounds: f64,
    pub avg_attacker_remaining: f64,
}

/// Runs one assault from fresh territories until conquest or rejection.
pub fn run_trial<D: DiceSource + ?Sized>(
    trial_id: usize,
    attackers: u32,
    defenders: u32,
    dice: &mut D,
) -> TrialRecord {
    let mut map = TerritoryMap::from_territories(vec![
        Territory::new("Attacker", Faction::new("Attacker"), attackers),
        Territory::new("Defender", Faction::new("Defender"), defenders),
    ]);

    let mut rounds = 0;
    let conquered = loop {
        match resolve_on_map(&mut map, 0, 1, dice) {
            CombatOutcome::Resolved(report) => {
                rounds += 1;
                if report.conquered {
                    break true;
                }
            }
            CombatOutcome::Rejected(_) => break false,
        }
    };

    TrialRecord {
        trial_id,
        rounds,
        conquered,
        attacker_remaining: map[0].troops,
        defender_remaining: map[1].troops,
    }
}

fn trial_dice(seed: u64, trial_id: usize) -> Dice {
    if seed != 0 {
        Dice::seeded(seed.wrapping_add(trial_id as u64))
    } else {
        Dice::from_entropy()
    }
}

/// Runs all trials, returning records ordered by trial id.
///
/// When `config.threads > 1`, trials run concurrently using rayon.
pub fn run_trials(config: &OddsConfig) -> Result<Vec<TrialRecord>, rayon::ThreadPoolBuildError> {
    let mut records = Vec::with_capacity(config.trials);
    run_trials_with_callback(config, |record| records.push(record))?;
    records.sort_by_key(|r| r.trial_id);
    Ok(records)
}

/// Runs all trials, calling `on_trial` with each completed record.
///
/// Records arrive in completion order, which differs from trial order when
/// running in parallel.
pub fn run_trials_with_callback<F>(
    config: &OddsConfig,
    on_trial: F,
) -> Result<(), rayon::ThreadPoolBuildError>
where
    F: FnMut(TrialRecord) + Send,
{
    if !config.quiet {
        info!(
            attackers = config.attackers,
            defenders = config.defenders,
            trials = config.trials,
            threads = config.threads,
            "odds run started"
        );
    }
    if config.threads > 1 {
        run_trials_parallel(config, on_trial)
    } else {
        run_trials_sequential(config, on_trial);
        Ok(())
    }
}

fn run_trials_sequential<F>(config: &OddsConfig, mut on_trial: F)
where
    F: FnMut(TrialRecord),
{
    for i in 0..config.trials {
        let mut dice = trial_dice(config.seed, i);
        let record = run_trial(i, config.attackers, config.defenders, &mut dice);
        debug!(trial = i, conquered = record.conquered, rounds = record.rounds, "trial done");
        on_trial(record);
    }
}

/// Uses a channel to deliver completed trials from the pool to the callback.
fn run_trials_parallel<F>(config: &OddsConfig, mut on_trial: F) -> Result<(), rayon::ThreadPoolBuildError>
where
    F: FnMut(TrialRecord) + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<TrialRecord>();
    let progress_step = (config.trials / 10).max(1);

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.trials)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut dice = trial_dice(config.seed, i);
                        let record = run_trial(i, config.attackers, config.defenders, &mut dice);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        if !config.quiet && n % progress_step == 0 {
                            info!("{}/{} trials complete", n, config.trials);
                        }
                        let _ = tx.send(record);
                    });
            });
        });

        for record in rx {
            on_trial(record);
        }
    });

    Ok(())
}

/// Computes aggregate statistics over `records`.
pub fn summarize(records: &[TrialRecord]) -> OddsSummary {
    let trials = records.len();
    let conquests = records.iter().filter(|r| r.conquered).count();
    let total_rounds: u64 = records.iter().map(|r| r.rounds as u64).sum();
    let total_remaining: u64 = records.iter().map(|r| r.attacker_remaining as u64).sum();
    let denom = trials.max(1) as f64;
    OddsSummary {
        trials,
        conquests,
        conquest_rate: conquests as f64 / denom,
        avg_rounds: total_rounds as f64 / denom,
        avg_attacker_remaining: total_remaining as f64 / denom,
    }
}

/// Writes trial records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[TrialRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs a summary of an odds run.
pub fn log_summary(config: &OddsConfig, summary: &OddsSummary) {
    info!("=== Odds Summary ===");
    info!(
        "{} attackers vs {} defenders over {} trials",
        config.attackers, config.defenders, summary.trials
    );
    info!(
        "Conquests: {} ({:.1}%)",
        summary.conquests,
        100.0 * summary.conquest_rate
    );
    info!("Avg rounds/trial: {:.2}", summary.avg_rounds);
    info!("Avg attackers left: {:.2}", summary.avg_attacker_remaining);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::dice::ScriptedDice;

    #[test]
    fn winning_dice_conquer_in_one_round() {
        let mut dice = ScriptedDice::new(vec![6, 6, 1, 1]);
        let record = run_trial(0, 3, 2, &mut dice);
        assert!(record.conquered);
        assert_eq!(record.rounds, 1);
        assert_eq!(record.attacker_remaining, 2);
        assert_eq!(record.defender_remaining, 1);
    }

    #[test]
    fn losing_dice_exhaust_the_attacker() {
        let mut dice = ScriptedDice::new(vec![1]);
        let record = run_trial(7, 5, 2, &mut dice);
        assert!(!record.conquered);
        assert_eq!(record.trial_id, 7);
        // 5 -> 3 -> 1, then the third attempt is rejected.
        assert_eq!(record.rounds, 2);
        assert_eq!(record.attacker_remaining, 1);
        assert_eq!(record.defender_remaining, 2);
    }

    #[test]
    fn single_troop_never_attacks() {
        let mut dice = ScriptedDice::new(vec![6]);
        let record = run_trial(0, 1, 1, &mut dice);
        assert_eq!(record.rounds, 0);
        assert!(!record.conquered);
        assert_eq!(dice.rolled(), 0);
    }

    #[test]
    fn sequential_and_parallel_agree_with_seed() {
        let base = OddsConfig {
            attackers: 6,
            defenders: 3,
            trials: 200,
            threads: 1,
            seed: 99,
            quiet: true,
        };
        let sequential = run_trials(&base).unwrap();
        let parallel = run_trials(&OddsConfig { threads: 4, ..base }).unwrap();
        assert_eq!(sequential.len(), 200);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn overwhelming_force_usually_wins() {
        let config = OddsConfig {
            attackers: 20,
            defenders: 1,
            trials: 500,
            threads: 2,
            seed: 5,
            quiet: true,
        };
        let summary = summarize(&run_trials(&config).unwrap());
        assert_eq!(summary.trials, 500);
        assert!(summary.conquest_rate > 0.99, "rate {}", summary.conquest_rate);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.trials, 0);
        assert_eq!(summary.conquest_rate, 0.0);
    }

    #[test]
    fn jsonl_has_one_object_per_line() {
        let records = vec![
            TrialRecord {
                trial_id: 0,
                rounds: 2,
                conquered: true,
                attacker_remaining: 4,
                defender_remaining: 1,
            },
            TrialRecord {
                trial_id: 1,
                rounds: 3,
                conquered: false,
                attacker_remaining: 1,
                defender_remaining: 2,
            },
        ];
        let mut out = Vec::new();
        write_jsonl(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["trial_id"], 0);
        assert_eq!(first["conquered"], true);
        assert_eq!(first["attacker_remaining"], 4);
    }
}
