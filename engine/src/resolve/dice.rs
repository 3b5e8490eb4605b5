//! Dice sources for combat.
//!
//! Combat draws through the `DiceSource` trait so that sessions can use a
//! seeded generator while tests replay fixed values.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of faces on a combat die.
pub const DIE_FACES: u8 = 6;

/// Produces independent, uniformly distributed die values in `[1, 6]`.
pub trait DiceSource {
    fn roll(&mut self) -> u8;
}

/// A pseudo-random die backed by `SmallRng`.
///
/// Seeded once when created and only advanced afterwards.
pub struct Dice {
    rng: SmallRng,
}

impl Dice {
    /// Creates dice seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Dice {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates dice with a fixed seed for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Dice {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Exposes the underlying generator for other session-level draws.
    pub fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

impl DiceSource for Dice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Replays a fixed sequence of die values, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    values: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Panics if `values` is empty or holds a value outside `[1, 6]`.
    pub fn new(values: Vec<u8>) -> Self {
        assert!(!values.is_empty(), "scripted dice need at least one value");
        assert!(
            values.iter().all(|v| (1..=DIE_FACES).contains(v)),
            "scripted die value out of range"
        );
        ScriptedDice { values, next: 0 }
    }

    /// Number of values rolled so far.
    pub fn rolled(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
