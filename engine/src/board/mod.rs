//! Board representation.
//!
//! Contains territories, faction labels, and the territory map that combat
//! mutates and missions inspect.

pub mod state;
pub mod territory;

pub use state::{build_initial_map, TerritoryMap};
pub use territory::{Faction, Territory};
