//! Victory evaluation.
//!
//! Decides whether a game's secret mission currently holds on the map.

pub mod mission;

pub use mission::{
    draw_mission, faction_destroyed, holds_at_least, is_mission_complete, Mission, SecretMission,
    ALL_MISSIONS,
};
