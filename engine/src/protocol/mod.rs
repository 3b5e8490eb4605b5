//! Menu text protocol.
//!
//! Parses commands typed at the game menu and renders the map, battle
//! reports, and mission text that the session writes back.

pub mod parser;
pub mod report;

pub use parser::{parse_command, parse_territory_number, Command};
pub use report::{
    mission_text, write_battle_header, write_battle_report, write_map, write_mission,
    write_outcome, write_rejection,
};
