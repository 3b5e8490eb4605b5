//! Conquest engine library.
//!
//! Exposes the territory map, dice combat resolver, mission evaluation, menu
//! protocol, and odds estimation for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod odds;
pub mod protocol;
pub mod resolve;
