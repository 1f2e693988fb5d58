//! Core types and definitions for the grill planner.
//!
//! This crate defines the vocabulary shared by the engine and its callers:
//! timing constants, plain data records, commands, events, scenario files
//! and snapshots. It contains no timing algorithms.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod scenario;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
