//! Timing engine for the grill planner.
//!
//! Derives spawns, direction classification and chain validity from a
//! hazard level, a direction schedule and the user's defeats. Every function
//! here is pure over its inputs; `Planner` wraps them in a command/snapshot
//! loop for the front end.

pub mod directions;
pub mod engine;
pub mod error;
pub mod hazard;
pub mod scenario_file;
pub mod spawns;
pub mod statistics;
pub mod validation;

pub use engine::Planner;
pub use error::ScenarioFileError;
pub use grill_core as core;
pub use hazard::HazardTable;
