//! Game timing constants.
//!
//! These values reproduce observed in-game behavior and are fixed protocol
//! constants, not tuning parameters.

use crate::types::FrameTime;

/// Frames per second.
pub const FPS: u32 = 60;

/// Match length in seconds.
pub const GAME_DURATION_SECONDS: f64 = 100.0;

/// Match length in frames. The clock counts down from here to 0.
pub const GAME_DURATION_FRAMES: FrameTime = 6000;

/// Largest frame magnitude accepted from files and commands.
pub const MAX_FRAME_MAGNITUDE: FrameTime = 10 * GAME_DURATION_FRAMES;

// --- Respawn ---

/// Frames between a defeat and the spawner deciding where the next enemy appears.
pub const SPAWNER_DECISION_FRAMES: FrameTime = 184;

/// Frames between the spawner decision and the enemy actually appearing.
pub const SPAWN_WAIT_FRAMES: FrameTime = 30;

/// Total defeat-to-spawn delay (decision + wait).
pub const RESPAWN_FRAMES: FrameTime = SPAWNER_DECISION_FRAMES + SPAWN_WAIT_FRAMES;

/// Minimum gap between any two spawns, across both slots.
pub const SUPPRESSION_WINDOW_FRAMES: FrameTime = 184;

// --- Direction rotation ---

/// Base rotation period in seconds, divided by the wave change count.
pub const DIRECTION_SWITCH_BASE: f64 = 72.0;

/// Number of distinct direction zones.
pub const DIRECTION_COUNT: usize = 3;

// --- Hazard level ---

pub const MIN_HAZARD_LEVEL: f64 = 20.0;
pub const MAX_HAZARD_LEVEL: f64 = 333.0;
pub const DEFAULT_HAZARD_LEVEL: f64 = 100.0;

/// Largest dozer delay accepted from a calibration table, in seconds.
pub const MAX_DOZER_INCR_SECOND: f64 = 10.0 * GAME_DURATION_SECONDS;

/// Fallback dozer increment when the calibration table is empty (hazard 100% equivalent).
pub const FALLBACK_DOZER_INCR_SECOND: f64 = 30.0;

/// Fallback wave change count when the calibration table is empty.
pub const FALLBACK_WAVE_CHANGE_NUM: i32 = 5;

// --- Scenario files ---

/// Save-file envelope version understood by import.
pub const SCENARIO_FILE_VERSION: u32 = 1;

/// Default display names for direction ids 0, 1, 2.
pub const DEFAULT_DIRECTION_PRESETS: [&str; 3] = ["左", "正面", "右"];

/// Valid entries of the memo target order.
pub const TARGET_ORDER_ENTRIES: [&str; 5] = ["1P", "2P", "3P", "4P", "-"];
