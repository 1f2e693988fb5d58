//! Fundamental timing types and plain data records.

use serde::{Deserialize, Serialize};

use crate::constants::{
    FPS, MAX_FRAME_MAGNITUDE, RESPAWN_FRAMES, SPAWNER_DECISION_FRAMES, SPAWN_WAIT_FRAMES,
};
use crate::enums::{DirectionId, Slot};

/// Frame-granularity timestamp. 6000 is match start, 0 is match end.
/// Derived times can go negative (e.g. a closed slot B).
pub type FrameTime = i32;

/// Second-granularity time, one decimal place. Display only.
pub type SecondTime = f64;

/// Round to nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Frames to seconds, rounded to one decimal place.
pub fn frames_to_seconds(frames: FrameTime) -> SecondTime {
    round_half_up(f64::from(frames) / f64::from(FPS) * 10.0) / 10.0
}

/// Seconds to the nearest frame.
pub fn seconds_to_frames(seconds: SecondTime) -> FrameTime {
    round_half_up(seconds * f64::from(FPS)) as FrameTime
}

/// True for frames close enough to the match to take part in timing math.
pub fn is_frame_in_range(frame: FrameTime) -> bool {
    (-MAX_FRAME_MAGNITUDE..=MAX_FRAME_MAGNITUDE).contains(&frame)
}

/// Defeat frame to the frame at which the spawner picks the respawn direction.
pub fn calculate_spawner_decision_time(defeat_frame: FrameTime) -> FrameTime {
    defeat_frame.saturating_sub(SPAWNER_DECISION_FRAMES)
}

/// Defeat frame to the frame at which the respawned enemy appears.
pub fn calculate_spawn_time(defeat_frame: FrameTime) -> FrameTime {
    defeat_frame.saturating_sub(RESPAWN_FRAMES)
}

/// One calibration point of the hazard table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardTableEntry {
    pub difficulty: f64,
    pub dozer_incr_second: f64,
    pub wave_change_num: i32,
}

/// Game parameters derived for one hazard level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolatedHazardConfig {
    pub dozer_incr_second: f64,
    pub wave_change_num: i32,
    /// Seconds between direction switches.
    pub direction_interval: f64,
    /// Automatic slot B spawn frame. Negative when slot B never opens.
    pub b_slot_open_frame: FrameTime,
}

impl InterpolatedHazardConfig {
    pub fn is_b_slot_open(&self) -> bool {
        self.b_slot_open_frame >= 0
    }

    /// Frame at which the spawner decides the automatic slot B direction.
    pub fn b_slot_decision_frame(&self) -> FrameTime {
        self.b_slot_open_frame.saturating_add(SPAWN_WAIT_FRAMES)
    }
}

/// One direction rotation breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionSetting {
    pub frame_time: FrameTime,
    pub direction: DirectionId,
}

impl DirectionSetting {
    pub fn new(frame_time: FrameTime, direction: DirectionId) -> Self {
        Self {
            frame_time,
            direction,
        }
    }
}

/// A user-placed defeat. The only user-owned entity; everything else is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefeatPoint {
    pub id: String,
    pub slot: Slot,
    pub frame_time: FrameTime,
}

impl DefeatPoint {
    pub fn new(id: impl Into<String>, slot: Slot, frame_time: FrameTime) -> Self {
        Self {
            id: id.into(),
            slot,
            frame_time,
        }
    }
}

/// A derived spawn, rebuilt from scratch on every recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnPoint {
    pub id: String,
    pub slot: Slot,
    /// Actual (post-suppression) spawn frame.
    pub frame_time: FrameTime,
    pub direction: DirectionId,
    pub is_auto: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defeat_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_suppressed: bool,
    /// Pre-suppression frame, present only when suppressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_frame_time: Option<FrameTime>,
}

/// Per-interval spawn and defeat counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionStats {
    pub interval_index: usize,
    pub direction_id: DirectionId,
    /// Breakpoint that opens this interval.
    pub frame_time: FrameTime,
    pub spawn_count: u32,
    pub defeat_count: u32,
}

/// Spawn and defeat totals for one direction id, merged across intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionTotals {
    pub spawn_count: u32,
    pub defeat_count: u32,
}
