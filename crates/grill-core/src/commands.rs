//! Edits sent from the front end to the planner.
//!
//! Commands are queued and applied in order. Edits that would break the
//! spawn/defeat chain are rejected, never clamped.

use serde::{Deserialize, Serialize};

use crate::enums::{DirectionId, DisplayMode};
use crate::scenario::{ScenarioData, ScenarioMemo};
use crate::types::{DefeatPoint, DirectionSetting, FrameTime};

/// All possible planner edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum PlannerCommand {
    // --- Defeats ---
    /// Place a new defeat. The id is chosen by the caller.
    AddDefeat { defeat: DefeatPoint },
    /// Move an existing defeat to a new frame.
    MoveDefeat { id: String, frame_time: FrameTime },
    /// Remove a defeat and every defeat that depended on it.
    RemoveDefeat { id: String },

    // --- Match settings ---
    /// Change the hazard level. Regenerates the direction schedule.
    SetHazardLevel { level: f64 },
    /// Replace the direction schedule.
    SetDirections { directions: Vec<DirectionSetting> },
    /// Reassign the direction of one schedule interval.
    SetDirection { index: usize, direction: DirectionId },

    // --- Memo / display ---
    SetMemo { memo: ScenarioMemo },
    SetDisplayMode { mode: DisplayMode },
    SetDirectionPreset { index: usize, name: String },

    // --- Whole scenario ---
    LoadScenario { scenario: ScenarioData },
    ResetScenario,
}

/// Source of unique defeat ids, owned by whoever creates defeats.
pub trait DefeatIdSource {
    fn next_id(&mut self) -> String;
}

/// Monotonic `defeat-N` ids.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start numbering after the highest `defeat-N` id already in use.
    pub fn after(defeats: &[DefeatPoint]) -> Self {
        let next = defeats
            .iter()
            .filter_map(|d| d.id.strip_prefix("defeat-")?.parse::<u64>().ok())
            .max()
            .map_or(0, |n| n + 1);
        Self { next }
    }
}

impl DefeatIdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("defeat-{}", self.next);
        self.next += 1;
        id
    }
}
