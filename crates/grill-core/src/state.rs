//! Plan snapshot: everything the front end renders after an edit.

use serde::{Deserialize, Serialize};

use crate::events::PlannerEvent;
use crate::types::{DefeatPoint, DirectionSetting, DirectionStats, InterpolatedHazardConfig, SpawnPoint};

/// Complete derived view of the current scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    pub hazard_level: f64,
    pub hazard_config: InterpolatedHazardConfig,
    /// Direction schedule, sorted descending by frame.
    pub directions: Vec<DirectionSetting>,
    pub defeats: Vec<DefeatPoint>,
    pub spawns: Vec<SpawnPoint>,
    pub direction_stats: Vec<DirectionStats>,
    /// Spawns across all intervals.
    pub total_grill_count: u32,
    /// Events produced by the commands applied since the previous snapshot.
    pub events: Vec<PlannerEvent>,
}
