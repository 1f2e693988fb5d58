//! Scenario data: the user-owned plan and its save-file envelope.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DIRECTION_PRESETS, DEFAULT_HAZARD_LEVEL, SCENARIO_FILE_VERSION};
use crate::enums::DisplayMode;
use crate::types::{DefeatPoint, DirectionSetting};

/// Free-form notes attached to a scenario. Never read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioMemo {
    pub scenario_code: String,
    /// Weapon row ids, one per player.
    pub weapons: Vec<String>,
    /// Special row ids, one per player.
    pub specials: Vec<String>,
    /// Kill order entries: `1P`..`4P` or `-`.
    pub target_order: Vec<String>,
    pub snatchers: String,
    pub free_note: String,
}

/// The complete editable plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioData {
    pub hazard_level: f64,
    pub directions: Vec<DirectionSetting>,
    pub defeats: Vec<DefeatPoint>,
    #[serde(default)]
    pub memo: ScenarioMemo,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default = "default_direction_presets")]
    pub direction_presets: [String; 3],
}

pub fn default_direction_presets() -> [String; 3] {
    DEFAULT_DIRECTION_PRESETS.map(String::from)
}

impl Default for ScenarioData {
    fn default() -> Self {
        Self {
            hazard_level: DEFAULT_HAZARD_LEVEL,
            directions: Vec::new(),
            defeats: Vec::new(),
            memo: ScenarioMemo::default(),
            display_mode: DisplayMode::default(),
            direction_presets: default_direction_presets(),
        }
    }
}

/// Save-file envelope: `{ version, createdAt, scenario }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub version: u32,
    /// ISO-8601 timestamp.
    pub created_at: String,
    pub scenario: ScenarioData,
}

impl SaveData {
    pub fn new(created_at: impl Into<String>, scenario: ScenarioData) -> Self {
        Self {
            version: SCENARIO_FILE_VERSION,
            created_at: created_at.into(),
            scenario,
        }
    }
}
