//! Hazard level interpolation.
//!
//! Maps a hazard level onto the calibration table by exact match or linear
//! interpolation, then derives the direction interval and slot B timing.

use serde::Deserialize;

use grill_core::constants::{
    DIRECTION_SWITCH_BASE, FALLBACK_DOZER_INCR_SECOND, FALLBACK_WAVE_CHANGE_NUM,
    GAME_DURATION_SECONDS, MAX_DOZER_INCR_SECOND, RESPAWN_FRAMES,
};
use grill_core::types::{seconds_to_frames, HazardTableEntry, InterpolatedHazardConfig};

use crate::error::ScenarioFileError;

/// Calibration table, sorted ascending by difficulty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardTable {
    entries: Vec<HazardTableEntry>,
}

/// `CoopLevelsConfig.json` entry as shipped with the game data.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoopLevelEntry {
    difficulty: f64,
    event_dozer: EventDozer,
    wave_change_num: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EventDozer {
    dozer_incr_second: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Flat(HazardTableEntry),
    Coop(CoopLevelEntry),
}

impl From<RawEntry> for HazardTableEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Flat(entry) => entry,
            RawEntry::Coop(entry) => HazardTableEntry {
                difficulty: entry.difficulty,
                dozer_incr_second: entry.event_dozer.dozer_incr_second,
                wave_change_num: entry.wave_change_num,
            },
        }
    }
}

impl HazardTable {
    pub fn new(mut entries: Vec<HazardTableEntry>) -> Self {
        entries.sort_by(|a, b| a.difficulty.total_cmp(&b.difficulty));
        Self { entries }
    }

    /// Parse a JSON array in either the flat or the game's `CoopLevelsConfig` shape.
    pub fn from_json(json: &str) -> Result<Self, ScenarioFileError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)
            .map_err(|e| ScenarioFileError::MalformedTable(e.to_string()))?;
        let entries: Vec<HazardTableEntry> = raw.into_iter().map(HazardTableEntry::from).collect();
        if let Some(bad) = entries.iter().find(|e| e.wave_change_num <= 0) {
            return Err(ScenarioFileError::MalformedTable(format!(
                "difficulty {} has wave change count {}",
                bad.difficulty, bad.wave_change_num
            )));
        }
        if let Some(bad) = entries.iter().find(|e| {
            !e.dozer_incr_second.is_finite() || e.dozer_incr_second.abs() > MAX_DOZER_INCR_SECOND
        }) {
            return Err(ScenarioFileError::MalformedTable(format!(
                "difficulty {} has dozer delay {}s",
                bad.difficulty, bad.dozer_incr_second
            )));
        }
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[HazardTableEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interpolated parameters for `level`.
    pub fn config_for(&self, level: f64) -> InterpolatedHazardConfig {
        get_hazard_config(level, &self.entries)
    }
}

/// Look up or interpolate the game parameters for a hazard level.
///
/// `table` must be sorted ascending by difficulty. Levels outside the table
/// reuse the nearest entry unchanged; an empty table falls back to the
/// hazard-100 defaults.
pub fn get_hazard_config(level: f64, table: &[HazardTableEntry]) -> InterpolatedHazardConfig {
    if let Some(exact) = table.iter().find(|e| e.difficulty == level) {
        return build_hazard_config(exact.dozer_incr_second, exact.wave_change_num);
    }

    let Some(first) = table.first() else {
        return build_hazard_config(FALLBACK_DOZER_INCR_SECOND, FALLBACK_WAVE_CHANGE_NUM);
    };

    let mut lower = first;
    let mut upper = None;
    for entry in table {
        if entry.difficulty <= level {
            lower = entry;
        } else {
            upper = Some(entry);
            break;
        }
    }
    let upper = upper.unwrap_or(lower);

    if std::ptr::eq(lower, upper) || lower.difficulty == upper.difficulty {
        return build_hazard_config(lower.dozer_incr_second, lower.wave_change_num);
    }

    let ratio = (level - lower.difficulty) / (upper.difficulty - lower.difficulty);
    let dozer_incr_second =
        lower.dozer_incr_second + (upper.dozer_incr_second - lower.dozer_incr_second) * ratio;
    // Floored, not rounded.
    let wave_change_num = (f64::from(lower.wave_change_num)
        + f64::from(upper.wave_change_num - lower.wave_change_num) * ratio)
        .floor() as i32;

    build_hazard_config(dozer_incr_second, wave_change_num)
}

fn build_hazard_config(dozer_incr_second: f64, wave_change_num: i32) -> InterpolatedHazardConfig {
    let direction_interval = DIRECTION_SWITCH_BASE / f64::from(wave_change_num);
    let b_slot_base_frame = seconds_to_frames(GAME_DURATION_SECONDS - dozer_incr_second);

    InterpolatedHazardConfig {
        dozer_incr_second,
        wave_change_num,
        direction_interval,
        b_slot_open_frame: b_slot_base_frame.saturating_sub(RESPAWN_FRAMES),
    }
}
