//! Scenario file import and export.
//!
//! Import is a two-stage boundary: structural validation rejects malformed
//! files outright, then the chain repair drops defeats that no longer fit
//! the current timing rules and reports them as warnings.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use grill_core::constants::{
    MAX_FRAME_MAGNITUDE, MAX_HAZARD_LEVEL, MIN_HAZARD_LEVEL, SCENARIO_FILE_VERSION,
    TARGET_ORDER_ENTRIES,
};
use grill_core::enums::{DirectionId, DisplayMode, Slot};
use grill_core::scenario::{default_direction_presets, SaveData, ScenarioData, ScenarioMemo};
use grill_core::types::{DefeatPoint, DirectionSetting, FrameTime};

use crate::directions::generate_default_directions;
use crate::error::ScenarioFileError;
use crate::hazard::HazardTable;
use crate::validation::find_all_invalid_defeats;

/// Direction id assigned to legacy names that match no preset.
const FALLBACK_DIRECTION: DirectionId = DirectionId::Second;

/// A successfully imported scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedScenario {
    pub scenario: ScenarioData,
    /// Ids of defeats dropped by the chain repair.
    pub removed_defeats: Vec<String>,
    /// Non-fatal notices for the user.
    pub warnings: Vec<String>,
}

/// Serialize a scenario into the versioned save-file envelope.
pub fn export_scenario(
    scenario: &ScenarioData,
    created_at: DateTime<Utc>,
) -> Result<String, ScenarioFileError> {
    let save = SaveData::new(
        created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        scenario.clone(),
    );
    Ok(serde_json::to_string_pretty(&save)?)
}

/// [`export_scenario`] stamped with the current time.
pub fn export_scenario_now(scenario: &ScenarioData) -> Result<String, ScenarioFileError> {
    export_scenario(scenario, Utc::now())
}

/// Suggested download name, e.g. `grill-plan-20260118-0930.json`.
pub fn default_file_name(at: NaiveDateTime) -> String {
    format!("grill-plan-{}.json", at.format("%Y%m%d-%H%M"))
}

/// Parse, validate and sanitize a save file.
pub fn import_scenario(json: &str, table: &HazardTable) -> Result<ImportedScenario, ScenarioFileError> {
    let data: Value = serde_json::from_str(json)?;
    let data = data.as_object().ok_or(ScenarioFileError::NotAnObject)?;

    match data.get("version") {
        Some(v) if v.as_u64() == Some(u64::from(SCENARIO_FILE_VERSION)) => {}
        other => {
            return Err(ScenarioFileError::UnsupportedVersion {
                found: other.map_or_else(|| "missing".to_string(), Value::to_string),
            })
        }
    }

    let scenario = data
        .get("scenario")
        .and_then(Value::as_object)
        .ok_or(ScenarioFileError::MissingScenario)?;

    let hazard_level = scenario
        .get("hazardLevel")
        .and_then(Value::as_f64)
        .filter(|level| (MIN_HAZARD_LEVEL..=MAX_HAZARD_LEVEL).contains(level))
        .ok_or(ScenarioFileError::InvalidHazardLevel {
            min: MIN_HAZARD_LEVEL,
            max: MAX_HAZARD_LEVEL,
        })?;

    let direction_presets = parse_direction_presets(scenario.get("directionPresets"));
    let directions = parse_directions(scenario.get("directions"), &direction_presets)?;
    let defeats = parse_defeats(scenario.get("defeats"))?;

    let parsed = ScenarioData {
        hazard_level,
        directions,
        defeats,
        memo: parse_memo(scenario.get("memo")),
        display_mode: parse_display_mode(scenario.get("displayMode")),
        direction_presets,
    };

    Ok(sanitize_scenario(parsed, table))
}

/// Fill in a missing direction schedule and drop defeats that fail the chain
/// check under the scenario's own settings.
pub fn sanitize_scenario(mut scenario: ScenarioData, table: &HazardTable) -> ImportedScenario {
    let hazard_config = table.config_for(scenario.hazard_level);
    if scenario.directions.is_empty() {
        scenario.directions = generate_default_directions(hazard_config.direction_interval);
    }

    let removed_defeats =
        find_all_invalid_defeats(&scenario.defeats, &hazard_config, &scenario.directions);
    let mut warnings = Vec::new();
    if !removed_defeats.is_empty() {
        log::warn!(
            "dropping {} inconsistent defeat(s) on load: {:?}",
            removed_defeats.len(),
            removed_defeats
        );
        warnings.push(format!(
            "{} inconsistent defeats were removed",
            removed_defeats.len()
        ));
        scenario.defeats.retain(|d| !removed_defeats.contains(&d.id));
    }

    ImportedScenario {
        scenario,
        removed_defeats,
        warnings,
    }
}

/// Integral frame within the accepted magnitude.
fn as_frame(value: Option<&Value>) -> Option<FrameTime> {
    let number = value?.as_f64()?;
    let in_range = number.fract() == 0.0 && number.abs() <= f64::from(MAX_FRAME_MAGNITUDE);
    in_range.then_some(number as FrameTime)
}

fn parse_direction_presets(value: Option<&Value>) -> [String; 3] {
    let names: Option<Vec<String>> = value.and_then(Value::as_array).and_then(|items| {
        items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect()
    });
    match names.map(<[String; 3]>::try_from) {
        Some(Ok(presets)) => presets,
        _ => default_direction_presets(),
    }
}

fn parse_directions(
    value: Option<&Value>,
    presets: &[String; 3],
) -> Result<Vec<DirectionSetting>, ScenarioFileError> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| ScenarioFileError::MalformedDirections("expected an array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let malformed = || ScenarioFileError::MalformedDirections(format!("entry {i}"));
            let item = item.as_object().ok_or_else(malformed)?;
            let frame_time = as_frame(item.get("frameTime")).ok_or_else(malformed)?;
            let direction = match item.get("direction") {
                Some(Value::Number(n)) => n
                    .as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(|n| DirectionId::try_from(n).ok())
                    .unwrap_or(FALLBACK_DIRECTION),
                // Legacy files stored the display name instead of the id.
                Some(Value::String(name)) => presets
                    .iter()
                    .position(|preset| preset == name)
                    .map_or(FALLBACK_DIRECTION, DirectionId::cyclic),
                _ => return Err(malformed()),
            };
            Ok(DirectionSetting::new(frame_time, direction))
        })
        .collect()
}

fn parse_defeats(value: Option<&Value>) -> Result<Vec<DefeatPoint>, ScenarioFileError> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| ScenarioFileError::MalformedDefeats("expected an array".to_string()))?;

    let mut seen = HashSet::new();
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let malformed = || ScenarioFileError::MalformedDefeats(format!("entry {i}"));
            let item = item.as_object().ok_or_else(malformed)?;
            let id = item.get("id").and_then(Value::as_str).ok_or_else(malformed)?;
            if !seen.insert(id) {
                return Err(ScenarioFileError::MalformedDefeats(format!(
                    "entry {i} repeats id {id}"
                )));
            }
            let slot = match item.get("slot").and_then(Value::as_str) {
                Some("A") => Slot::A,
                Some("B") => Slot::B,
                _ => return Err(malformed()),
            };
            let frame_time = as_frame(item.get("frameTime")).ok_or_else(malformed)?;
            Ok(DefeatPoint::new(id, slot, frame_time))
        })
        .collect()
}

fn string_field(memo: &Map<String, Value>, key: &str) -> String {
    memo.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Row ids; older files stored numeric master ids.
fn id_list(memo: &Map<String, Value>, key: &str) -> Vec<String> {
    memo.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => String::new(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Accepts both the plain array and the older `{ mode, order }` object.
fn target_order(value: Option<&Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Object(legacy)) => match legacy.get("order") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items
        .iter()
        .map(|item| match item.as_str() {
            Some(entry) if TARGET_ORDER_ENTRIES.contains(&entry) => entry.to_string(),
            _ => "-".to_string(),
        })
        .collect()
}

fn parse_memo(value: Option<&Value>) -> ScenarioMemo {
    let empty = Map::new();
    let memo = value.and_then(Value::as_object).unwrap_or(&empty);
    ScenarioMemo {
        scenario_code: string_field(memo, "scenarioCode"),
        weapons: id_list(memo, "weapons"),
        specials: id_list(memo, "specials"),
        target_order: target_order(memo.get("targetOrder")),
        snatchers: string_field(memo, "snatchers"),
        free_note: string_field(memo, "freeNote"),
    }
}

fn parse_display_mode(value: Option<&Value>) -> DisplayMode {
    value
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}
