use chrono::{NaiveDate, TimeZone, Utc};

use grill_engine::core::commands::PlannerCommand;
use grill_engine::core::enums::{DirectionId, DisplayMode, Slot};
use grill_engine::core::scenario::ScenarioData;
use grill_engine::core::types::{DefeatPoint, HazardTableEntry};
use grill_engine::directions::generate_default_directions;
use grill_engine::scenario_file::{default_file_name, export_scenario, import_scenario};
use grill_engine::{HazardTable, Planner, ScenarioFileError};

fn table() -> HazardTable {
    HazardTable::new(vec![
        HazardTableEntry {
            difficulty: 100.0,
            dozer_incr_second: 30.0,
            wave_change_num: 5,
        },
        HazardTableEntry {
            difficulty: 200.0,
            dozer_incr_second: 20.0,
            wave_change_num: 8,
        },
    ])
}

fn envelope(scenario: &str) -> String {
    format!(r#"{{"version": 1, "createdAt": "2026-01-18T09:30:00.000Z", "scenario": {scenario}}}"#)
}

fn sample_scenario() -> ScenarioData {
    let mut scenario = ScenarioData {
        directions: generate_default_directions(14.4),
        defeats: vec![
            DefeatPoint::new("defeat-0", Slot::A, 5500),
            DefeatPoint::new("defeat-1", Slot::B, 3900),
        ],
        display_mode: DisplayMode::Text,
        ..Default::default()
    };
    scenario.memo.scenario_code = "ABCD-1234-EFGH-5678".into();
    scenario.memo.target_order = vec!["2P".into(), "1P".into(), "-".into()];
    scenario
}

// --- Export ---

#[test]
fn export_writes_versioned_envelope() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 18, 9, 30, 0).unwrap();
    let json = export_scenario(&sample_scenario(), created_at).unwrap();

    assert!(json.contains("\"version\": 1"));
    assert!(json.contains("\"createdAt\": \"2026-01-18T09:30:00.000Z\""));
    assert!(json.contains("\"hazardLevel\""));
    assert!(json.contains("\"scenarioCode\": \"ABCD-1234-EFGH-5678\""));
}

#[test]
fn export_then_import_preserves_scenario() {
    let scenario = sample_scenario();
    let created_at = Utc.with_ymd_and_hms(2026, 1, 18, 9, 30, 0).unwrap();
    let json = export_scenario(&scenario, created_at).unwrap();

    let imported = import_scenario(&json, &table()).unwrap();
    assert_eq!(imported.scenario, scenario);
    assert!(imported.warnings.is_empty());
    assert!(imported.removed_defeats.is_empty());
}

#[test]
fn default_file_name_uses_local_timestamp() {
    let at = NaiveDate::from_ymd_opt(2026, 1, 18)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap();
    assert_eq!(default_file_name(at), "grill-plan-20260118-0905.json");
}

// --- Structural rejection ---

#[test]
fn import_rejects_non_object() {
    let result = import_scenario("[1, 2, 3]", &table());
    assert!(matches!(result, Err(ScenarioFileError::NotAnObject)));
}

#[test]
fn import_rejects_invalid_json() {
    let result = import_scenario("{\"version\": 1,", &table());
    assert!(matches!(result, Err(ScenarioFileError::Json(_))));
}

#[test]
fn import_rejects_other_versions() {
    let json = r#"{"version": 2, "scenario": {}}"#;
    match import_scenario(json, &table()) {
        Err(ScenarioFileError::UnsupportedVersion { found }) => assert_eq!(found, "2"),
        other => panic!("expected version error, got {other:?}"),
    }

    let missing = r#"{"scenario": {}}"#;
    match import_scenario(missing, &table()) {
        Err(ScenarioFileError::UnsupportedVersion { found }) => assert_eq!(found, "missing"),
        other => panic!("expected version error, got {other:?}"),
    }
}

#[test]
fn import_rejects_missing_scenario() {
    let result = import_scenario(r#"{"version": 1}"#, &table());
    assert!(matches!(result, Err(ScenarioFileError::MissingScenario)));
}

#[test]
fn import_rejects_hazard_level_out_of_range() {
    for level in ["500", "10", "\"100\""] {
        let json = envelope(&format!(
            r#"{{"hazardLevel": {level}, "directions": [], "defeats": []}}"#
        ));
        let result = import_scenario(&json, &table());
        assert!(
            matches!(result, Err(ScenarioFileError::InvalidHazardLevel { .. })),
            "level {level} accepted"
        );
    }
}

#[test]
fn import_rejects_malformed_directions() {
    let json = envelope(r#"{"hazardLevel": 100, "directions": [{"direction": 0}], "defeats": []}"#);
    let result = import_scenario(&json, &table());
    assert!(matches!(result, Err(ScenarioFileError::MalformedDirections(_))));

    let json = envelope(r#"{"hazardLevel": 100, "defeats": []}"#);
    let result = import_scenario(&json, &table());
    assert!(matches!(result, Err(ScenarioFileError::MalformedDirections(_))));
}

#[test]
fn import_rejects_malformed_defeats() {
    let bad_slot = envelope(
        r#"{"hazardLevel": 100, "directions": [], "defeats": [{"id": "d1", "slot": "C", "frameTime": 5000}]}"#,
    );
    assert!(matches!(
        import_scenario(&bad_slot, &table()),
        Err(ScenarioFileError::MalformedDefeats(_))
    ));

    let fractional = envelope(
        r#"{"hazardLevel": 100, "directions": [], "defeats": [{"id": "d1", "slot": "A", "frameTime": 5000.5}]}"#,
    );
    assert!(matches!(
        import_scenario(&fractional, &table()),
        Err(ScenarioFileError::MalformedDefeats(_))
    ));
}

#[test]
fn import_rejects_frames_far_outside_the_match() {
    for frame in ["-2147483600", "60001", "1e12"] {
        let defeats = envelope(&format!(
            r#"{{"hazardLevel": 100, "directions": [], "defeats": [{{"id": "d1", "slot": "A", "frameTime": {frame}}}]}}"#
        ));
        assert!(
            matches!(
                import_scenario(&defeats, &table()),
                Err(ScenarioFileError::MalformedDefeats(_))
            ),
            "defeat frame {frame} accepted"
        );

        let directions = envelope(&format!(
            r#"{{"hazardLevel": 100, "directions": [{{"frameTime": {frame}, "direction": 0}}], "defeats": []}}"#
        ));
        assert!(
            matches!(
                import_scenario(&directions, &table()),
                Err(ScenarioFileError::MalformedDirections(_))
            ),
            "direction frame {frame} accepted"
        );
    }
}

#[test]
fn import_rejects_repeated_defeat_ids() {
    let json = envelope(
        r#"{
            "hazardLevel": 100,
            "directions": [],
            "defeats": [
                {"id": "d1", "slot": "A", "frameTime": 5500},
                {"id": "d1", "slot": "B", "frameTime": 3000}
            ]
        }"#,
    );
    assert!(matches!(
        import_scenario(&json, &table()),
        Err(ScenarioFileError::MalformedDefeats(_))
    ));
}

// --- Legacy data and defaults ---

#[test]
fn import_maps_legacy_direction_names() {
    let json = envelope(
        r#"{
            "hazardLevel": 100,
            "directions": [
                {"frameTime": 6000, "direction": "左"},
                {"frameTime": 5136, "direction": "正面"},
                {"frameTime": 4272, "direction": "右"},
                {"frameTime": 3408, "direction": "北"},
                {"frameTime": 2544, "direction": 7},
                {"frameTime": 1680, "direction": 2}
            ],
            "defeats": []
        }"#,
    );
    let imported = import_scenario(&json, &table()).unwrap();
    let ids: Vec<DirectionId> = imported.scenario.directions.iter().map(|d| d.direction).collect();
    assert_eq!(
        ids,
        vec![
            DirectionId::First,
            DirectionId::Second,
            DirectionId::Third,
            DirectionId::Second,
            DirectionId::Second,
            DirectionId::Third,
        ]
    );
}

#[test]
fn import_maps_names_through_custom_presets() {
    let json = envelope(
        r#"{
            "hazardLevel": 100,
            "directions": [{"frameTime": 6000, "direction": "Right"}],
            "defeats": [],
            "directionPresets": ["Left", "Front", "Right"]
        }"#,
    );
    let imported = import_scenario(&json, &table()).unwrap();
    assert_eq!(imported.scenario.directions[0].direction, DirectionId::Third);
    assert_eq!(imported.scenario.direction_presets[2], "Right");
}

#[test]
fn import_fills_memo_and_display_defaults() {
    let json = envelope(
        r#"{
            "hazardLevel": 100,
            "directions": [],
            "defeats": [],
            "memo": {
                "scenarioCode": "WXYZ",
                "weapons": [3, "row-2"],
                "targetOrder": {"mode": "weapon", "order": ["1P", "5P", "3P"]}
            },
            "displayMode": "fancy",
            "directionPresets": ["only", "two"]
        }"#,
    );
    let scenario = import_scenario(&json, &table()).unwrap().scenario;

    assert_eq!(scenario.memo.scenario_code, "WXYZ");
    assert_eq!(scenario.memo.weapons, vec!["3", "row-2"]);
    assert!(scenario.memo.specials.is_empty());
    assert_eq!(scenario.memo.target_order, vec!["1P", "-", "3P"]);
    assert_eq!(scenario.memo.free_note, "");
    assert_eq!(scenario.display_mode, DisplayMode::Both);
    assert_eq!(scenario.direction_presets, ScenarioData::default().direction_presets);
    // Empty schedule is regenerated for the file's hazard level
    assert_eq!(scenario.directions, generate_default_directions(14.4));
}

// --- Sanitization ---

#[test]
fn import_drops_inconsistent_defeats_with_warning() {
    let json = envelope(
        r#"{
            "hazardLevel": 100,
            "directions": [],
            "defeats": [
                {"id": "ok", "slot": "A", "frameTime": 5500},
                {"id": "early", "slot": "A", "frameTime": 6100},
                {"id": "b-too-soon", "slot": "B", "frameTime": 4100}
            ]
        }"#,
    );
    let imported = import_scenario(&json, &table()).unwrap();

    assert_eq!(imported.removed_defeats, vec!["early", "b-too-soon"]);
    assert_eq!(imported.warnings, vec!["2 inconsistent defeats were removed"]);
    let ids: Vec<&str> = imported.scenario.defeats.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["ok"]);
}

#[test]
fn imported_scenario_loads_into_planner() {
    let json = export_scenario(&sample_scenario(), Utc::now()).unwrap();
    let imported = import_scenario(&json, &table()).unwrap();

    let mut planner = Planner::new(table());
    planner.queue_command(PlannerCommand::LoadScenario {
        scenario: imported.scenario,
    });
    let snapshot = planner.process();

    assert!(snapshot.events.is_empty());
    assert_eq!(snapshot.defeats.len(), 2);
    // auto-a, auto-b and one respawn per defeat
    assert_eq!(snapshot.total_grill_count, 4);
}
