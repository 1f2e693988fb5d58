#[cfg(test)]
mod tests {
    use crate::commands::{DefeatIdSource, PlannerCommand, SequentialIds};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::PlannerEvent;
    use crate::scenario::{SaveData, ScenarioData};
    use crate::types::*;

    // ---- Time conversion ----

    #[test]
    fn test_frames_to_seconds_exact_values() {
        assert_eq!(frames_to_seconds(6000), 100.0);
        assert_eq!(frames_to_seconds(0), 0.0);
        assert_eq!(frames_to_seconds(5400), 90.0);
        // 100F = 1.666..s rounds to one decimal
        assert_eq!(frames_to_seconds(100), 1.7);
    }

    #[test]
    fn test_seconds_to_frames_exact_values() {
        assert_eq!(seconds_to_frames(100.0), 6000);
        assert_eq!(seconds_to_frames(0.0), 0);
        assert_eq!(seconds_to_frames(1.7), 102);
    }

    #[test]
    fn test_frame_second_round_trip_is_bounded() {
        for f in 0..=GAME_DURATION_FRAMES {
            let back = seconds_to_frames(frames_to_seconds(f));
            assert!(
                (back - f).abs() <= 30,
                "Round trip of {f}F drifted to {back}F"
            );
        }
    }

    #[test]
    fn test_half_frames_round_up() {
        // 0.25s = 15F exactly, 0.125s * 60 = 7.5F rounds toward +inf
        assert_eq!(seconds_to_frames(0.125), 8);
        assert_eq!(seconds_to_frames(-0.125), -7);
    }

    #[test]
    fn test_respawn_arithmetic() {
        assert_eq!(calculate_spawner_decision_time(5400), 5216);
        assert_eq!(calculate_spawn_time(5400), 5186);
        assert_eq!(RESPAWN_FRAMES, 214);
    }

    #[test]
    fn test_respawn_arithmetic_saturates() {
        assert_eq!(calculate_spawn_time(FrameTime::MIN + 10), FrameTime::MIN);
        assert_eq!(calculate_spawner_decision_time(FrameTime::MIN), FrameTime::MIN);
        assert!(is_frame_in_range(-MAX_FRAME_MAGNITUDE));
        assert!(is_frame_in_range(GAME_DURATION_FRAMES + 100));
        assert!(!is_frame_in_range(MAX_FRAME_MAGNITUDE + 1));
        assert!(!is_frame_in_range(FrameTime::MIN + 10));
    }

    #[test]
    fn test_b_slot_helpers() {
        let config = InterpolatedHazardConfig {
            dozer_incr_second: 30.0,
            wave_change_num: 5,
            direction_interval: 14.4,
            b_slot_open_frame: 3786,
        };
        assert!(config.is_b_slot_open());
        assert_eq!(config.b_slot_decision_frame(), 3816);

        let closed = InterpolatedHazardConfig {
            b_slot_open_frame: -1,
            ..config
        };
        assert!(!closed.is_b_slot_open());
    }

    // ---- Enums ----

    #[test]
    fn test_direction_id_serializes_as_integer() {
        for (i, id) in DirectionId::ALL.iter().enumerate() {
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, i.to_string());
            let back: DirectionId = serde_json::from_str(&json).unwrap();
            assert_eq!(*id, back);
        }
        assert!(serde_json::from_str::<DirectionId>("3").is_err());
    }

    #[test]
    fn test_direction_id_cycles() {
        let ids: Vec<u8> = (0..7).map(|i| DirectionId::cyclic(i).index()).collect();
        assert_eq!(ids, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_slot_serde() {
        assert_eq!(serde_json::to_string(&Slot::A).unwrap(), "\"A\"");
        let b: Slot = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(b, Slot::B);
        assert!(serde_json::from_str::<Slot>("\"C\"").is_err());
    }

    #[test]
    fn test_display_mode_serde() {
        assert_eq!(serde_json::to_string(&DisplayMode::Icon).unwrap(), "\"icon\"");
        assert_eq!(DisplayMode::default(), DisplayMode::Both);
    }

    // ---- Records ----

    #[test]
    fn test_unsuppressed_spawn_omits_optional_fields() {
        let spawn = SpawnPoint {
            id: "auto-a".to_string(),
            slot: Slot::A,
            frame_time: 6000,
            direction: DirectionId::First,
            is_auto: true,
            defeat_id: None,
            is_suppressed: false,
            raw_frame_time: None,
        };
        let json = serde_json::to_string(&spawn).unwrap();
        assert!(json.contains("\"frameTime\":6000"));
        assert!(json.contains("\"isAuto\":true"));
        assert!(!json.contains("isSuppressed"));
        assert!(!json.contains("rawFrameTime"));
        assert!(!json.contains("defeatId"));
    }

    #[test]
    fn test_suppressed_spawn_carries_raw_frame() {
        let spawn = SpawnPoint {
            id: "d2".to_string(),
            slot: Slot::B,
            frame_time: 3336,
            direction: DirectionId::Second,
            is_auto: false,
            defeat_id: Some("d2".to_string()),
            is_suppressed: true,
            raw_frame_time: Some(3520),
        };
        let json = serde_json::to_string(&spawn).unwrap();
        assert!(json.contains("\"isSuppressed\":true"));
        assert!(json.contains("\"rawFrameTime\":3520"));
        let back: SpawnPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(spawn, back);
    }

    #[test]
    fn test_defeat_point_camel_case() {
        let json = r#"{"id":"d1","slot":"A","frameTime":5400}"#;
        let defeat: DefeatPoint = serde_json::from_str(json).unwrap();
        assert_eq!(defeat, DefeatPoint::new("d1", Slot::A, 5400));
    }

    // ---- Commands / events ----

    #[test]
    fn test_planner_command_serde() {
        let commands = vec![
            PlannerCommand::AddDefeat {
                defeat: DefeatPoint::new("d1", Slot::A, 5400),
            },
            PlannerCommand::MoveDefeat {
                id: "d1".to_string(),
                frame_time: 5200,
            },
            PlannerCommand::RemoveDefeat {
                id: "d1".to_string(),
            },
            PlannerCommand::SetHazardLevel { level: 200.0 },
            PlannerCommand::SetDirection {
                index: 2,
                direction: DirectionId::Third,
            },
            PlannerCommand::SetDisplayMode {
                mode: DisplayMode::Text,
            },
            PlannerCommand::ResetScenario,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlannerCommand = serde_json::from_str(&json).unwrap();
            // PlannerCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }

        let json = serde_json::to_string(&commands[1]).unwrap();
        assert!(json.contains("\"type\":\"MoveDefeat\""));
        assert!(json.contains("\"frameTime\":5200"));
    }

    #[test]
    fn test_planner_event_serde() {
        let event = PlannerEvent::DefeatsRemoved {
            ids: vec!["d1".to_string(), "d2".to_string()],
            cause: RemovalCause::Cascade,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PlannerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), "defeat-0");
        assert_eq!(ids.next_id(), "defeat-1");

        let existing = vec![
            DefeatPoint::new("defeat-4", Slot::A, 5000),
            DefeatPoint::new("imported", Slot::B, 3000),
            DefeatPoint::new("defeat-11", Slot::A, 4000),
        ];
        let mut ids = SequentialIds::after(&existing);
        assert_eq!(ids.next_id(), "defeat-12");
    }

    // ---- Scenario ----

    #[test]
    fn test_scenario_defaults_fill_missing_fields() {
        let json = r#"{"hazardLevel":100,"directions":[],"defeats":[]}"#;
        let scenario: ScenarioData = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.display_mode, DisplayMode::Both);
        assert_eq!(scenario.direction_presets[1], "正面");
        assert!(scenario.memo.target_order.is_empty());
    }

    #[test]
    fn test_save_data_serde() {
        let mut scenario = ScenarioData::default();
        scenario.defeats.push(DefeatPoint::new("d1", Slot::A, 5400));
        scenario.directions.push(DirectionSetting::new(6000, DirectionId::First));
        let save = SaveData::new("2026-01-01T00:00:00Z", scenario);

        let json = serde_json::to_string(&save).unwrap();
        assert!(json.contains("\"version\":1"));
        assert!(json.contains("\"createdAt\""));
        let back: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(save, back);
    }
}
