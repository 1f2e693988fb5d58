//! Spawn calculation.
//!
//! Every spawn is derived from `(config, directions, defeats)` in two phases:
//! enumerate raw candidates (automatic spawns plus one respawn per defeat),
//! then apply the global suppression window across both slots.

use grill_core::constants::{GAME_DURATION_FRAMES, SPAWN_WAIT_FRAMES, SUPPRESSION_WINDOW_FRAMES};
use grill_core::enums::Slot;
use grill_core::types::{
    calculate_spawn_time, calculate_spawner_decision_time, DefeatPoint, DirectionSetting, FrameTime,
    InterpolatedHazardConfig, SpawnPoint,
};

use crate::directions::{get_direction_at_time, sorted_descending};

/// Id of the match-start spawn in slot A.
pub const AUTO_A_ID: &str = "auto-a";

/// Id of the slot B activation spawn.
pub const AUTO_B_ID: &str = "auto-b";

/// Derive every spawn for a scenario.
///
/// The result is ordered descending by raw frame, slot A before slot B on
/// ties. Pure: identical inputs give identical output.
pub fn calculate_spawns(
    hazard_config: &InterpolatedHazardConfig,
    directions: &[DirectionSetting],
    defeats: &[DefeatPoint],
) -> Vec<SpawnPoint> {
    let sorted_directions = sorted_descending(directions);
    let mut candidates = Vec::with_capacity(defeats.len() + 2);

    // Opening spawn decides 30F before match start, so it lands in the first interval.
    candidates.push(auto_spawn(
        AUTO_A_ID,
        Slot::A,
        GAME_DURATION_FRAMES,
        &sorted_directions,
    ));

    if hazard_config.is_b_slot_open() {
        candidates.push(auto_spawn(
            AUTO_B_ID,
            Slot::B,
            hazard_config.b_slot_open_frame,
            &sorted_directions,
        ));
    }

    for defeat in defeats {
        let decision_frame = calculate_spawner_decision_time(defeat.frame_time);
        candidates.push(SpawnPoint {
            id: defeat.id.clone(),
            slot: defeat.slot,
            frame_time: calculate_spawn_time(defeat.frame_time),
            direction: get_direction_at_time(decision_frame, &sorted_directions),
            is_auto: false,
            defeat_id: Some(defeat.id.clone()),
            is_suppressed: false,
            raw_frame_time: None,
        });
    }

    apply_suppression(candidates)
}

fn auto_spawn(
    id: &str,
    slot: Slot,
    frame_time: FrameTime,
    sorted_directions: &[DirectionSetting],
) -> SpawnPoint {
    SpawnPoint {
        id: id.to_string(),
        slot,
        frame_time,
        direction: get_direction_at_time(frame_time.saturating_add(SPAWN_WAIT_FRAMES), sorted_directions),
        is_auto: true,
        defeat_id: None,
        is_suppressed: false,
        raw_frame_time: None,
    }
}

/// Enforce the minimum gap between consecutive spawns.
///
/// Candidates enter with their raw frame in `frame_time`. A candidate closer
/// than the window to the previous spawn's actual frame is pushed back to
/// exactly the window boundary. A gap of exactly the window is allowed.
fn apply_suppression(mut spawns: Vec<SpawnPoint>) -> Vec<SpawnPoint> {
    spawns.sort_by(|a, b| {
        b.frame_time
            .cmp(&a.frame_time)
            .then_with(|| a.slot.cmp(&b.slot))
    });

    let mut last_actual_frame: Option<FrameTime> = None;
    for spawn in &mut spawns {
        if let Some(last) = last_actual_frame {
            let suppression_limit = last.saturating_sub(SUPPRESSION_WINDOW_FRAMES);
            if spawn.frame_time > suppression_limit {
                spawn.raw_frame_time = Some(spawn.frame_time);
                spawn.frame_time = suppression_limit;
                spawn.is_suppressed = true;
            }
        }
        last_actual_frame = Some(spawn.frame_time);
    }

    spawns
}
