//! Per-direction statistics.
//!
//! Spawns are counted in the schedule interval their spawner decision falls
//! into. Defeats are counted in the interval of the spawn they consumed.

use std::collections::{BTreeMap, HashMap};

use grill_core::constants::SPAWN_WAIT_FRAMES;
use grill_core::enums::{DirectionId, Slot};
use grill_core::types::{
    calculate_spawner_decision_time, DefeatPoint, DirectionSetting, DirectionStats,
    DirectionTotals, FrameTime, SpawnPoint,
};

use crate::directions::{find_direction_index, sorted_descending};
use crate::validation::{match_slot_chain, slot_chain};

/// Frame at which the spawner decided this spawn's direction.
///
/// Automatic spawns count from their actual frame, so a suppressed auto spawn
/// lands in the interval of its pushed-back decision.
fn spawner_decision_frame(spawn: &SpawnPoint, defeats: &HashMap<&str, &DefeatPoint>) -> FrameTime {
    spawn
        .defeat_id
        .as_deref()
        .filter(|_| !spawn.is_auto)
        .and_then(|id| defeats.get(id))
        .map(|defeat| calculate_spawner_decision_time(defeat.frame_time))
        .unwrap_or(spawn.frame_time.saturating_add(SPAWN_WAIT_FRAMES))
}

/// One row per schedule interval, in descending frame order.
pub fn calculate_direction_stats(
    spawns: &[SpawnPoint],
    defeats: &[DefeatPoint],
    directions: &[DirectionSetting],
) -> Vec<DirectionStats> {
    let sorted_directions = sorted_descending(directions);
    let mut rows: Vec<DirectionStats> = sorted_directions
        .iter()
        .enumerate()
        .map(|(interval_index, setting)| DirectionStats {
            interval_index,
            direction_id: setting.direction,
            frame_time: setting.frame_time,
            spawn_count: 0,
            defeat_count: 0,
        })
        .collect();

    let defeats_by_id: HashMap<&str, &DefeatPoint> =
        defeats.iter().map(|d| (d.id.as_str(), d)).collect();
    let interval_of = |spawn: &SpawnPoint| {
        find_direction_index(
            spawner_decision_frame(spawn, &defeats_by_id),
            &sorted_directions,
        )
    };

    for spawn in spawns {
        if let Some(i) = interval_of(spawn) {
            rows[i].spawn_count += 1;
        }
    }

    for slot in Slot::ALL {
        let (slot_spawns, slot_defeats) = slot_chain(slot, spawns, defeats);
        for spawn_index in match_slot_chain(&slot_spawns, &slot_defeats).into_iter().flatten() {
            if let Some(i) = interval_of(slot_spawns[spawn_index]) {
                rows[i].defeat_count += 1;
            }
        }
    }

    rows
}

/// Merge interval rows that share a direction id.
pub fn summarize_by_direction(stats: &[DirectionStats]) -> BTreeMap<DirectionId, DirectionTotals> {
    let mut totals: BTreeMap<DirectionId, DirectionTotals> = BTreeMap::new();
    for row in stats {
        let entry = totals.entry(row.direction_id).or_default();
        entry.spawn_count += row.spawn_count;
        entry.defeat_count += row.defeat_count;
    }
    totals
}

/// Total spawns across all intervals.
pub fn total_grill_count(stats: &[DirectionStats]) -> u32 {
    stats.iter().map(|row| row.spawn_count).sum()
}
