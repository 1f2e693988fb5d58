//! Chain validation and repair.
//!
//! Within a slot, defeats (descending) must pair one-to-one with spawns
//! (descending): each defeat consumes the next unconsumed spawn, which must not
//! be later than the defeat. Every check recomputes spawns from scratch because
//! one defeat shifts respawns and suppression system-wide.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use grill_core::enums::Slot;
use grill_core::types::{
    calculate_spawn_time, DefeatPoint, DirectionSetting, FrameTime, InterpolatedHazardConfig,
    SpawnPoint,
};

use crate::spawns::calculate_spawns;

/// Result of checking a proposed edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Validation {
    Valid,
    Invalid { reason: String },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid { reason } => Some(reason),
        }
    }
}

/// Pair each defeat with the spawn it consumes.
///
/// Both inputs belong to one slot and are sorted descending by frame. The
/// returned vector is parallel to `defeats`: `Some(i)` is the index of the
/// consumed spawn, `None` an unmatched defeat. An unmatched defeat does not
/// consume anything, so later defeats can still match.
pub fn match_slot_chain(
    sorted_spawns: &[&SpawnPoint],
    sorted_defeats: &[&DefeatPoint],
) -> Vec<Option<usize>> {
    let mut cursor = 0;
    sorted_defeats
        .iter()
        .map(|defeat| match sorted_spawns.get(cursor) {
            Some(spawn) if spawn.frame_time >= defeat.frame_time => {
                cursor += 1;
                Some(cursor - 1)
            }
            _ => None,
        })
        .collect()
}

/// True when every defeat in the slot has a spawn to consume.
pub fn validate_slot_chain(sorted_spawns: &[&SpawnPoint], sorted_defeats: &[&DefeatPoint]) -> bool {
    match_slot_chain(sorted_spawns, sorted_defeats)
        .iter()
        .all(Option::is_some)
}

/// Spawns and defeats of one slot, each sorted descending by frame.
pub(crate) fn slot_chain<'s, 'd>(
    slot: Slot,
    spawns: &'s [SpawnPoint],
    defeats: &'d [DefeatPoint],
) -> (Vec<&'s SpawnPoint>, Vec<&'d DefeatPoint>) {
    let mut slot_spawns: Vec<&SpawnPoint> = spawns.iter().filter(|s| s.slot == slot).collect();
    slot_spawns.sort_by(|a, b| b.frame_time.cmp(&a.frame_time));
    let mut slot_defeats: Vec<&DefeatPoint> = defeats.iter().filter(|d| d.slot == slot).collect();
    slot_defeats.sort_by(|a, b| b.frame_time.cmp(&a.frame_time));
    (slot_spawns, slot_defeats)
}

/// Defeats with no spawn to consume, slot A first, each slot in descending order.
fn unmatched_defeats<'a>(spawns: &[SpawnPoint], defeats: &'a [DefeatPoint]) -> Vec<&'a DefeatPoint> {
    let mut unmatched = Vec::new();
    for slot in Slot::ALL {
        let (slot_spawns, slot_defeats) = slot_chain(slot, spawns, defeats);
        let matches = match_slot_chain(&slot_spawns, &slot_defeats);
        unmatched.extend(
            slot_defeats
                .into_iter()
                .zip(matches)
                .filter(|(_, m)| m.is_none())
                .map(|(d, _)| d),
        );
    }
    unmatched
}

fn validate_all_defeats(
    defeats: &[DefeatPoint],
    hazard_config: &InterpolatedHazardConfig,
    directions: &[DirectionSetting],
) -> Validation {
    let spawns = calculate_spawns(hazard_config, directions, defeats);
    match unmatched_defeats(&spawns, defeats).first() {
        None => Validation::Valid,
        Some(defeat) => Validation::Invalid {
            reason: format!(
                "defeat {} ({}F, slot {}) has no spawn left to defeat",
                defeat.id, defeat.frame_time, defeat.slot
            ),
        },
    }
}

/// Check that adding `new_defeat` keeps every chain consistent.
pub fn validate_add_defeat(
    new_defeat: &DefeatPoint,
    existing_defeats: &[DefeatPoint],
    hazard_config: &InterpolatedHazardConfig,
    directions: &[DirectionSetting],
) -> Validation {
    let mut test_defeats = existing_defeats.to_vec();
    test_defeats.push(new_defeat.clone());
    validate_all_defeats(&test_defeats, hazard_config, directions)
}

/// Check that moving defeat `defeat_id` to `new_frame_time` keeps every chain consistent.
pub fn validate_move_defeat(
    defeat_id: &str,
    new_frame_time: FrameTime,
    existing_defeats: &[DefeatPoint],
    hazard_config: &InterpolatedHazardConfig,
    directions: &[DirectionSetting],
) -> Validation {
    if !existing_defeats.iter().any(|d| d.id == defeat_id) {
        return Validation::Invalid {
            reason: format!("unknown defeat {defeat_id}"),
        };
    }
    let test_defeats: Vec<DefeatPoint> = existing_defeats
        .iter()
        .map(|d| {
            if d.id == defeat_id {
                DefeatPoint {
                    frame_time: new_frame_time,
                    ..d.clone()
                }
            } else {
                d.clone()
            }
        })
        .collect();
    validate_all_defeats(&test_defeats, hazard_config, directions)
}

/// Ids of every defeat that has to go for the rest to form consistent chains.
///
/// Recomputes spawns, drops all unmatched defeats and repeats until a pass
/// drops nothing. Each pass strictly shrinks the set, so this terminates.
pub fn find_all_invalid_defeats(
    defeats: &[DefeatPoint],
    hazard_config: &InterpolatedHazardConfig,
    directions: &[DirectionSetting],
) -> Vec<String> {
    let mut remaining = defeats.to_vec();
    let mut removed = Vec::new();

    loop {
        let spawns = calculate_spawns(hazard_config, directions, &remaining);
        let invalid: HashSet<String> = unmatched_defeats(&spawns, &remaining)
            .into_iter()
            .map(|d| d.id.clone())
            .collect();
        if invalid.is_empty() {
            break;
        }
        log::debug!("chain repair pass dropped {} defeat(s)", invalid.len());

        // Keep the removal order stable across runs.
        for defeat in &remaining {
            if invalid.contains(&defeat.id) && !removed.contains(&defeat.id) {
                removed.push(defeat.id.clone());
            }
        }
        remaining.retain(|d| !invalid.contains(&d.id));
    }

    removed
}

/// Remove `removed_id` and everything its removal invalidates.
///
/// Returns `removed_id` first, followed by the cascade.
pub fn find_cascade_removals(
    removed_id: &str,
    defeats: &[DefeatPoint],
    hazard_config: &InterpolatedHazardConfig,
    directions: &[DirectionSetting],
) -> Vec<String> {
    let remaining: Vec<DefeatPoint> = defeats
        .iter()
        .filter(|d| d.id != removed_id)
        .cloned()
        .collect();

    let mut removed = vec![removed_id.to_string()];
    removed.extend(find_all_invalid_defeats(&remaining, hazard_config, directions));
    if removed.len() > 1 {
        log::debug!(
            "removing {removed_id} cascades to {} more defeat(s)",
            removed.len() - 1
        );
    }
    removed
}

/// Same-slot defeats that a move would strand: later than the moved defeat's
/// current frame but earlier than its new respawn.
pub fn get_affected_defeats(
    changed_defeat_id: &str,
    new_frame_time: FrameTime,
    all_defeats: &[DefeatPoint],
) -> Vec<DefeatPoint> {
    let Some(changed) = all_defeats.iter().find(|d| d.id == changed_defeat_id) else {
        return Vec::new();
    };
    let new_spawn_time = calculate_spawn_time(new_frame_time);

    all_defeats
        .iter()
        .filter(|d| {
            d.slot == changed.slot
                && d.id != changed_defeat_id
                && d.frame_time < changed.frame_time
                && d.frame_time > new_spawn_time
        })
        .cloned()
        .collect()
}
