//! Direction rotation schedule and classification.
//!
//! A schedule is a list of breakpoints sorted descending by frame. Interval
//! `i` covers decision frames in `(directions[i + 1].frame_time, directions[i].frame_time]`.

use grill_core::constants::{GAME_DURATION_FRAMES, GAME_DURATION_SECONDS};
use grill_core::enums::DirectionId;
use grill_core::types::{seconds_to_frames, DirectionSetting, FrameTime};

/// Upper bound on generated breakpoints, one per frame of the match.
const MAX_BREAKPOINTS: usize = GAME_DURATION_FRAMES as usize + 1;

/// Switch frames for a rotation interval in seconds, descending from match start.
///
/// Each time is computed as `100 - interval * i` rather than by repeated
/// subtraction so fractional intervals do not accumulate drift.
pub fn get_direction_switch_times(direction_interval: f64) -> Vec<FrameTime> {
    if !(direction_interval.is_finite() && direction_interval > 0.0) {
        return vec![GAME_DURATION_FRAMES];
    }

    (0..MAX_BREAKPOINTS)
        .map(|i| GAME_DURATION_SECONDS - direction_interval * i as f64)
        .take_while(|seconds| *seconds >= 0.0)
        .map(seconds_to_frames)
        .collect()
}

/// Default schedule: one breakpoint per switch time, ids cycling 0, 1, 2.
pub fn generate_default_directions(direction_interval: f64) -> Vec<DirectionSetting> {
    get_direction_switch_times(direction_interval)
        .into_iter()
        .enumerate()
        .map(|(i, frame_time)| DirectionSetting::new(frame_time, DirectionId::cyclic(i)))
        .collect()
}

/// Copy of `directions` sorted descending by frame. Stable for equal frames.
pub fn sorted_descending(directions: &[DirectionSetting]) -> Vec<DirectionSetting> {
    let mut sorted = directions.to_vec();
    sorted.sort_by(|a, b| b.frame_time.cmp(&a.frame_time));
    sorted
}

/// Index of the interval a spawner decision frame falls into.
///
/// Scans from the tail (smallest frame) and returns the first breakpoint at
/// or after the decision frame. Decisions before match start (e.g. the 6030F
/// decision of the opening spawn) fall back to the first interval.
/// `None` only for an empty schedule.
pub fn find_direction_index(
    spawner_decision_frame: FrameTime,
    sorted_directions: &[DirectionSetting],
) -> Option<usize> {
    if sorted_directions.is_empty() {
        return None;
    }
    let index = sorted_directions
        .iter()
        .rposition(|setting| setting.frame_time >= spawner_decision_frame)
        .unwrap_or(0);
    Some(index)
}

/// Direction id for a spawner decision frame. Empty schedules yield id 0.
pub fn get_direction_at_time(
    spawner_decision_frame: FrameTime,
    sorted_directions: &[DirectionSetting],
) -> DirectionId {
    find_direction_index(spawner_decision_frame, sorted_directions)
        .map(|i| sorted_directions[i].direction)
        .unwrap_or_default()
}

/// Regenerated schedule for a new interval. When the breakpoint count is
/// unchanged, the previous ids are kept position by position so user
/// relabelling survives a hazard level change.
pub fn regenerate_directions(
    direction_interval: f64,
    previous: &[DirectionSetting],
) -> Vec<DirectionSetting> {
    let generated = generate_default_directions(direction_interval);
    if generated.len() != previous.len() {
        return generated;
    }
    let previous = sorted_descending(previous);
    generated
        .into_iter()
        .zip(previous)
        .map(|(fresh, old)| DirectionSetting::new(fresh.frame_time, old.direction))
        .collect()
}
