//! Planner engine.
//!
//! `Planner` owns the hazard table and the editable scenario, applies queued
//! commands, and produces `PlanSnapshot`s. Everything in the snapshot is
//! recomputed from `(config, directions, defeats)`; nothing derived is cached
//! across edits.

use std::collections::VecDeque;

use grill_core::commands::PlannerCommand;
use grill_core::constants::{MAX_HAZARD_LEVEL, MIN_HAZARD_LEVEL};
use grill_core::enums::{RemovalCause, Slot};
use grill_core::events::PlannerEvent;
use grill_core::scenario::ScenarioData;
use grill_core::state::PlanSnapshot;
use grill_core::types::{is_frame_in_range, DefeatPoint, FrameTime, InterpolatedHazardConfig};

use crate::directions::{generate_default_directions, regenerate_directions, sorted_descending};
use crate::hazard::HazardTable;
use crate::scenario_file::sanitize_scenario;
use crate::spawns::calculate_spawns;
use crate::statistics::{calculate_direction_stats, total_grill_count};
use crate::validation::{
    find_all_invalid_defeats, find_cascade_removals, validate_add_defeat, validate_move_defeat,
    Validation,
};

/// The planner. Owns the scenario and keeps its defeat chains consistent.
pub struct Planner {
    table: HazardTable,
    scenario: ScenarioData,
    hazard_config: InterpolatedHazardConfig,
    command_queue: VecDeque<PlannerCommand>,
    events: Vec<PlannerEvent>,
}

impl Planner {
    /// Planner holding the default scenario.
    pub fn new(table: HazardTable) -> Self {
        Self::with_scenario(table, ScenarioData::default())
    }

    /// Planner holding `scenario`, sanitized the same way a load is.
    pub fn with_scenario(table: HazardTable, scenario: ScenarioData) -> Self {
        let hazard_config = table.config_for(scenario.hazard_level);
        let mut planner = Self {
            table,
            scenario: ScenarioData::default(),
            hazard_config,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };
        planner.load(scenario);
        planner
    }

    /// Queue a command for the next `process` call.
    pub fn queue_command(&mut self, command: PlannerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlannerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply every queued command and return the resulting snapshot.
    ///
    /// The snapshot carries the events produced since the previous call.
    pub fn process(&mut self) -> PlanSnapshot {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Snapshot of the current state without applying queued commands.
    pub fn snapshot(&self) -> PlanSnapshot {
        self.build_snapshot(Vec::new())
    }

    pub fn scenario(&self) -> &ScenarioData {
        &self.scenario
    }

    pub fn hazard_config(&self) -> &InterpolatedHazardConfig {
        &self.hazard_config
    }

    pub fn table(&self) -> &HazardTable {
        &self.table
    }

    fn build_snapshot(&self, events: Vec<PlannerEvent>) -> PlanSnapshot {
        let directions = &self.scenario.directions;
        let defeats = &self.scenario.defeats;
        let spawns = calculate_spawns(&self.hazard_config, directions, defeats);
        let direction_stats = calculate_direction_stats(&spawns, defeats, directions);

        PlanSnapshot {
            hazard_level: self.scenario.hazard_level,
            hazard_config: self.hazard_config,
            directions: directions.clone(),
            defeats: defeats.clone(),
            total_grill_count: total_grill_count(&direction_stats),
            spawns,
            direction_stats,
            events,
        }
    }

    fn handle_command(&mut self, command: PlannerCommand) {
        match command {
            PlannerCommand::AddDefeat { defeat } => self.add_defeat(defeat),
            PlannerCommand::MoveDefeat { id, frame_time } => self.move_defeat(id, frame_time),
            PlannerCommand::RemoveDefeat { id } => self.remove_defeat(&id),
            PlannerCommand::SetHazardLevel { level } => self.set_hazard_level(level),
            PlannerCommand::SetDirections { directions } => {
                self.scenario.directions = if directions.is_empty() {
                    generate_default_directions(self.hazard_config.direction_interval)
                } else {
                    sorted_descending(&directions)
                };
            }
            PlannerCommand::SetDirection { index, direction } => {
                if let Some(setting) = self.scenario.directions.get_mut(index) {
                    setting.direction = direction;
                }
            }
            PlannerCommand::SetMemo { memo } => {
                self.scenario.memo = memo;
            }
            PlannerCommand::SetDisplayMode { mode } => {
                self.scenario.display_mode = mode;
            }
            PlannerCommand::SetDirectionPreset { index, name } => {
                if let Some(preset) = self.scenario.direction_presets.get_mut(index) {
                    *preset = name;
                }
            }
            PlannerCommand::LoadScenario { scenario } => self.load(scenario),
            PlannerCommand::ResetScenario => self.load(ScenarioData::default()),
        }
    }

    fn reject(&mut self, id: String, reason: String) {
        log::debug!("rejected edit of {id}: {reason}");
        self.events.push(PlannerEvent::DefeatRejected { id, reason });
    }

    fn add_defeat(&mut self, defeat: DefeatPoint) {
        if self.scenario.defeats.iter().any(|d| d.id == defeat.id) {
            let reason = format!("defeat id {} is already in use", defeat.id);
            return self.reject(defeat.id, reason);
        }
        if !is_frame_in_range(defeat.frame_time) {
            let reason = format!("frame {} is out of range", defeat.frame_time);
            return self.reject(defeat.id, reason);
        }

        let validation = validate_add_defeat(
            &defeat,
            &self.scenario.defeats,
            &self.hazard_config,
            &self.scenario.directions,
        );
        match validation {
            Validation::Valid => {
                self.events.push(PlannerEvent::DefeatAdded {
                    id: defeat.id.clone(),
                });
                self.scenario.defeats.push(defeat);
            }
            Validation::Invalid { reason } => self.reject(defeat.id, reason),
        }
    }

    fn move_defeat(&mut self, id: String, frame_time: FrameTime) {
        if !is_frame_in_range(frame_time) {
            return self.reject(id, format!("frame {frame_time} is out of range"));
        }
        let validation = validate_move_defeat(
            &id,
            frame_time,
            &self.scenario.defeats,
            &self.hazard_config,
            &self.scenario.directions,
        );
        if let Validation::Invalid { reason } = validation {
            return self.reject(id, reason);
        }

        if let Some(defeat) = self.scenario.defeats.iter_mut().find(|d| d.id == id) {
            defeat.frame_time = frame_time;
        }
        self.events.push(PlannerEvent::DefeatMoved { id });
    }

    fn remove_defeat(&mut self, id: &str) {
        if !self.scenario.defeats.iter().any(|d| d.id == id) {
            return;
        }
        let removed = find_cascade_removals(
            id,
            &self.scenario.defeats,
            &self.hazard_config,
            &self.scenario.directions,
        );
        self.drop_defeats(removed, RemovalCause::Cascade);
    }

    /// Change the hazard level and reconcile everything that depends on it.
    fn set_hazard_level(&mut self, level: f64) {
        if level.is_nan() {
            return;
        }
        let level = level.clamp(MIN_HAZARD_LEVEL, MAX_HAZARD_LEVEL);
        let was_open = self.hazard_config.is_b_slot_open();

        self.scenario.hazard_level = level;
        self.hazard_config = self.table.config_for(level);
        self.scenario.directions =
            regenerate_directions(self.hazard_config.direction_interval, &self.scenario.directions);

        let is_open = self.hazard_config.is_b_slot_open();
        if was_open != is_open {
            self.events.push(PlannerEvent::BSlotChanged { open: is_open });
        }

        let mut removed: Vec<String> = Vec::new();
        if !is_open {
            removed.extend(
                self.scenario
                    .defeats
                    .iter()
                    .filter(|d| d.slot == Slot::B)
                    .map(|d| d.id.clone()),
            );
            self.scenario.defeats.retain(|d| d.slot != Slot::B);
        }
        removed.extend(find_all_invalid_defeats(
            &self.scenario.defeats,
            &self.hazard_config,
            &self.scenario.directions,
        ));

        log::debug!(
            "hazard level {level}: interval {:.2}s, slot B {}, {} defeat(s) dropped",
            self.hazard_config.direction_interval,
            if is_open { "open" } else { "closed" },
            removed.len()
        );
        self.drop_defeats(removed, RemovalCause::HazardChange);
    }

    fn load(&mut self, mut scenario: ScenarioData) {
        if scenario.hazard_level.is_nan() {
            scenario.hazard_level = ScenarioData::default().hazard_level;
        }
        scenario.hazard_level = scenario.hazard_level.clamp(MIN_HAZARD_LEVEL, MAX_HAZARD_LEVEL);
        scenario.directions = sorted_descending(&scenario.directions);

        let imported = sanitize_scenario(scenario, &self.table);
        self.hazard_config = self.table.config_for(imported.scenario.hazard_level);
        self.scenario = imported.scenario;
        if !imported.removed_defeats.is_empty() {
            self.events.push(PlannerEvent::DefeatsRemoved {
                ids: imported.removed_defeats,
                cause: RemovalCause::Sanitize,
            });
        }
    }

    fn drop_defeats(&mut self, ids: Vec<String>, cause: RemovalCause) {
        if ids.is_empty() {
            return;
        }
        self.scenario.defeats.retain(|d| !ids.contains(&d.id));
        self.events.push(PlannerEvent::DefeatsRemoved { ids, cause });
    }
}
