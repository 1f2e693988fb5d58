//! Enumeration types used throughout the planner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DIRECTION_COUNT;

/// Enemy slot. Slot A is always open; slot B opens partway through the match
/// depending on the hazard level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    A,
    B,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::A, Slot::B];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => f.write_str("A"),
            Slot::B => f.write_str("B"),
        }
    }
}

/// One of the three rotating direction zones.
///
/// Serialized as the bare integer 0, 1 or 2. Several schedule intervals can
/// share the same id, so aggregate by id and index intervals separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DirectionId {
    #[default]
    First,
    Second,
    Third,
}

impl DirectionId {
    pub const ALL: [DirectionId; DIRECTION_COUNT] = [DirectionId::First, DirectionId::Second, DirectionId::Third];

    /// Id assigned to the `index`-th generated breakpoint (cycles 0, 1, 2).
    pub fn cyclic(index: usize) -> Self {
        Self::ALL[index % DIRECTION_COUNT]
    }

    pub fn index(self) -> u8 {
        match self {
            DirectionId::First => 0,
            DirectionId::Second => 1,
            DirectionId::Third => 2,
        }
    }
}

impl TryFrom<u8> for DirectionId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DirectionId::First),
            1 => Ok(DirectionId::Second),
            2 => Ok(DirectionId::Third),
            other => Err(format!("direction id out of range: {other}")),
        }
    }
}

impl From<DirectionId> for u8 {
    fn from(id: DirectionId) -> Self {
        id.index()
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// How markers are labelled in the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Icon,
    Text,
    #[default]
    Both,
}

/// Why defeats were dropped from a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Explicit removal plus everything it invalidated.
    Cascade,
    /// Slot B closed or respawns shifted after a hazard level change.
    HazardChange,
    /// Inconsistent defeats dropped while loading a scenario.
    Sanitize,
}
