//! Events emitted by the planner for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::RemovalCause;

/// Outcome notifications produced while applying commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum PlannerEvent {
    /// A defeat was placed.
    DefeatAdded { id: String },
    /// A defeat was moved.
    DefeatMoved { id: String },
    /// An add or move was refused; state is unchanged.
    DefeatRejected { id: String, reason: String },
    /// Defeats were dropped to keep the chain consistent.
    DefeatsRemoved { ids: Vec<String>, cause: RemovalCause },
    /// Slot B opened or closed after a hazard level change.
    BSlotChanged { open: bool },
}
