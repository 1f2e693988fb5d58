use thiserror::Error;

/// Rejection of externally authored data before any engine computation runs.
#[derive(Error, Debug)]
pub enum ScenarioFileError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scenario file is not a JSON object")]
    NotAnObject,

    #[error("Unsupported version: {found}")]
    UnsupportedVersion { found: String },

    #[error("Missing scenario field")]
    MissingScenario,

    #[error("Hazard level must be a number between {min} and {max}")]
    InvalidHazardLevel { min: f64, max: f64 },

    #[error("Malformed directions: {0}")]
    MalformedDirections(String),

    #[error("Malformed defeats: {0}")]
    MalformedDefeats(String),

    #[error("Malformed hazard table: {0}")]
    MalformedTable(String),
}
