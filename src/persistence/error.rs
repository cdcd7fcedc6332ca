//! Error types for saving and loading.

use std::fmt;

use thiserror::Error;

/// Which bridge call was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOperation {
    Save,
    Load,
}

impl fmt::Display for BridgeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeOperation::Save => f.write_str("saving"),
            BridgeOperation::Load => f.write_str("loading"),
        }
    }
}

/// Errors from the save/load path.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No host bridge is connected. The message is shown to the player as is.
    #[error("Error: host bridge not available for {0}")]
    BridgeUnavailable(BridgeOperation),

    /// The snapshot could not be encoded.
    #[error("Failed to encode game state: {0}")]
    Encode(#[source] serde_json::Error),

    /// The payload is not valid JSON of the expected shape.
    #[error("Malformed game state: {0}")]
    Parse(#[source] serde_json::Error),

    /// The payload parsed but a value is out of range.
    #[error("Invalid value {value} for '{field}'")]
    InvalidField { field: &'static str, value: String },

    /// Reading or writing the save file failed.
    #[error("Save file '{path}': {details}")]
    Io { path: String, details: String },
}
