use serde::{Deserialize, Serialize};
use startup_survivor_core::{EngineConfig, GameState};
use thiserror::Error;

use crate::TurnLog;

/// Version written by [`RunExport::to_json`] and the only one accepted on import.
pub const EXPORT_VERSION: u32 = 1;

/// Snapshot of a run: configuration, current state and every turn log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunExport {
    /// Format version.
    pub version: u32,
    /// Run parameters.
    pub config: EngineConfig,
    /// State after the last processed turn.
    pub state: GameState,
    /// Turn logs in play order.
    pub logs: Vec<TurnLog>,
}

/// Failures while reading or writing a run export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document is not valid export JSON.
    #[error("invalid run export: {0}")]
    Json(#[from] serde_json::Error),
    /// The document was written by an incompatible version.
    #[error("unsupported run export version {found}, expected {}", EXPORT_VERSION)]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
    },
}

impl RunExport {
    /// Captures a run at the current version.
    #[must_use]
    pub fn new(config: EngineConfig, state: GameState, logs: Vec<TurnLog>) -> Self {
        Self {
            version: EXPORT_VERSION,
            config,
            state,
            logs,
        }
    }

    /// Pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document, rejecting other versions.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Json`] on malformed input and
    /// [`ExportError::UnsupportedVersion`] on a version mismatch.
    pub fn from_json(text: &str) -> Result<Self, ExportError> {
        let export: RunExport = serde_json::from_str(text)?;
        if export.version != EXPORT_VERSION {
            return Err(ExportError::UnsupportedVersion {
                found: export.version,
            });
        }
        Ok(export)
    }
}
