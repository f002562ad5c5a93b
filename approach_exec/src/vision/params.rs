//! Parameters structure for the vision monitor

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Number of consecutive cycles without a new frame after which the
    /// camera is considered disconnected.
    #[serde(default = "default_disconnect_threshold")]
    pub disconnect_threshold: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            disconnect_threshold: default_disconnect_threshold()
        }
    }
}

/// About one second at 50 Hz.
fn default_disconnect_threshold() -> u32 {
    50
}
