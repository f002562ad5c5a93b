//! # Approach telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command for the vision-guided approach.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproachCmd {
    /// Start (or restart) approaching the best visible target.
    Start,

    /// Abort the approach, bringing the base to rest.
    Abort,
}
