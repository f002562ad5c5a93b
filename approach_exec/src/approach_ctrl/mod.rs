//! # Approach control module
//!
//! Drives the base towards a visual target until it is both aligned with the
//! target and at the desired distance from it.
//!
//! The controller is a pure function of the current target observation, it
//! keeps no memory between ticks other than a copy of its last output for
//! monitoring.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod law;
pub mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::{Params, ParamsError};
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while setting up ApproachCtrl.
#[derive(Debug, thiserror::Error)]
pub enum ApproachCtrlError {
    #[error("Could not load the ApproachCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("The ApproachCtrl parameters are invalid: {0}")]
    InvalidParams(ParamsError),

    #[error("Could not create the ApproachCtrl archives: {0}")]
    ArchiveError(util::archive::ArchiveError),
}
